//! Plain-text rendering of tree rows.
//!
//! Rows come from [`TreeSelectionEngine::rows`]; every function here
//! returns a `String` so callers decide where output goes.

use crate::engine::{TreeRow, TreeSelectionEngine};
use crate::selection::CheckState;

/// Unicode icon set
pub mod icons {
    pub const SELECTED: &str = "●";
    pub const UNSELECTED: &str = "○";
    pub const PARTIAL: &str = "◐";
    pub const EXPAND: &str = "▼";
    pub const COLLAPSE: &str = "▶";
}

/// ASCII fallbacks for terminals without unicode
pub mod icons_ascii {
    pub const SELECTED: &str = "[x]";
    pub const UNSELECTED: &str = "[ ]";
    pub const PARTIAL: &str = "[-]";
    pub const EXPAND: &str = "[v]";
    pub const COLLAPSE: &str = "[>]";
}

fn pick(unicode: &'static str, ascii: &'static str, supports_unicode: bool) -> &'static str {
    if supports_unicode {
        unicode
    } else {
        ascii
    }
}

fn options_noun(count: usize) -> &'static str {
    if count == 1 {
        "option"
    } else {
        "options"
    }
}

fn state_icon(state: CheckState, supports_unicode: bool) -> &'static str {
    match state {
        CheckState::Checked => pick(icons::SELECTED, icons_ascii::SELECTED, supports_unicode),
        CheckState::Unchecked => pick(icons::UNSELECTED, icons_ascii::UNSELECTED, supports_unicode),
        CheckState::Indeterminate => pick(icons::PARTIAL, icons_ascii::PARTIAL, supports_unicode),
    }
}

/// Render a single row
pub fn render_row(row: &TreeRow, supports_unicode: bool) -> String {
    let indent = "  ".repeat(row.depth);

    // Expansion icon (only for parents)
    let expand_icon = if row.has_children {
        let icon = if row.expanded {
            pick(icons::EXPAND, icons_ascii::EXPAND, supports_unicode)
        } else {
            pick(icons::COLLAPSE, icons_ascii::COLLAPSE, supports_unicode)
        };
        format!("{} ", icon)
    } else {
        String::new()
    };

    let count_suffix = if row.has_children {
        format!(" ({} {})", row.leaf_count, options_noun(row.leaf_count))
    } else {
        String::new()
    };

    let description = row
        .description
        .as_deref()
        .map(|d| format!(" - {}", d))
        .unwrap_or_default();

    format!(
        "{}{}{} {}{}{}",
        indent,
        expand_icon,
        state_icon(row.state, supports_unicode),
        row.label,
        count_suffix,
        description
    )
}

/// Render rows, one per line
pub fn render_rows(rows: &[TreeRow], supports_unicode: bool) -> String {
    rows.iter()
        .map(|row| render_row(row, supports_unicode))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Icon legend
pub fn render_legend(supports_unicode: bool) -> String {
    format!(
        "{} = selected    {} = partial    {} = not selected",
        state_icon(CheckState::Checked, supports_unicode),
        state_icon(CheckState::Indeterminate, supports_unicode),
        state_icon(CheckState::Unchecked, supports_unicode),
    )
}

/// Render the status bar showing selection counts
pub fn render_status_bar(selected: usize, total: usize, supports_unicode: bool) -> String {
    format!(
        "Selected: {}/{} {}\n\n{}",
        selected,
        total,
        options_noun(total),
        render_legend(supports_unicode)
    )
}

/// Shown in place of rows when an active search matches nothing
pub fn render_no_results(query: &str) -> String {
    format!("No options match \"{}\"", query.trim())
}

/// Rows (or the no-results line) followed by the status bar
pub fn render_tree(engine: &TreeSelectionEngine, supports_unicode: bool) -> String {
    let body = if engine.has_any_visible_result() {
        render_rows(&engine.rows(), supports_unicode)
    } else {
        render_no_results(engine.search())
    };

    format!(
        "{}\n\n{}",
        body,
        render_status_bar(
            engine.selected_leaf_count(),
            engine.leaf_count(),
            supports_unicode
        )
    )
}
