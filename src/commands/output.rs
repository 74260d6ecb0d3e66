use std::path::Path;

use checkbox_tree::config::ConfigWarning;
use is_terminal::IsTerminal;

pub fn print_config_warnings(path: &Path, warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("Unknown config key '{}' in {}:{}", w.key, path.display(), line);
        } else {
            eprintln!("Unknown config key '{}' in {}", w.key, path.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}

/// Unicode icons only on an interactive, non-dumb terminal
pub fn supports_unicode(force_ascii: bool) -> bool {
    if force_ascii || !std::io::stdout().is_terminal() {
        return false;
    }
    let term = std::env::var("TERM").unwrap_or_default();
    !term.eq_ignore_ascii_case("dumb")
}

pub fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
