//! Reusable option documents

/// One parent with three leaves plus a root-level leaf
pub const PERMISSIONS_JSON: &str = r#"{
  "perm": {
    "label": "Permissions",
    "children": {
      "create": "Create",
      "edit": "Edit",
      "delete": "Delete"
    }
  },
  "reports": "Reports"
}"#;

/// root -> mid -> {leaf1, leaf2}
pub const CHAIN_JSON: &str = r#"{
  "root": {
    "label": "Root",
    "children": {
      "mid": {
        "label": "Mid",
        "children": {
          "leaf1": "Leaf 1",
          "leaf2": "Leaf 2"
        }
      }
    }
  }
}"#;

/// Flat relationship rows, numeric parent ids included
pub const FLAT_CATEGORIES_JSON: &str = r#"{
  "1": {"name": "Electronics", "parent_id": null},
  "2": {"name": "Phones", "parent_id": 1},
  "3": {"name": "Laptops", "parent_id": "1"},
  "4": {"name": "Books", "parent_id": null, "description": "Printed and digital"},
  "5": {"name": "Lost", "parent_id": 99}
}"#;

/// user_management -> {create_users, edit_users}, content -> posts -> publish
pub const USER_MANAGEMENT_JSON: &str = r#"{
  "user_management": {
    "label": "User Management",
    "children": {
      "create_users": "Create Users",
      "edit_users": "Edit Users"
    }
  },
  "content": {
    "label": "Content",
    "children": {
      "posts": {
        "label": "Posts",
        "children": {
          "publish": {"label": "Publish", "description": "Make posts public"}
        }
      }
    }
  }
}"#;
