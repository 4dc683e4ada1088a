//! Utility functions for code generation.

use convert_case::{Case, Casing};

/// Lowercase the first character, leaving the rest untouched ("BlogPost" -> "blogPost")
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first character, leaving the rest untouched ("id" -> "Id")
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a string to Title Case ("BlogPost" -> "Blog Post")
pub fn to_title_case(s: &str) -> String {
    s.to_case(Case::Title)
}

/// Naive English plural used in route descriptions
pub fn pluralize(s: &str) -> String {
    if s.ends_with('s') || s.ends_with('x') || s.ends_with("ch") || s.ends_with("sh") {
        format!("{}es", s)
    } else if s.ends_with('y')
        && !s.ends_with("ay")
        && !s.ends_with("ey")
        && !s.ends_with("oy")
        && !s.ends_with("uy")
    {
        format!("{}ies", &s[..s.len() - 1])
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_char_case() {
        assert_eq!(lower_first("BlogPost"), "blogPost");
        assert_eq!(upper_first("id"), "Id");
        assert_eq!(lower_first(""), "");
        assert_eq!(upper_first("already"), "Already");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(to_title_case("BlogPost"), "Blog Post");
        assert_eq!(to_title_case("auditLog"), "Audit Log");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("Post"), "Posts");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("Day"), "Days");
    }
}
