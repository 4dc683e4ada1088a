//! Route segment naming and redirect expression templating.
//!
//! Dynamic segments are written in bracket syntax (`[userId]`). Generated
//! pages turn such a path into a template-literal expression that reads the
//! value from the page's `params` object at runtime.

use regex::Regex;
use std::sync::LazyLock;

use crate::codegen::utils::{lower_first, upper_first};

static DYNAMIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("dynamic segment pattern is valid"));

/// Name of the dynamic parameter addressing one identifier field of a model
///
/// The model name loses its leading capital and the field name gains one,
/// so `("User", "id")` gives `userId`. Both segment naming and runtime
/// expressions go through this function so the two always agree.
pub fn slug_for(model_name: &str, identifier_field: &str) -> String {
    format!("{}{}", lower_first(model_name), upper_first(identifier_field))
}

/// Slugs for every field of an identifier set, in order
pub fn slugs_for(model_name: &str, identifier_fields: &[String]) -> Vec<String> {
    identifier_fields
        .iter()
        .map(|field| slug_for(model_name, field))
        .collect()
}

/// Wrap a slug in bracket syntax
pub fn dynamic_segment(slug: &str) -> String {
    format!("[{}]", slug)
}

/// Check whether a segment is a bracketed dynamic parameter
pub fn is_dynamic(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('[') && segment.ends_with(']')
}

/// Static path segment for a model's collection (`BlogPost` -> `blogPost`)
pub fn collection_segment(model_name: &str) -> String {
    lower_first(model_name)
}

/// Replace every bracketed segment with a `${params.name}` expression
///
/// Everything outside the brackets is kept verbatim, so the call is a no-op
/// on paths without dynamic segments.
///
/// ```
/// use quikroute::codegen::segments::to_runtime_expression;
///
/// assert_eq!(
///     to_runtime_expression("/user/[userId]/post/[postId]"),
///     "/user/${params.userId}/post/${params.postId}"
/// );
/// ```
pub fn to_runtime_expression(route_path: &str) -> String {
    DYNAMIC_SEGMENT
        .replace_all(route_path, "$${params.$1}")
        .into_owned()
}

/// Join segments into an absolute URL path, skipping empty segments
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    let joined: Vec<&str> = segments
        .iter()
        .map(|s| s.as_ref().trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect();

    format!("/{}", joined.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_for() {
        assert_eq!(slug_for("User", "id"), "userId");
        assert_eq!(slug_for("BlogPost", "slug"), "blogPostSlug");
        assert_eq!(slug_for("Post", "id"), slug_for("Post", "id"));
    }

    #[test]
    fn test_slugs_for_keep_order() {
        let fields = vec!["tenant".to_string(), "code".to_string()];
        assert_eq!(slugs_for("Account", &fields), vec!["accountTenant", "accountCode"]);
    }

    #[test]
    fn test_dynamic_segment() {
        assert_eq!(dynamic_segment("userId"), "[userId]");
        assert!(is_dynamic("[userId]"));
        assert!(!is_dynamic("user"));
        assert!(!is_dynamic("[]"));
    }

    #[test]
    fn test_to_runtime_expression() {
        assert_eq!(
            to_runtime_expression("model/[modelId]/child/[childId]"),
            "model/${params.modelId}/child/${params.childId}"
        );
    }

    #[test]
    fn test_to_runtime_expression_preserves_static_text() {
        assert_eq!(to_runtime_expression("/Admin/UserList"), "/Admin/UserList");
        assert_eq!(to_runtime_expression(""), "");
    }

    #[test]
    fn test_to_runtime_expression_idempotent() {
        let once = to_runtime_expression("/user/[userId]/edit");
        assert_eq!(to_runtime_expression(&once), once);
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(&["", "user", "[userId]"]), "/user/[userId]");
        assert_eq!(join_path(&["admin/", "/post"]), "/admin/post");
        assert_eq!(join_path::<&str>(&[]), "/");
    }
}
