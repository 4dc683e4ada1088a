//! Placeholder substitution for template contents.
//!
//! Three mechanisms are applied, in order:
//! - `{{ name }}` placeholders, looked up in a substitution map
//! - marked blocks between `@quikroute <name> start` and `@quikroute <name> stop`
//! - the sample model token, replaced while keeping the case of its first letter

use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::codegen::utils::{lower_first, upper_first};

/// Sample model name used inside templates
pub const TEMPLATE_MODEL_TOKEN: &str = "quikTemplateModel";

/// Marker prefix for generated blocks
pub const BLOCK_MARKER: &str = "@quikroute";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// Placeholder name -> value, in insertion order
pub type Substitutions = IndexMap<String, String>;

/// Replace `{{ name }}` placeholders
///
/// Unknown names are left untouched so template syntax that merely looks
/// like a placeholder survives.
pub fn render(template: &str, substitutions: &Substitutions) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match substitutions.get(name) {
                Some(value) => value.clone(),
                None => {
                    tracing::warn!(placeholder = %name, "unknown placeholder left as is");
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

/// Case-insensitively replace `search`, following the case of each match's first letter
///
/// With `search = "quikTemplateModel"` and `replacement = "BlogPost"`,
/// `quikTemplateModelList` becomes `blogPostList` and `addQuikTemplateModel`
/// becomes `addBlogPost`.
pub fn replace_preserving_case(content: &str, search: &str, replacement: &str) -> String {
    if search.is_empty() {
        return content.to_string();
    }

    let pattern = match Regex::new(&format!("(?i){}", regex::escape(search))) {
        Ok(pattern) => pattern,
        Err(_) => return content.to_string(),
    };

    pattern
        .replace_all(content, |caps: &Captures| {
            let first = caps[0].chars().next();
            match first {
                Some(c) if c.is_uppercase() => upper_first(replacement),
                Some(c) if c.is_lowercase() => lower_first(replacement),
                _ => replacement.to_string(),
            }
        })
        .into_owned()
}

/// Replace the lines between a block's start and stop markers
///
/// Marker lines are kept; generated lines take the start marker's
/// indentation. Content without both markers is returned unchanged.
pub fn replace_marked_block(content: &str, block: &str, generated: &[String]) -> String {
    let start = format!("{} {} start", BLOCK_MARKER, block);
    let stop = format!("{} {} stop", BLOCK_MARKER, block);

    let lines: Vec<&str> = content.lines().collect();
    let Some(start_index) = lines.iter().position(|line| line.contains(&start)) else {
        return content.to_string();
    };
    let Some(stop_offset) = lines[start_index..].iter().position(|line| line.contains(&stop)) else {
        return content.to_string();
    };
    let stop_index = start_index + stop_offset;

    let start_line = lines[start_index];
    let indent = &start_line[..start_line.len() - start_line.trim_start().len()];

    let mut out: Vec<String> = Vec::with_capacity(lines.len() + generated.len());
    out.extend(lines[..=start_index].iter().map(|l| l.to_string()));
    out.extend(generated.iter().map(|g| format!("{}{}", indent, g)));
    out.extend(lines[stop_index..].iter().map(|l| l.to_string()));

    let mut result = out.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    result
}
