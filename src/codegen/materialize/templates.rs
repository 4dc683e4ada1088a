//! Template sets.
//!
//! A template set holds one template per CRUD operation plus static files
//! that are stamped once per route tree (e.g. the group's home page).
//!
//! On disk:
//!
//! ```text
//! templates/
//! ├── operations/
//! │   ├── list.tsx
//! │   ├── create.tsx
//! │   ├── read.tsx
//! │   ├── update.tsx
//! │   └── delete.ts
//! └── static/
//!     └── page.tsx
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::route_graph::Operation;
use crate::error::TemplateError;

const BUILTIN_LIST: &str = include_str!("../../../templates/operations/list.tsx");
const BUILTIN_CREATE: &str = include_str!("../../../templates/operations/create.tsx");
const BUILTIN_READ: &str = include_str!("../../../templates/operations/read.tsx");
const BUILTIN_UPDATE: &str = include_str!("../../../templates/operations/update.tsx");
const BUILTIN_DELETE: &str = include_str!("../../../templates/operations/delete.ts");
const BUILTIN_HOME: &str = include_str!("../../../templates/static/page.tsx");

/// File name of an operation's template inside `operations/`
pub fn template_file_name(operation: Operation) -> &'static str {
    match operation {
        Operation::List => "list.tsx",
        Operation::Create => "create.tsx",
        Operation::Read => "read.tsx",
        Operation::Update => "update.tsx",
        Operation::Delete => "delete.ts",
    }
}

/// File an operation is written to, inside its route's directory
pub fn output_file_name(operation: Operation) -> &'static str {
    match operation {
        Operation::List | Operation::Create | Operation::Read | Operation::Update => "page.tsx",
        Operation::Delete => "route.ts",
    }
}

/// A template copied once per tree, relative to the tree's root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTemplate {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    list: String,
    create: String,
    read: String,
    update: String,
    delete: String,
    static_files: Vec<StaticTemplate>,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateSet {
    /// Templates compiled into the binary
    pub fn builtin() -> Self {
        TemplateSet {
            list: BUILTIN_LIST.to_string(),
            create: BUILTIN_CREATE.to_string(),
            read: BUILTIN_READ.to_string(),
            update: BUILTIN_UPDATE.to_string(),
            delete: BUILTIN_DELETE.to_string(),
            static_files: vec![StaticTemplate {
                path: PathBuf::from("page.tsx"),
                contents: BUILTIN_HOME.to_string(),
            }],
        }
    }

    /// Load templates from a directory, falling back to built-ins
    ///
    /// Missing operation templates keep the built-in version. A `static/`
    /// directory, when present, replaces the built-in static files entirely.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TemplateError::MissingDirectory(dir.to_path_buf()));
        }

        let mut set = Self::builtin();

        let operations_dir = dir.join("operations");
        for op in [
            Operation::List,
            Operation::Create,
            Operation::Read,
            Operation::Update,
            Operation::Delete,
        ] {
            let path = operations_dir.join(template_file_name(op));
            if path.is_file() {
                let contents = read_template(&path)?;
                tracing::debug!(operation = %op, path = %path.display(), "template override");
                *set.slot_mut(op) = contents;
            }
        }

        let static_dir = dir.join("static");
        if static_dir.is_dir() {
            let mut files = Vec::new();
            collect_files(&static_dir, &mut files)?;
            files.sort();

            set.static_files = files
                .into_iter()
                .map(|path| -> Result<StaticTemplate, TemplateError> {
                    let contents = read_template(&path)?;
                    let relative = path
                        .strip_prefix(&static_dir)
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|_| path.clone());
                    Ok(StaticTemplate {
                        path: relative,
                        contents,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
        }

        Ok(set)
    }

    /// Template text for an operation
    pub fn operation(&self, operation: Operation) -> &str {
        match operation {
            Operation::List => &self.list,
            Operation::Create => &self.create,
            Operation::Read => &self.read,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }

    pub fn static_files(&self) -> &[StaticTemplate] {
        &self.static_files
    }

    /// Replace the template of one operation
    pub fn with_operation(mut self, operation: Operation, contents: impl Into<String>) -> Self {
        *self.slot_mut(operation) = contents.into();
        self
    }

    /// Replace all static files
    pub fn with_static_files(mut self, static_files: Vec<StaticTemplate>) -> Self {
        self.static_files = static_files;
        self
    }

    fn slot_mut(&mut self, operation: Operation) -> &mut String {
        match operation {
            Operation::List => &mut self.list,
            Operation::Create => &mut self.create,
            Operation::Read => &mut self.read,
            Operation::Update => &mut self.update,
            Operation::Delete => &mut self.delete,
        }
    }
}

fn read_template(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), TemplateError> {
    let entries = fs::read_dir(dir).map_err(|source| TemplateError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| TemplateError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_files(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_present() {
        let set = TemplateSet::builtin();

        assert!(set.operation(Operation::List).contains("{{ model_plural_title }}"));
        assert!(set.operation(Operation::Delete).contains("export async function POST"));
        assert_eq!(set.static_files().len(), 1);
        assert_eq!(set.static_files()[0].path, PathBuf::from("page.tsx"));
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(output_file_name(Operation::List), "page.tsx");
        assert_eq!(output_file_name(Operation::Update), "page.tsx");
        assert_eq!(output_file_name(Operation::Delete), "route.ts");
    }

    #[test]
    fn test_from_dir_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("operations")).unwrap();
        fs::create_dir_all(dir.path().join("static/layout")).unwrap();
        fs::write(dir.path().join("operations/read.tsx"), "custom read {{ model }}").unwrap();
        fs::write(dir.path().join("static/layout/nav.tsx"), "nav").unwrap();
        fs::write(dir.path().join("static/index.tsx"), "index").unwrap();

        let set = TemplateSet::from_dir(dir.path()).unwrap();

        assert_eq!(set.operation(Operation::Read), "custom read {{ model }}");
        assert_eq!(set.operation(Operation::List), BUILTIN_LIST);

        let paths: Vec<&Path> = set.static_files().iter().map(|s| s.path.as_path()).collect();
        assert_eq!(paths, vec![Path::new("index.tsx"), Path::new("layout/nav.tsx")]);
    }

    #[test]
    fn test_from_dir_missing() {
        let result = TemplateSet::from_dir("/definitely/not/here");
        assert!(matches!(result, Err(TemplateError::MissingDirectory(_))));
    }
}
