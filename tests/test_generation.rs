//! Test route generation for the bundled blog example project

use std::fs;
use std::path::PathBuf;

use quikroute::codegen::{generate_project, ProjectConfig};

fn example_config() -> ProjectConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/examples/blog/quikroute.yaml");
    let config = ProjectConfig::from_file(&path).expect("Failed to load example config");
    config.validate().expect("Example config is invalid");
    config
}

#[test]
fn test_blog_example_generation() {
    let output = tempfile::tempdir().unwrap();

    let mut generation = example_config().to_generation_config();
    generation.output = output.path().to_path_buf();

    let report = generate_project(&generation).expect("Generation failed");

    assert_eq!(report.models, 5);
    // admin: User tree 20, Category 5, AuditLog 2; authors: User tree at depth 2
    assert_eq!(report.routes.len(), 27 + 15);
    assert_eq!(report.files.len(), report.routes.len() + 2);

    let root = output.path();
    for expected in [
        "admin/page.tsx",
        "admin/user/page.tsx",
        "admin/user/create/page.tsx",
        "admin/user/[userId]/page.tsx",
        "admin/user/[userId]/edit/page.tsx",
        "admin/user/[userId]/delete/route.ts",
        "admin/user/[userId]/post/[postId]/comment/[commentId]/edit/page.tsx",
        "admin/user/[userId]/comment/[commentId]/page.tsx",
        "admin/category/[categorySlug]/page.tsx",
        "admin/auditLog/create/page.tsx",
        "authors/page.tsx",
        "authors/user/[userId]/post/[postId]/page.tsx",
    ] {
        assert!(root.join(expected).is_file(), "missing {}", expected);
    }

    // No record routes for a model without an identifier
    assert!(!root.join("admin/auditLog").read_dir().unwrap().any(|e| {
        e.unwrap().file_name().to_string_lossy().starts_with('[')
    }));

    // Depth 2 stops the authors tree below Post
    assert!(!root.join("authors/user/[userId]/post/[postId]/comment").exists());

    // Category's children relation points back at itself
    assert!(!root.join("admin/category/[categorySlug]/category").exists());
}

#[test]
fn test_generated_contents_are_substituted() {
    let output = tempfile::tempdir().unwrap();

    let mut generation = example_config().to_generation_config();
    generation.output = output.path().to_path_buf();
    generate_project(&generation).expect("Generation failed");

    let edit = fs::read_to_string(
        output.path().join("admin/user/[userId]/post/[postId]/edit/page.tsx"),
    )
    .unwrap();
    assert!(edit.contains("/admin/user/${params.userId}/post/${params.postId}"));
    assert!(edit.contains("id: Number(params.postId)"));
    assert!(!edit.contains("{{"));
    assert!(!edit.contains("quikTemplateModel"));

    let category = fs::read_to_string(output.path().join("admin/category/[categorySlug]/page.tsx")).unwrap();
    assert!(category.contains("slug: params.categorySlug"));

    let home = fs::read_to_string(output.path().join("admin/page.tsx")).unwrap();
    assert!(home.contains("href={`/admin/user`}"));
    assert!(home.contains("href={`/admin/category`}"));
    assert!(home.contains("href={`/admin/auditLog`}"));
    assert!(!home.contains("[userId]"));
}

#[test]
fn test_generation_is_repeatable() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let mut generation = example_config().to_generation_config();
    generation.output = first.path().to_path_buf();
    let a = generate_project(&generation).unwrap();
    generation.output = second.path().to_path_buf();
    let b = generate_project(&generation).unwrap();

    assert_eq!(a.files, b.files);
    for file in &a.files {
        assert_eq!(
            fs::read_to_string(first.path().join(file)).unwrap(),
            fs::read_to_string(second.path().join(file)).unwrap(),
        );
    }
}

#[test]
fn test_schema_with_path_like_model_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.yaml");
    fs::write(
        &schema,
        "models:\n  - name: ../../escaped\n    fields:\n      - name: id\n        kind: identifier\n",
    )
    .unwrap();

    let generation = quikroute::codegen::GenerationConfig {
        schema,
        output: dir.path().join("out"),
        templates: None,
        groups: vec![Default::default()],
    };

    let err = generate_project(&generation).unwrap_err();
    assert!(matches!(
        err,
        quikroute::GenerateError::Schema(quikroute::SchemaError::InvalidName { .. })
    ));
    assert!(!dir.path().join("out").exists());
    assert!(!dir.path().join("escaped").exists());
}
