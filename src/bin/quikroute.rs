//! quikroute CLI - schema-driven CRUD route generation
//!
//! Builds route trees from a model schema and writes one file per route.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use quikroute::codegen::{
    self, fs_utils, orchestration, GenerationConfig, GroupConfig, ProjectConfig,
};
use quikroute::codegen::identifier;

const DEFAULT_CONFIG: &str = "quikroute.yaml";

#[derive(Parser)]
#[command(name = "quikroute")]
#[command(version, about = "Schema-driven CRUD route generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Selection of a single route tree from the command line
#[derive(clap::Args, Debug, Clone, Default)]
struct TreeArgs {
    /// Group name, used as the leading path segment
    #[arg(short, long)]
    group: Option<String>,

    /// Root model (repeatable); discovered from the schema when omitted
    #[arg(short, long = "root")]
    roots: Vec<String>,

    /// Maximum number of models on any route path
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,
}

impl TreeArgs {
    fn is_set(&self) -> bool {
        self.group.is_some() || !self.roots.is_empty() || self.max_depth.is_some()
    }

    fn to_group(&self) -> GroupConfig {
        GroupConfig {
            name: self.group.clone(),
            roots: self.roots.clone(),
            max_depth: self.max_depth,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate route files from a schema
    Generate {
        /// Path to quikroute.yaml (used when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Schema file or directory (overrides config)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Template directory (overrides config)
        #[arg(short, long)]
        templates: Option<PathBuf>,

        #[command(flatten)]
        tree: TreeArgs,

        /// Remove the output directory before writing
        #[arg(long)]
        clean: bool,
    },

    /// Print the routes a schema produces
    Routes {
        /// Schema file or directory
        #[arg(short, long)]
        schema: Option<PathBuf>,

        #[command(flatten)]
        tree: TreeArgs,

        /// Print routes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a schema without generating anything
    Validate {
        /// Schema file or directory
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("QUIKROUTE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config, schema, output, templates, tree, clean } => {
            generate(config, schema, output, templates, tree, clean)
        }
        Commands::Routes { schema, tree, json } => {
            print_routes(schema, tree, json)
        }
        Commands::Validate { schema } => {
            validate_schema(schema)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Resolve a path with precedence: CLI > ENV > config file > default
fn resolve_path(
    cli: Option<PathBuf>,
    env_var: &str,
    from_config: Option<PathBuf>,
    default: &str,
) -> PathBuf {
    if let Some(path) = cli {
        return path;
    }
    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            // stderr, so `routes --json` output stays parseable
            eprintln!("  ℹ Using {} from {}", value, env_var);
            return PathBuf::from(value);
        }
    }
    from_config.unwrap_or_else(|| PathBuf::from(default))
}

/// Load quikroute.yaml if it was asked for or sits in the working directory
fn load_project_config(config: Option<PathBuf>) -> Result<Option<ProjectConfig>, String> {
    let path = match config {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).exists() => PathBuf::from(DEFAULT_CONFIG),
        None => return Ok(None),
    };

    let project = ProjectConfig::from_file(&path)?;
    project.validate()?;
    println!("  ✓ Loaded project: {}", project.project.name);

    Ok(Some(project))
}

fn load_schema(schema: Option<PathBuf>) -> Result<quikroute::ModelRegistry, String> {
    let schema = resolve_path(schema, "QUIKROUTE_SCHEMA", None, "schema.yaml");
    let registry = quikroute::load_registry(&schema)
        .map_err(|e| format!("Failed to load schema: {}", e))?;
    // Shared with `routes --json`; stdout carries only the JSON there
    eprintln!("  ✓ Loaded {} models from {}", registry.len(), schema.display());
    Ok(registry)
}

/// Generate route files from a schema
fn generate(
    config: Option<PathBuf>,
    schema: Option<PathBuf>,
    output: Option<PathBuf>,
    templates: Option<PathBuf>,
    tree: TreeArgs,
    clean: bool,
) -> Result<(), String> {
    println!("🔧 Generating routes...");

    let project = load_project_config(config)?;

    let schema = resolve_path(
        schema,
        "QUIKROUTE_SCHEMA",
        project.as_ref().map(|p| p.schema_path()),
        "schema.yaml",
    );
    let output = resolve_path(
        output,
        "QUIKROUTE_OUTPUT",
        project.as_ref().map(|p| p.output_path()),
        "generated",
    );
    let templates = templates
        .or_else(|| std::env::var("QUIKROUTE_TEMPLATES").ok().map(PathBuf::from))
        .or_else(|| project.as_ref().and_then(|p| p.templates_path()));

    // Tree flags on the command line replace the configured groups
    let groups = match &project {
        _ if tree.is_set() => vec![tree.to_group()],
        Some(p) if !p.groups.is_empty() => p.groups.clone(),
        _ => vec![GroupConfig::default()],
    };

    if clean {
        fs_utils::clear_dir(&output)
            .map_err(|e| format!("Failed to clean {}: {}", output.display(), e))?;
        println!("  ✓ Cleaned {}", output.display());
    }

    let generation = GenerationConfig {
        schema,
        output: output.clone(),
        templates,
        groups,
    };

    let report = orchestration::generate_project(&generation).map_err(|e| e.to_string())?;

    println!("  ✓ {} models, {} routes", report.models, report.routes.len());
    println!("  ✓ Wrote {} files to {}", report.files.len(), output.display());
    println!("✨ Route generation complete!");

    Ok(())
}

/// Print the routes a schema produces
fn print_routes(schema: Option<PathBuf>, tree: TreeArgs, json: bool) -> Result<(), String> {
    let registry = load_schema(schema)?;

    let trees = orchestration::build_trees(&registry, &[tree.to_group()])
        .map_err(|e| e.to_string())?;
    let routes: Vec<codegen::RouteEntry> = trees.iter().flat_map(codegen::flatten).collect();

    if json {
        let out = serde_json::to_string_pretty(&routes)
            .map_err(|e| format!("Failed to serialize routes: {}", e))?;
        println!("{}", out);
    } else {
        println!();
        print!("{}", codegen::render_route_table(&routes));
    }

    Ok(())
}

/// Validate a schema without generating anything
fn validate_schema(schema: Option<PathBuf>) -> Result<(), String> {
    println!("🔍 Validating schema...");

    let registry = load_schema(schema)?;

    for model in registry.models() {
        let identifiers = identifier::resolve(model);
        if identifiers.is_empty() {
            println!("  ⚠ {}: no identifier, list/create routes only", model.name);
        } else {
            println!("  ✓ {}: identified by [{}]", model.name, identifiers.join(", "));
        }
    }

    let dangling = registry.unresolved_relations();
    if !dangling.is_empty() {
        for relation in &dangling {
            eprintln!(
                "  ✗ {}.{} references unknown model '{}'",
                relation.model, relation.field, relation.related
            );
        }
        return Err(format!("{} unresolved relation(s)", dangling.len()));
    }

    let roots = codegen::default_roots(&registry);
    println!("  ✓ Default roots: {}", roots.join(", "));

    let graph = codegen::RelationGraph::build(&registry);
    for model in registry.models() {
        let reachable = roots
            .iter()
            .any(|root| root == &model.name || graph.reaches(root, &model.name));
        if !reachable {
            println!("  ⚠ {}: not reachable from a default root", model.name);
        }
    }
    println!("✅ Schema is valid!");

    Ok(())
}
