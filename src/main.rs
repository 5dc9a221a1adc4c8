use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toolshed::registry::BuildMode;
use toolshed::tool_config::{ParseOptions, parse_tool_config};
use toolshed::{config, discover, export, output, registry};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "toolshed")]
#[command(about = "Hash-routed shell for collections of small self-contained tools")]
#[command(long_about = "\
Hash-routed shell for collections of small self-contained tools

Your content directory is the data source. Every folder with a tool.json
becomes a tool; one level of grouping folders assigns sections.

Content structure:

  tools/
  ├── site.toml                    # Site config (optional)
  ├── 010-calculator/              # Tool (NNN- prefix = overview order)
  │   ├── tool.json                # Config record (name, description, …)
  │   └── template.html            # Markup (placeholder when absent)
  ├── 030-text/                    # Section folder (no tool.json)
  │   └── 010-counter/             # Tool in section \"text\"
  │       └── tool.json
  └── scratchpad/                  # No prefix = sorts after prefixed tools

Draft tools (draft = true in tool.json) are only registered with --dev;
example tools disappear when site.toml sets show_examples = false.

Run 'toolshed gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Content directory holding tool folders and site.toml
    #[arg(long, default_value = "tools", global = true)]
    source: PathBuf,

    /// Output directory for the static export
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Development build: register drafts, validate configs strictly
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Strictly validate every tool bundle without building
    Check,
    /// Full pipeline: resolve config → build registry → export HTML
    Build,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            let source = discover::DirectorySource::open(&cli.source)?;
            let checks = run_checks(&source);
            output::print_check_output(&checks);
            if checks.iter().any(|c| c.outcome.is_err()) {
                return Err("tool configuration errors found".into());
            }
        }
        Command::Build => {
            let site = config::load_config(&cli.source)?;
            let source = discover::DirectorySource::open(&cli.source)?;
            let mode = if cli.dev {
                BuildMode::Development
            } else {
                BuildMode::Production
            };
            let tools = registry::build_registry(&source, &site, mode)?;
            let summary = export::export_site(&tools, &site, &cli.output)?;
            output::print_export_output(&summary);
            println!("Site exported to {}", cli.output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Strict-parse every bundle, collecting all failures instead of stopping
/// at the first; `check` is a report, not a boot.
fn run_checks(source: &dyn registry::AssetSource) -> Vec<output::ToolCheck> {
    source
        .bundles()
        .into_iter()
        .map(|locator| {
            let raw = source.config(&locator.path).unwrap_or(serde_json::Value::Null);
            let options = ParseOptions {
                strict: true,
                source_id: locator.source_id.clone(),
            };
            let outcome = parse_tool_config(&raw, &locator.path, &options)
                .map(|parsed| parsed.config.name)
                .map_err(|err| err.to_string());
            output::ToolCheck {
                path: locator.path,
                source_id: locator.source_id,
                outcome,
            }
        })
        .collect()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
