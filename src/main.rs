use clap::{Parser, Subcommand};
use docweave::types::DocumentRecord;
use docweave::{aggregate, config, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docweave")]
#[command(about = "Aggregate extracted component docs into a render-ready manifest")]
#[command(long_about = "\
Aggregate extracted component docs into a render-ready manifest

docweave is the middle stage of a documentation pipeline: an extractor has
already turned source comments and demo folders into a flat JSON list of
records; docweave groups those records by component, classifies them, and
emits an ordered manifest the rendering stage consumes.

Record list (input, one JSON array per file):

  [
    {\"componentId\": \"btn\", \"componentName\": \"Button\", \"docType\": \"readme\",
     \"name\": \"overview\", \"content\": \"...\"},
    {\"componentId\": \"btn\", \"componentName\": \"Button\", \"docType\": \"demo\",
     \"id\": \"basic\", \"name\": \"basic\", \"basePath\": \"index.html\"},
    {\"componentId\": \"btn\", \"componentName\": \"Button\", \"docType\": \"demo\",
     \"id\": \"basic\", \"name\": \"basic\", \"basePath\": \"demo.js\", \"fileType\": \"js\"}
  ]

Rules applied while aggregating:

  Components without a demo are dropped (docs-only components are not
  published). module-typed and unrecognized records are ignored. Each demo
  must contain exactly one index.html file. A component's overview sorts
  before its other docs.

Run 'docweave gen-config' to print a documented docweave.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Extracted records files, concatenated in argument order
    #[arg(long = "records", value_name = "FILE", default_value = "records.json", global = true)]
    records: Vec<PathBuf>,

    /// Stage configuration file
    #[arg(long, default_value = "docweave.toml", global = true)]
    config: PathBuf,

    /// Output manifest path
    #[arg(long, default_value = "manifest.json", global = true)]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Aggregate records into a render manifest
    Aggregate,
    /// Validate records and configuration without writing
    Check,
    /// Print a stock docweave.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Aggregate => {
            let config = config::load(&cli.config)?;
            let options = config.resolve()?;
            let records = read_records(&cli.records)?;
            let entries = aggregate::aggregate(records, &options)?;
            let json = serde_json::to_string_pretty(&entries)?;
            std::fs::write(&cli.manifest, json)?;
            output::print_aggregate_output(&entries);
            println!("Manifest written to {}", cli.manifest.display());
        }
        Command::Check => {
            let config = config::load(&cli.config)?;
            let options = config.resolve()?;
            let records = read_records(&cli.records)?;
            let entries = aggregate::aggregate(records, &options)?;
            output::print_aggregate_output(&entries);
            println!("==> Records are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Read and concatenate all record files in argument order.
fn read_records(paths: &[PathBuf]) -> Result<Vec<DocumentRecord>, Box<dyn std::error::Error>> {
    let mut records = Vec::new();
    for path in paths {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read records file {}: {e}", path.display()))?;
        let mut batch: Vec<DocumentRecord> = serde_json::from_str(&content)
            .map_err(|e| format!("invalid records file {}: {e}", path.display()))?;
        records.append(&mut batch);
    }
    Ok(records)
}
