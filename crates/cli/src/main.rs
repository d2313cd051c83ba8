mod manifest;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use optspec::{ParseResult, UnknownOptions};
use serde_json::{Map, Value, json};
use std::{fs, path::PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

use crate::manifest::{load_manifest, write_default_manifest};

/// Exit status for an argument vector that does not satisfy the manifest.
const EXIT_PARSE_ERRORS: i32 = 2;

#[derive(Parser)]
#[command(name = "optspec")]
#[command(version, about = "Declarative command-line option parsing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an example optspec.json
    Init(InitArgs),

    /// Validate a manifest and list its options
    Check(CheckArgs),

    /// Parse arguments against a manifest and print the values as JSON
    Parse(ParseArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Overwrite an existing manifest
    #[arg(long)]
    force: bool,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to optspec.json manifest
    #[arg(short, long, default_value = "optspec.json", value_name = "FILE")]
    manifest: PathBuf,
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to optspec.json manifest
    #[arg(short, long, default_value = "optspec.json", value_name = "FILE")]
    manifest: PathBuf,

    /// Report unknown options instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Option prefix character (overrides manifest)
    #[arg(long, value_name = "CHAR")]
    prefix: Option<char>,

    /// Arguments to parse
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Check(args) => check(args),
        Commands::Parse(args) => parse(args),
    }
}

fn init(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let manifest_path = write_default_manifest(&dir, args.force)?;

    eprintln!("Created: {}", manifest_path.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Edit optspec.json to declare your options");
    eprintln!("  2. Run: optspec check");
    eprintln!("  3. Run: optspec parse -- -size hello -verbose");

    Ok(())
}

fn check(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let manifest = load_manifest(&args.manifest)?;
    let parser = manifest
        .to_parser()
        .with_context(|| format!("invalid manifest: {}", args.manifest.display()))?;
    let prefix = parser.configuration().option_prefix;

    for (entry, option) in manifest.options.iter().zip(parser.registry().options()) {
        let names: Vec<String> = option.all_names().map(|n| format!("{prefix}{n}")).collect();
        let mut line = format!(
            "{}  [{}] values: {}",
            names.join(", "),
            entry.transform.as_str(),
            option.value_range()
        );
        if option.is_required() {
            line.push_str(", required");
        }
        let deps: Vec<&str> = option.dependencies().collect();
        if !deps.is_empty() {
            line.push_str(&format!(", depends on: {}", deps.join(", ")));
        }
        println!("{line}");
        println!("    {}", option.description());
    }

    eprintln!(
        "OK: {} option(s) in {}",
        parser.registry().len(),
        args.manifest.display()
    );

    Ok(())
}

fn parse(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let mut manifest = load_manifest(&args.manifest)?;
    if let Some(prefix) = args.prefix {
        manifest.configuration.option_prefix = prefix;
    }
    if args.strict {
        manifest.configuration.unknown_options = UnknownOptions::Report;
    }
    let parser = manifest
        .to_parser()
        .with_context(|| format!("invalid manifest: {}", args.manifest.display()))?;

    match parser.parse(&args.args) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&render(&result))?);
            Ok(())
        }
        Err(errors) => {
            for err in &errors {
                eprintln!("error: {err}");
            }
            std::process::exit(EXIT_PARSE_ERRORS);
        }
    }
}

fn render(result: &ParseResult) -> Value {
    let values: Map<String, Value> = result
        .names()
        .map(|name| {
            let values = result.values::<Value>(name).into_iter().cloned().collect();
            (name.to_string(), Value::Array(values))
        })
        .collect();
    json!({
        "values": values,
        "leftovers": result.leftovers(),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
