use std::fs;

use anyhow::Context;
use clap::Parser;

use schema_shaper::config::{self, Config};
use schema_shaper::schema::{load_snapshot, to_yaml};
use schema_shaper::utils::logging::init_logging;
use schema_shaper::SchemaShaper;

/// Customize an introspected schema snapshot for code generation
#[derive(Debug, Parser)]
#[command(name = "schema_shaper", version, about)]
struct Args {
    /// Schema snapshot produced by an introspection driver (JSON or YAML)
    #[arg(short, long)]
    schema: String,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Where to write the customized model; stdout when omitted
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::load_from_file(path)?,
        None => Config::default(),
    };
    init_logging(&config.logging)?;

    let shaper = SchemaShaper::new(config)?;
    let snapshot = load_snapshot(&args.schema)?;

    let Some(model) = shaper.customize(snapshot)? else {
        return Ok(());
    };

    let yaml = to_yaml(&model)?;
    match &args.output {
        Some(path) => {
            fs::write(path, yaml).with_context(|| format!("writing {}", path))?;
            tracing::info!(path = %path, "Customized model written");
        }
        None => print!("{}", yaml),
    }

    Ok(())
}
