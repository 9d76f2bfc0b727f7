use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lineup_registry::{
    ContentRegistry, ContentSource, DuplicatePolicy, RegistryConfig, Result, WarningGate,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Conference lineup content checker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args)]
struct Inputs {
    /// Manifest (lineup.toml) listing the sources.
    #[arg(long, conflicts_with = "source", required_unless_present = "source")]
    config: Option<PathBuf>,

    /// Source batch (.json or .toml); may be repeated, merged in order.
    #[arg(long)]
    source: Vec<PathBuf>,

    /// Override the manifest's duplicate policy.
    #[arg(long, value_enum)]
    policy: Option<DuplicatePolicy>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the registry, resolve the schedule and report warnings.
    Check {
        #[command(flatten)]
        inputs: Inputs,

        /// Exit non-zero if any warning is reported.
        #[arg(long)]
        deny_warnings: bool,
    },
    /// Print the resolved talk order.
    Schedule {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Write the validated registry as JSON for the rendering layer.
    Export {
        #[command(flatten)]
        inputs: Inputs,

        #[arg(short = 'o', long)]
        out: PathBuf,
    },
}

/// Registry plus the manifest's `deny_warnings` flag.
fn build(inputs: &Inputs) -> Result<(ContentRegistry, bool)> {
    // 1) Sources and policy, from the manifest or the command line.
    let (sources, policy, deny_warnings) = match &inputs.config {
        Some(path) => {
            let config = RegistryConfig::load(path)?;
            (config.sources, config.duplicate_policy, config.deny_warnings)
        }
        None => (inputs.source.clone(), DuplicatePolicy::default(), false),
    };
    let policy = inputs.policy.unwrap_or(policy);

    // 2) Read + merge batches, then schema-check every record.
    let source = ContentSource::read_all(sources.as_slice(), policy)?;
    let registry = ContentRegistry::from_source(&source).context("build content registry")?;
    Ok((registry, deny_warnings))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Check {
            inputs,
            deny_warnings,
        } => {
            let (registry, manifest_deny) = build(&inputs)?;

            // 3) Resolve the schedule and collect warnings.
            let report = lineup_registry::check(&registry)?;
            for w in &report.warnings {
                println!("warning: {}", w);
            }
            println!(
                "{} organizers, {} speakers, {} talks, {} warnings",
                report.organizers,
                report.speakers,
                report.talks,
                report.warnings.len()
            );

            // 4) Gate on warnings.
            report.verdict(WarningGate {
                cli: deny_warnings,
                manifest: manifest_deny,
            })?;
        }
        Commands::Schedule { inputs } => {
            let (registry, _) = build(&inputs)?;
            for (i, speaker) in registry.resolve_schedule()?.iter().enumerate() {
                let title = speaker
                    .title
                    .given()
                    .map(String::as_str)
                    .unwrap_or("(title coming soon)");
                let link = speaker.linkedin.url().unwrap_or("-");
                println!(
                    "{:>2}. {:<22} {}  {}  {}",
                    i + 1,
                    speaker.slug,
                    speaker.name,
                    title,
                    link
                );
            }
        }
        Commands::Export { inputs, out } => {
            let (registry, _) = build(&inputs)?;
            let json = serde_json::to_string_pretty(&registry.export()?)?;
            std::fs::write(&out, json).with_context(|| format!("write {}", out.display()))?;
            info!(out = %out.display(), "registry exported");
        }
    }

    Ok(())
}
