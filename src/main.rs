mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use version_bridge::config::BridgeConfig;
use version_bridge::version::{
    DependencyResolver, SourceError, Version, VersionSource, convert_range,
};

#[derive(Parser)]
#[command(name = "version-bridge")]
#[command(version, about = "Translate npm version specifiers into Maven version ranges")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results and logs as JSON
    #[arg(long, global = true)]
    json: bool,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an npm specifier into a Maven range expression
    Convert { specifier: String },

    /// Select the latest version satisfying a range
    Select {
        /// Maven range expression, or an npm specifier with --npm
        #[arg(long)]
        range: String,

        /// Interpret --range as an npm specifier
        #[arg(long)]
        npm: bool,

        /// Candidate versions
        versions: Vec<String>,
    },

    /// Parse a single version
    Parse { version: String },
}

/// Candidate versions given on the command line
struct ArgumentSource(Vec<String>);

impl VersionSource for ArgumentSource {
    fn published_versions(&self, _package_name: &str) -> Result<Vec<String>, SourceError> {
        Ok(self.0.clone())
    }
}

const PACKAGE: &str = "<arguments>";

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json);

    let config = match &cli.config {
        Some(path) => BridgeConfig::from_path(path)?,
        None => BridgeConfig::default(),
    };

    match cli.command {
        Command::Convert { specifier } => {
            let range = convert_range(&specifier)?;
            if cli.json {
                println!("{}", json!({ "specifier": specifier, "range": range }));
            } else {
                println!("{range}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Select {
            range,
            npm,
            versions,
        } => {
            let resolver = DependencyResolver::new(ArgumentSource(versions), &config);
            let selected = if npm {
                resolver.resolve(PACKAGE, &range)?
            } else {
                resolver.resolve_maven(PACKAGE, &range)?
            };

            if cli.json {
                println!("{}", json!({ "range": range, "selected": selected }));
            } else if let Some(version) = &selected {
                println!("{version}");
            }
            Ok(if selected.is_some() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Parse { version } => {
            let parsed = Version::parse(&version)?;
            if cli.json {
                println!("{}", serde_json::to_string(&parsed)?);
            } else {
                println!("{parsed}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
