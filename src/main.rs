use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_dotenv::dotenv::DotEnv;
use tracing_subscriber::EnvFilter;

mod config;
mod core;
mod error;
mod fixture;
mod scaffold;
mod seed;
mod status;

use config::{DbCfg, connect};
use seed::{SeedMode, print_summary};

#[derive(Parser, Debug)]
#[command(version, about = "Reset the magic-stream-movies collections from JSON fixtures")]
pub struct Cli {
	/// Increase output
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Create a fixture directory with empty fixture files
	Init {
		#[arg(long)]
		dir: Option<PathBuf>,
	},
	/// Replace movies, genres, users and rankings with the fixture contents
	Seed {
		/// Fixture directory (defaults to SEED_DATA_DIR, then /seed-data)
		#[arg(long)]
		dir: Option<PathBuf>,

		/// Do nothing if any target collection already holds documents
		#[arg(long)]
		skip_if_populated: bool,

		/// Print the outcome as JSON
		#[arg(long)]
		json: bool,
	},
	/// Show document counts of the seeded collections
	Status,
}

fn load_env() -> DotEnv {
	// Load .env in CWD if present, ignore missing
	DotEnv::new("")
}

fn init_tracing(verbose: bool) {
	let default = if verbose { "debug" } else { "info" };
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
		)
		.with_writer(std::io::stderr)
		.init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Cli::parse();
	init_tracing(args.verbose);
	let env = load_env();
	let cfg = DbCfg::from_env(&env);

	match args.command {
		Commands::Init { dir } => {
			let cfg = cfg.with_fixture_dir(dir);
			scaffold::scaffold(cfg.fixture_dir())?;
		}
		Commands::Seed {
			dir,
			skip_if_populated,
			json,
		} => {
			let cfg = cfg.with_fixture_dir(dir);
			let mode = if skip_if_populated {
				SeedMode::SkipIfPopulated
			} else {
				SeedMode::Overwrite
			};

			let db = connect(&cfg).await?;
			let outcome = seed::run(&db, &cfg.target(), cfg.fixture_dir(), mode).await;
			// Release the connection before reporting, whichever way the run went.
			drop(db);
			if let Err(err) = &outcome {
				if let Some(dataset) = err.dataset() {
					tracing::error!(collection = dataset.collection(), "seed stopped");
				}
			}
			let outcome = outcome.context("seed aborted")?;

			if json {
				println!("{}", serde_json::to_string_pretty(&outcome)?);
			} else {
				print_summary(&outcome);
			}
		}
		Commands::Status => {
			let db = connect(&cfg).await?;
			status::status(&db).await?;
		}
	}

	Ok(())
}
