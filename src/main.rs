use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use juicy_shmup::common::tunables::Tunables;
use juicy_shmup::game::{self, Launch, DEFAULT_LOG_FILTER};

#[derive(Parser, Debug)]
#[command(name = "juicy-shmup", version, about = "Vertically scrolling arcade shooter")]
struct Cli {
    /// JSON file overriding any subset of the stock tunables.
    #[arg(long, value_name = "PATH")]
    tunables: Option<PathBuf>,

    /// Seed for spawn positions and camera shake.
    #[arg(long)]
    seed: Option<u64>,

    /// Log directives, e.g. `juicy_shmup=trace`.
    #[arg(long, value_name = "FILTER", default_value = DEFAULT_LOG_FILTER)]
    log: String,

    /// Print the effective tunables as JSON and exit.
    #[arg(long)]
    print_tunables: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut tunables = match cli.tunables.as_deref().map(Tunables::load).transpose() {
        Ok(loaded) => loaded.unwrap_or_default(),
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(seed) = cli.seed {
        tunables.seed = seed;
    }

    if cli.print_tunables {
        return match tunables.to_json_pretty() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        };
    }

    game::run(Launch { tunables, log_filter: cli.log });
    ExitCode::SUCCESS
}
