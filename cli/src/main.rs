use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sapper_records::{Difficulty, RecordStore, ScoreRecord, ScoreTable, Scoreboard};

/// Inspect and maintain the sapper records file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Records file instead of the one next to the executable
    #[arg(short, long, global = true)]
    records: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the best times, for every difficulty or just one
    Scores { difficulty: Option<Difficulty> },
    /// Forget every entry of one difficulty
    Reset { difficulty: Difficulty },
    /// Print the decrypted records as JSON
    Export,
    /// Replace the records with a JSON file
    Import { file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let store = args
        .records
        .map(RecordStore::new)
        .unwrap_or_else(RecordStore::beside_executable);
    log::debug!("records file: {}", store.path().display());

    match args.command {
        Command::Scores { difficulty } => {
            let scoreboard = Scoreboard::new(store.load());
            let difficulties = match difficulty {
                Some(difficulty) => vec![difficulty],
                None => Difficulty::ALL.to_vec(),
            };
            for difficulty in difficulties {
                print!("{}", format_table(difficulty, scoreboard.table(difficulty)));
            }
        }
        Command::Reset { difficulty } => {
            let mut scoreboard = Scoreboard::new(store.load());
            scoreboard.reset_difficulty(difficulty);
            store.save(&scoreboard.into_record())?;
            log::info!("Cleared {difficulty} scores");
        }
        Command::Export => {
            let record = store
                .try_load()
                .with_context(|| format!("reading {}", store.path().display()))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let record: ScoreRecord = serde_json::from_str(&json)?;
            if !record.is_well_ordered() {
                bail!("{} has tables that are not sorted by time", file.display());
            }
            store.save(&record)?;
            log::info!("Imported records from {}", file.display());
        }
    }

    Ok(())
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    tracing_subscriber::fmt()
        .with_max_level(verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();
}

fn format_table(difficulty: Difficulty, table: &ScoreTable) -> String {
    let mut out = format!("{difficulty}\n");
    for (rank, entry) in table.iter().enumerate() {
        let _ = writeln!(out, "#{:<3} {:<10} {:>5}", rank + 1, entry.player, entry.time);
    }
    out
}
