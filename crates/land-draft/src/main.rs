// Land draft entry point.
//
// Startup sequence:
// 1. Parse command line
// 2. Initialize tracing (log to file; stdout carries the report)
// 3. Load config, copying defaults on first run
// 4. Load and validate voters
// 5. Run the draft and write the report

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use land_draft::app::{self, RunOptions};
use land_draft::config::OutputFormat;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "land-draft", version, about = "Assign 32 lands to voters over a four-round draft")]
struct Cli {
    /// Directory holding config/, defaults/ and data/ (default: current directory)
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the draft over the configured voter list
    Run(RunArgs),
    /// Create config/draft.toml from defaults/ without running a draft
    Init,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Voter CSV (name,choice1,choice2,choice3); overrides data_paths.voters
    #[arg(long)]
    voters: Option<PathBuf>,

    /// Seed for a reproducible draw; overrides draft.seed
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum number of voters; overrides draft.min_voters
    #[arg(long)]
    min_voters: Option<usize>,

    /// Output JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Only show this round (1-4)
    #[arg(long)]
    round: Option<u8>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    init_tracing(&base_dir)?;
    info!("Land draft starting in {}", base_dir.display());

    let result = match cli.command {
        Commands::Init => app::init(&base_dir).map(|copied| {
            if copied.is_empty() {
                println!("Config already present in {}", base_dir.join("config").display());
            }
            for path in copied {
                println!("Created {}", path.display());
            }
        }),
        Commands::Run(args) => {
            let opts = RunOptions {
                voters: args.voters,
                seed: args.seed,
                min_voters: args.min_voters,
                format: args.json.then_some(OutputFormat::Json),
                round: args.round,
            };
            app::run(&base_dir, &opts).and_then(|output| app::write_output(&output))
        }
    };

    if let Err(e) = &result {
        error!("Land draft failed: {:#}", e);
    }
    result
}

/// Initialize tracing to log to a file (stdout is reserved for the report).
fn init_tracing(base_dir: &std::path::Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("land-draft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("land_draft=info,land_draft_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
