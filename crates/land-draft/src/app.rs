// Application flow: config + voter file in, rendered draft report out.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use land_draft_core::Round;
use tracing::info;

use crate::config::{self, Config, OutputFormat};
use crate::report::DraftReport;
use crate::voters;

/// Command-line overrides for a single run. `None` falls back to config.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub voters: Option<PathBuf>,
    pub seed: Option<u64>,
    pub min_voters: Option<usize>,
    pub format: Option<OutputFormat>,
    /// Only render this round (1-4).
    pub round: Option<u8>,
}

/// A finished run, rendered and ready to be written.
#[derive(Debug, Clone)]
pub struct DraftOutput {
    pub report: DraftReport,
    pub rendered: String,
    /// File to write to; stdout when `None`.
    pub destination: Option<PathBuf>,
}

/// Copy default config files into `base_dir/config`.
pub fn init(base_dir: &Path) -> Result<Vec<PathBuf>> {
    let copied =
        config::ensure_config_files(base_dir).context("failed to initialize configuration")?;
    for path in &copied {
        info!("Created {}", path.display());
    }
    Ok(copied)
}

/// Load config and voters from `base_dir`, run the draft and render it.
pub fn run(base_dir: &Path, opts: &RunOptions) -> Result<DraftOutput> {
    let config = config::load_config_in(base_dir).context("failed to load configuration")?;
    info!(
        "Config loaded: min {} voters, seed {:?}, voters file {}",
        config.draft.min_voters, config.draft.seed, config.data_paths.voters
    );
    run_with_config(base_dir, &config, opts)
}

/// Like [`run`], with an already loaded config. Relative paths resolve
/// against `base_dir`.
pub fn run_with_config(base_dir: &Path, config: &Config, opts: &RunOptions) -> Result<DraftOutput> {
    let round = opts.round.map(Round::from_number).transpose()?;

    let voters_path = opts
        .voters
        .clone()
        .unwrap_or_else(|| base_dir.join(&config.data_paths.voters));
    let registry = voters::load_registry(&voters_path)
        .with_context(|| format!("failed to load voters from {}", voters_path.display()))?;

    let seed = opts.seed.or(config.draft.seed);
    let min_voters = opts.min_voters.unwrap_or(config.draft.min_voters);
    let run = registry.run(min_voters, seed)?;

    let report = DraftReport::new(&run, seed);
    info!(
        "Draft {} complete: {} of {} voters assigned",
        report.run_id, report.assigned_count, report.voter_count
    );

    let format = opts.format.unwrap_or(config.output.format);
    let rendered = match (format, round) {
        (OutputFormat::Json, Some(round)) => report.round_to_json(round)?,
        (OutputFormat::Json, None) => report.to_json()?,
        (OutputFormat::Table, only) => report.to_table(only),
    };

    Ok(DraftOutput {
        report,
        rendered,
        destination: config.output.path.as_ref().map(|p| base_dir.join(p)),
    })
}

/// Write the rendered report to its destination file, or stdout.
pub fn write_output(output: &DraftOutput) -> Result<()> {
    match &output.destination {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &output.rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", output.rendered),
    }
    Ok(())
}
