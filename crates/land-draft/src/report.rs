// Report rendering: JSON and per-round text tables.

use chrono::{DateTime, Utc};
use land_draft_core::{DraftResult, DraftRun, Round, VoterSnapshot};
use serde::Serialize;

/// Per-round counts shown alongside the snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round: Round,
    /// Voters who got their land this round.
    pub newly_assigned: usize,
    /// Voters holding a land at the end of this round.
    pub assigned_total: usize,
    /// Voters who sat the round out.
    pub deferred: usize,
    /// Awards made to more than one claimant.
    pub contested: usize,
}

/// Everything a finished run hands to its consumer.
#[derive(Debug, Clone, Serialize)]
pub struct DraftReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub voter_count: usize,
    pub assigned_count: usize,
    pub summary: Vec<RoundSummary>,
    pub rounds: DraftResult,
}

impl DraftReport {
    pub fn new(run: &DraftRun, seed: Option<u64>) -> Self {
        let generated_at = Utc::now();
        let summary = Round::ALL
            .into_iter()
            .map(|round| {
                let audit = run.audit_for(round);
                RoundSummary {
                    round,
                    newly_assigned: run.result.newly_assigned(round).len(),
                    assigned_total: run
                        .result
                        .snapshot(round)
                        .iter()
                        .filter(|v| v.is_assigned())
                        .count(),
                    deferred: audit.map_or(0, |a| a.deferred.len()),
                    contested: audit
                        .map_or(0, |a| a.awards.iter().filter(|aw| aw.was_contested()).count()),
                }
            })
            .collect();

        DraftReport {
            run_id: generate_run_id(generated_at),
            generated_at,
            seed,
            voter_count: run.result.round4.len(),
            assigned_count: run.result.assigned_count(),
            summary,
            rounds: run.result.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// JSON for a single round's snapshot.
    pub fn round_to_json(&self, round: Round) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self.rounds.snapshot(round))
    }

    /// Text tables for every round, or only `only` when given.
    pub fn to_table(&self, only: Option<Round>) -> String {
        let mut out = format!(
            "Land draft {} ({} voters, {} assigned{})\n",
            self.run_id,
            self.voter_count,
            self.assigned_count,
            self.seed.map(|s| format!(", seed {s}")).unwrap_or_default()
        );

        for summary in &self.summary {
            if only.is_some_and(|r| r != summary.round) {
                continue;
            }
            out.push('\n');
            out.push_str(&format!(
                "{}: {} new, {} assigned, {} deferred, {} contested\n",
                summary.round,
                summary.newly_assigned,
                summary.assigned_total,
                summary.deferred,
                summary.contested
            ));
            out.push_str(&render_snapshot(self.rounds.snapshot(summary.round)));
        }
        out
    }
}

/// Run id from the generation time: `draft_YYYYMMDD_HHMMSS_mmm`.
pub fn generate_run_id(at: DateTime<Utc>) -> String {
    at.format("draft_%Y%m%d_%H%M%S_%3f").to_string()
}

fn render_snapshot(snapshot: &[VoterSnapshot]) -> String {
    let name_width = snapshot
        .iter()
        .map(|v| v.name.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut out = format!(
        "{:<name_width$} | Choices  | Land\n{}-|----------|-----\n",
        "Voter",
        "-".repeat(name_width)
    );
    for v in snapshot {
        let choices = format!("{},{},{}", v.choice1, v.choice2, v.choice3);
        let land = v
            .assigned_land
            .map_or_else(|| "-".to_string(), |l| l.to_string());
        out.push_str(&format!("{:<name_width$} | {:<8} | {}\n", v.name, choices, land));
    }
    out
}
