// The four-round land draft.
//
// Round 1-3: voters still without a land claim their choice for the round.
// Uncontested claims win outright; contested lands go to one claimant drawn
// uniformly at random. In rounds 2 and 3 a voter whose choice for the round
// was taken in an earlier round sits the round out.
// Round 4: whoever is left is shuffled and dealt the shuffled leftover lands.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::land::{LandId, LandPool};
use crate::result::{Award, DraftResult, DraftRun, Round, RoundAudit};
use crate::voter::{VoterEntry, VoterState};

/// Run the draft and return the four round snapshots.
///
/// With `Some(seed)` the run is fully reproducible. With `None` the random
/// source is seeded from the operating system.
///
/// Voters are assumed valid (choices in range and distinct, names unique);
/// see [`crate::registry::VoterRegistry`] for the checks.
pub fn run_draft(voters: &[VoterEntry], seed: Option<u64>) -> DraftResult {
    run_draft_audited(voters, seed).result
}

/// Like [`run_draft`], but also returns what happened in each round.
pub fn run_draft_audited(voters: &[VoterEntry], seed: Option<u64>) -> DraftRun {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    run_draft_with_rng(voters, &mut rng)
}

/// Run the draft drawing every random choice from `rng`.
pub fn run_draft_with_rng<R: Rng>(voters: &[VoterEntry], rng: &mut R) -> DraftRun {
    info!("Starting land draft with {} voters", voters.len());

    let mut draft = Draft::new(voters);
    for round in Round::ALL {
        draft.play(round, rng);
    }

    info!(
        "Land draft finished: {} of {} voters assigned, {} lands unclaimed",
        draft.assigned_count(),
        draft.voters.len(),
        draft.pool.len()
    );
    draft.finish()
}

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

/// Everything one run mutates. Voters are indexed by input position.
struct Draft {
    voters: Vec<VoterState>,
    pool: LandPool,
    result: DraftResult,
    audit: Vec<RoundAudit>,
}

impl Draft {
    fn new(voters: &[VoterEntry]) -> Self {
        Draft {
            voters: voters.iter().cloned().map(VoterState::new).collect(),
            pool: LandPool::full(),
            result: DraftResult::default(),
            audit: Vec::with_capacity(Round::ALL.len()),
        }
    }

    fn play<R: Rng>(&mut self, round: Round, rng: &mut R) {
        let audit = match round {
            Round::Fourth => self.deal_leftovers(rng),
            ranked => self.claim_choices(ranked, rng),
        };

        info!(
            "{}: {} lands awarded ({} contested), {} voters deferred, {} lands left",
            round,
            audit.awards.len(),
            audit.awards.iter().filter(|a| a.was_contested()).count(),
            audit.deferred.len(),
            self.pool.len()
        );

        *self.result.snapshot_mut(round) = self.voters.iter().map(VoterState::snapshot).collect();
        self.audit.push(audit);
    }

    /// Rounds 1-3: every unassigned voter claims their choice for `round`.
    fn claim_choices<R: Rng>(&mut self, round: Round, rng: &mut R) -> RoundAudit {
        let mut audit = RoundAudit::new(round);

        // Deferral is decided against the pool as it stood when the round
        // began; nothing is taken until every claim is in.
        let mut claims: BTreeMap<LandId, Vec<usize>> = BTreeMap::new();
        for (idx, voter) in self.voters.iter_mut().enumerate() {
            if voter.is_assigned() {
                continue;
            }
            let Some(choice) = voter.entry.choice_for(round) else {
                continue;
            };
            if !self.pool.contains(choice) {
                voter.deferred_until = round.next();
                debug!(
                    "{}: '{}' deferred, land {} already taken",
                    round, voter.entry.name, choice
                );
                audit.deferred.push(voter.entry.name.clone());
                continue;
            }
            claims.entry(choice).or_default().push(idx);
        }

        for (land, contenders) in claims {
            if !self.pool.contains(land) {
                continue;
            }
            let winner = match contenders.as_slice() {
                [only] => *only,
                many => many[rng.random_range(0..many.len())],
            };
            audit.awards.push(self.award(land, winner, &contenders));
            if contenders.len() > 1 {
                debug!(
                    "{}: land {} contested by {} voters, won by '{}'",
                    round,
                    land,
                    contenders.len(),
                    self.voters[winner].entry.name
                );
            }
        }

        audit
    }

    /// Round 4: shuffle the remaining voters and the remaining lands and pair
    /// them off.
    fn deal_leftovers<R: Rng>(&mut self, rng: &mut R) -> RoundAudit {
        let mut audit = RoundAudit::new(Round::Fourth);

        let mut waiting: Vec<usize> = self
            .voters
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_assigned())
            .map(|(idx, _)| idx)
            .collect();
        waiting.shuffle(rng);

        let mut lands = self.pool.remaining();
        lands.shuffle(rng);

        for (&idx, &land) in waiting.iter().zip(lands.iter()) {
            debug!(
                "{}: dealing land {} to '{}' (deferred until {:?})",
                Round::Fourth,
                land,
                self.voters[idx].entry.name,
                self.voters[idx].deferred_until.map(Round::number)
            );
            audit.awards.push(self.award(land, idx, &[idx]));
        }

        if waiting.len() > lands.len() {
            warn!(
                "{} voters left without a land: only {} lands remained",
                waiting.len() - lands.len(),
                lands.len()
            );
        }

        audit
    }

    fn award(&mut self, land: LandId, winner: usize, contenders: &[usize]) -> Award {
        self.pool.take(land);
        self.voters[winner].assign(land);
        Award {
            land,
            contenders: contenders
                .iter()
                .map(|&idx| self.voters[idx].entry.name.clone())
                .collect(),
            winner: self.voters[winner].entry.name.clone(),
        }
    }

    fn assigned_count(&self) -> usize {
        self.voters.iter().filter(|v| v.is_assigned()).count()
    }

    fn finish(self) -> DraftRun {
        DraftRun {
            result: self.result,
            audit: self.audit,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
