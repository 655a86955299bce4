// Voter registration: the checks a voter must pass before the draft will
// accept them, and the minimum-turnout rule for starting a draft.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::engine::run_draft_audited;
use crate::error::{DraftError, ValidationError};
use crate::land::is_valid_land;
use crate::result::DraftRun;
use crate::voter::VoterEntry;

/// Smallest number of registered voters a draft is normally run with.
pub const DEFAULT_MIN_VOTERS: usize = 10;

/// Check a single voter record on its own: non-blank name, every choice a
/// real land, no land listed twice.
pub fn validate_entry(entry: &VoterEntry) -> Result<(), ValidationError> {
    if entry.name.trim().is_empty() {
        return Err(ValidationError::BlankName);
    }

    let fields = [
        ("choice1", entry.choice1),
        ("choice2", entry.choice2),
        ("choice3", entry.choice3),
    ];
    for (field, value) in fields {
        if !is_valid_land(value) {
            return Err(ValidationError::ChoiceOutOfRange {
                voter: entry.name.clone(),
                field,
                value,
            });
        }
    }

    for (i, (field, value)) in fields.iter().enumerate() {
        if fields[..i].iter().any(|(_, earlier)| earlier == value) {
            return Err(ValidationError::DuplicateChoice {
                voter: entry.name.clone(),
                field: *field,
                value: *value,
            });
        }
    }

    Ok(())
}

/// Refuse to draft with fewer than `min_voters` voters.
pub fn ensure_population(actual: usize, min_voters: usize) -> Result<(), DraftError> {
    if actual < min_voters {
        return Err(DraftError::InsufficientVoters {
            required: min_voters,
            actual,
        });
    }
    Ok(())
}

/// Voters accepted for a draft, in registration order.
#[derive(Debug, Clone, Default)]
pub struct VoterRegistry {
    voters: Vec<VoterEntry>,
    names: HashSet<String>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every entry in order, stopping at the first rejection.
    pub fn from_entries(
        entries: impl IntoIterator<Item = VoterEntry>,
    ) -> Result<Self, ValidationError> {
        let mut registry = Self::new();
        for entry in entries {
            registry.register(entry)?;
        }
        Ok(registry)
    }

    /// Validate and add a voter. Names are unique across the registry.
    pub fn register(&mut self, entry: VoterEntry) -> Result<(), ValidationError> {
        validate_entry(&entry)?;
        if self.names.contains(&entry.name) {
            return Err(ValidationError::DuplicateVoter { name: entry.name });
        }
        debug!(
            "Registered voter '{}' ({}, {}, {})",
            entry.name, entry.choice1, entry.choice2, entry.choice3
        );
        self.names.insert(entry.name.clone());
        self.voters.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn voters(&self) -> &[VoterEntry] {
        &self.voters
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.voters.iter().map(|v| v.name.as_str())
    }

    /// Run the draft over the registered voters once at least `min_voters`
    /// have registered.
    pub fn run(&self, min_voters: usize, seed: Option<u64>) -> Result<DraftRun, DraftError> {
        ensure_population(self.len(), min_voters)?;
        info!(
            "Running draft for {} registered voters (seed: {})",
            self.len(),
            seed.map_or_else(|| "none".to_string(), |s| s.to_string())
        );
        Ok(run_draft_audited(&self.voters, seed))
    }
}
