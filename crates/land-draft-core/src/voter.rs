// Voter records: the ranked choices a voter submits and the per-run state
// the engine tracks for them.

use serde::{Deserialize, Serialize};

use crate::land::LandId;
use crate::result::Round;

/// A voter as submitted to the draft: a unique name and three ranked lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterEntry {
    pub name: String,
    pub choice1: LandId,
    pub choice2: LandId,
    pub choice3: LandId,
}

impl VoterEntry {
    pub fn new(name: impl Into<String>, choice1: LandId, choice2: LandId, choice3: LandId) -> Self {
        VoterEntry {
            name: name.into(),
            choice1,
            choice2,
            choice3,
        }
    }

    /// Choices in rank order.
    pub fn choices(&self) -> [LandId; 3] {
        [self.choice1, self.choice2, self.choice3]
    }

    /// The choice a voter plays in `round`. Round four has no ranked choice.
    pub fn choice_for(&self, round: Round) -> Option<LandId> {
        match round {
            Round::First => Some(self.choice1),
            Round::Second => Some(self.choice2),
            Round::Third => Some(self.choice3),
            Round::Fourth => None,
        }
    }
}

/// Mutable state for one voter during one run.
#[derive(Debug, Clone)]
pub(crate) struct VoterState {
    pub entry: VoterEntry,
    pub assigned_land: Option<LandId>,
    /// Set when the voter sat out a round because their choice for it was
    /// already gone; holds the round they were pushed to.
    pub deferred_until: Option<Round>,
}

impl VoterState {
    pub fn new(entry: VoterEntry) -> Self {
        VoterState {
            entry,
            assigned_land: None,
            deferred_until: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_land.is_some()
    }

    /// Assign `land`. A voter keeps their first assignment for the whole run.
    pub fn assign(&mut self, land: LandId) {
        debug_assert!(self.assigned_land.is_none(), "voter assigned twice");
        if self.assigned_land.is_none() {
            self.assigned_land = Some(land);
        }
    }

    pub fn snapshot(&self) -> VoterSnapshot {
        VoterSnapshot {
            name: self.entry.name.clone(),
            choice1: self.entry.choice1,
            choice2: self.entry.choice2,
            choice3: self.entry.choice3,
            assigned_land: self.assigned_land,
        }
    }
}

/// One row of a round snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterSnapshot {
    pub name: String,
    pub choice1: LandId,
    pub choice2: LandId,
    pub choice3: LandId,
    pub assigned_land: Option<LandId>,
}

impl VoterSnapshot {
    pub fn is_assigned(&self) -> bool {
        self.assigned_land.is_some()
    }
}
