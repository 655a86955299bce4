// Round identifiers, per-round snapshots and the audit trail of a draft run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::land::LandId;
use crate::voter::VoterSnapshot;

/// One of the four allocation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "round1")]
    First,
    #[serde(rename = "round2")]
    Second,
    #[serde(rename = "round3")]
    Third,
    #[serde(rename = "round4")]
    Fourth,
}

impl Round {
    pub const ALL: [Round; 4] = [Round::First, Round::Second, Round::Third, Round::Fourth];

    /// 1-based round number.
    pub fn number(self) -> u8 {
        match self {
            Round::First => 1,
            Round::Second => 2,
            Round::Third => 3,
            Round::Fourth => 4,
        }
    }

    pub fn from_number(n: u8) -> Result<Round, DraftError> {
        match n {
            1 => Ok(Round::First),
            2 => Ok(Round::Second),
            3 => Ok(Round::Third),
            4 => Ok(Round::Fourth),
            other => Err(DraftError::InvalidRound(other)),
        }
    }

    pub fn next(self) -> Option<Round> {
        match self {
            Round::First => Some(Round::Second),
            Round::Second => Some(Round::Third),
            Round::Third => Some(Round::Fourth),
            Round::Fourth => None,
        }
    }

    pub fn previous(self) -> Option<Round> {
        match self {
            Round::First => None,
            Round::Second => Some(Round::First),
            Round::Third => Some(Round::Second),
            Round::Fourth => Some(Round::Third),
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round{}", self.number())
    }
}

impl TryFrom<u8> for Round {
    type Error = DraftError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Round::from_number(n)
    }
}

/// The cumulative state of every voter at the end of each round, in input
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DraftResult {
    pub round1: Vec<VoterSnapshot>,
    pub round2: Vec<VoterSnapshot>,
    pub round3: Vec<VoterSnapshot>,
    pub round4: Vec<VoterSnapshot>,
}

impl DraftResult {
    pub fn snapshot(&self, round: Round) -> &[VoterSnapshot] {
        match round {
            Round::First => &self.round1,
            Round::Second => &self.round2,
            Round::Third => &self.round3,
            Round::Fourth => &self.round4,
        }
    }

    pub(crate) fn snapshot_mut(&mut self, round: Round) -> &mut Vec<VoterSnapshot> {
        match round {
            Round::First => &mut self.round1,
            Round::Second => &mut self.round2,
            Round::Third => &mut self.round3,
            Round::Fourth => &mut self.round4,
        }
    }

    /// Look up a snapshot by 1-based round number.
    pub fn round(&self, n: u8) -> Result<&[VoterSnapshot], DraftError> {
        Round::from_number(n).map(|round| self.snapshot(round))
    }

    pub fn rounds(&self) -> impl Iterator<Item = (Round, &[VoterSnapshot])> {
        Round::ALL.into_iter().map(move |round| (round, self.snapshot(round)))
    }

    pub fn final_round(&self) -> &[VoterSnapshot] {
        &self.round4
    }

    /// Number of voters holding a land after round four.
    pub fn assigned_count(&self) -> usize {
        self.round4.iter().filter(|v| v.is_assigned()).count()
    }

    /// Voters left without a land after round four.
    pub fn unassigned(&self) -> Vec<&VoterSnapshot> {
        self.round4.iter().filter(|v| !v.is_assigned()).collect()
    }

    /// Final land of the voter called `name`, if they got one.
    pub fn assignment_of(&self, name: &str) -> Option<LandId> {
        self.round4
            .iter()
            .find(|v| v.name == name)
            .and_then(|v| v.assigned_land)
    }

    /// Voters who received their land during `round`.
    pub fn newly_assigned(&self, round: Round) -> Vec<&VoterSnapshot> {
        let current = self.snapshot(round);
        match round.previous() {
            None => current.iter().filter(|v| v.is_assigned()).collect(),
            Some(prev) => current
                .iter()
                .zip(self.snapshot(prev))
                .filter(|(now, before)| now.is_assigned() && !before.is_assigned())
                .map(|(now, _)| now)
                .collect(),
        }
    }
}

/// A land handed out during a round, together with everyone who wanted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub land: LandId,
    pub contenders: Vec<String>,
    pub winner: String,
}

impl Award {
    pub fn was_contested(&self) -> bool {
        self.contenders.len() > 1
    }
}

/// What happened in one round: the awards made and the voters who sat it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundAudit {
    pub round: Round,
    pub awards: Vec<Award>,
    /// Voters skipped this round because their choice for it was already
    /// taken.
    pub deferred: Vec<String>,
}

impl RoundAudit {
    pub fn new(round: Round) -> Self {
        RoundAudit {
            round,
            awards: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Whether `name` claimed any land in this round.
    pub fn is_contender(&self, name: &str) -> bool {
        self.awards
            .iter()
            .any(|a| a.contenders.iter().any(|c| c == name))
    }
}

/// A finished run: the four snapshots plus the per-round audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRun {
    pub result: DraftResult,
    pub audit: Vec<RoundAudit>,
}

impl DraftRun {
    pub fn audit_for(&self, round: Round) -> Option<&RoundAudit> {
        self.audit.iter().find(|a| a.round == round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(name: &str, land: Option<LandId>) -> VoterSnapshot {
        VoterSnapshot {
            name: name.into(),
            choice1: 1,
            choice2: 2,
            choice3: 3,
            assigned_land: land,
        }
    }

    fn sample() -> DraftResult {
        DraftResult {
            round1: vec![snap("a", Some(1)), snap("b", None), snap("c", None)],
            round2: vec![snap("a", Some(1)), snap("b", Some(2)), snap("c", None)],
            round3: vec![snap("a", Some(1)), snap("b", Some(2)), snap("c", None)],
            round4: vec![snap("a", Some(1)), snap("b", Some(2)), snap("c", None)],
        }
    }

    #[test]
    fn round_numbers_round_trip() {
        for round in Round::ALL {
            assert_eq!(Round::from_number(round.number()).unwrap(), round);
        }
        assert_eq!(Round::First.to_string(), "round1");
        assert_eq!(Round::Fourth.next(), None);
        assert_eq!(Round::First.previous(), None);
    }

    #[test]
    fn round_lookup_rejects_out_of_range() {
        let result = sample();
        assert_eq!(result.round(2).unwrap().len(), 3);
        assert_eq!(result.round(0).unwrap_err(), DraftError::InvalidRound(0));
        assert_eq!(result.round(5).unwrap_err(), DraftError::InvalidRound(5));
    }

    #[test]
    fn summaries_read_final_round() {
        let result = sample();
        assert_eq!(result.assigned_count(), 2);
        assert_eq!(result.assignment_of("b"), Some(2));
        assert_eq!(result.assignment_of("c"), None);
        assert_eq!(result.assignment_of("nobody"), None);
        let left: Vec<&str> = result.unassigned().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(left, vec!["c"]);
    }

    #[test]
    fn newly_assigned_is_per_round_delta() {
        let result = sample();
        let names = |round| -> Vec<String> {
            result
                .newly_assigned(round)
                .iter()
                .map(|v| v.name.clone())
                .collect()
        };
        assert_eq!(names(Round::First), vec!["a"]);
        assert_eq!(names(Round::Second), vec!["b"]);
        assert!(names(Round::Third).is_empty());
        assert!(names(Round::Fourth).is_empty());
    }

    #[test]
    fn result_serializes_with_round_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("round1").is_some());
        assert!(json.get("round4").is_some());
        assert_eq!(json["round2"][1]["assigned_land"], 2);
        assert_eq!(serde_json::to_value(Round::Third).unwrap(), "round3");
    }
}
