// Land draft core: assigns 32 lands to voters from their three ranked
// choices over four rounds, with random tie-breaks.

pub mod engine;
pub mod error;
pub mod land;
pub mod registry;
pub mod result;
pub mod voter;

pub use engine::{run_draft, run_draft_audited, run_draft_with_rng};
pub use error::{DraftError, ValidationError};
pub use land::{LandId, LandPool, LAND_COUNT};
pub use registry::{ensure_population, validate_entry, VoterRegistry, DEFAULT_MIN_VOTERS};
pub use result::{Award, DraftResult, DraftRun, Round, RoundAudit};
pub use voter::{VoterEntry, VoterSnapshot};
