// Voter list loading.
//
// Reads a CSV with a `name,choice1,choice2,choice3` header. A bad row fails
// the whole load; rows are never skipped.

use std::io::Read;
use std::path::Path;

use land_draft_core::{LandId, ValidationError, VoterEntry, VoterRegistry};
use serde::Deserialize;
use tracing::info;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum VoterFileError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("line {line}: `{field}` must be between 1 and 32, got {value}")]
    OutOfRange {
        line: usize,
        field: &'static str,
        value: i64,
    },

    #[error("line {line}: {source}")]
    Invalid {
        line: usize,
        source: ValidationError,
    },

    #[error("{path} contains no voters")]
    Empty { path: String },
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// Choices are read wide so a value like `300` is reported against its
/// column instead of failing inside the CSV decoder.
#[derive(Debug, Deserialize)]
struct RawVoter {
    name: String,
    choice1: i64,
    choice2: i64,
    choice3: i64,
}

impl RawVoter {
    fn into_entry(self, line: usize) -> Result<VoterEntry, VoterFileError> {
        let land = |field: &'static str, value: i64| {
            LandId::try_from(value).map_err(|_| VoterFileError::OutOfRange { line, field, value })
        };
        Ok(VoterEntry {
            choice1: land("choice1", self.choice1)?,
            choice2: land("choice2", self.choice2)?,
            choice3: land("choice3", self.choice3)?,
            name: self.name.trim().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

/// Parse voters in file order. Line numbers count the header as line 1.
fn read_entries<R: Read>(rdr: R) -> Result<Vec<(usize, VoterEntry)>, ReadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut entries = Vec::new();
    for (idx, result) in reader.deserialize::<RawVoter>().enumerate() {
        let line = idx + 2;
        let raw = result.map_err(ReadError::Csv)?;
        entries.push((line, raw.into_entry(line).map_err(ReadError::Row)?));
    }
    Ok(entries)
}

/// Register every voter from `rdr`, stopping at the first bad row.
fn registry_from_reader<R: Read>(rdr: R) -> Result<VoterRegistry, ReadError> {
    let mut registry = VoterRegistry::new();
    for (line, entry) in read_entries(rdr)? {
        registry
            .register(entry)
            .map_err(|source| ReadError::Row(VoterFileError::Invalid { line, source }))?;
    }
    Ok(registry)
}

/// Reader-level failure before a path is attached.
enum ReadError {
    Csv(csv::Error),
    Row(VoterFileError),
}

impl ReadError {
    fn at(self, path: &Path) -> VoterFileError {
        match self {
            ReadError::Csv(source) => VoterFileError::Csv {
                path: path.display().to_string(),
                source,
            },
            ReadError::Row(err) => err,
        }
    }
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File, VoterFileError> {
    std::fs::File::open(path).map_err(|e| VoterFileError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load voter rows from a CSV file without registry checks.
pub fn load_voters(path: &Path) -> Result<Vec<VoterEntry>, VoterFileError> {
    let entries = read_entries(open(path)?).map_err(|e| e.at(path))?;
    Ok(entries.into_iter().map(|(_, entry)| entry).collect())
}

/// Load and register every voter in a CSV file. Fails on the first row that
/// would be rejected at registration, naming its line and field.
pub fn load_registry(path: &Path) -> Result<VoterRegistry, VoterFileError> {
    let registry = registry_from_reader(open(path)?).map_err(|e| e.at(path))?;
    if registry.is_empty() {
        return Err(VoterFileError::Empty {
            path: path.display().to_string(),
        });
    }
    info!("Loaded {} voters from {}", registry.len(), path.display());
    Ok(registry)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
