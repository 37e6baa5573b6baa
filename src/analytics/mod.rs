//! Transaction analytics
//!
//! Pure, synchronous functions over an already-fetched batch of records.
//! Nothing here performs I/O or keeps state between calls.

pub mod archetype;
pub mod personality;
pub mod spending;

pub use archetype::{match_archetype, Archetype, ArchetypePick, ARCHETYPES};
pub use personality::{score, Metric, PersonalityScores};
pub use spending::{analyze, window_days, SpendingAnalysis, SpendingReport, Velocity};

use serde::Serialize;
use tracing::debug;

use crate::error::AgentError;
use crate::transactions::TransactionRecord;
use crate::Result;

/// Smallest batch the personality profile is computed for
pub const MIN_PROFILE_TRANSACTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalityProfile {
    pub scores: PersonalityScores,
    pub archetype: ArchetypePick,
}

/// Score a batch and match it to an archetype.
pub fn profile(records: &[TransactionRecord]) -> Result<PersonalityProfile> {
    if records.len() < MIN_PROFILE_TRANSACTIONS {
        return Err(AgentError::InsufficientData {
            required: MIN_PROFILE_TRANSACTIONS,
            actual: records.len(),
        });
    }

    let scores = score(records);
    let archetype = match_archetype(&scores);

    debug!(
        record_count = records.len(),
        archetype = archetype.name,
        confidence = archetype.confidence,
        "Personality profile computed"
    );

    Ok(PersonalityProfile { scores, archetype })
}
