use crate::LaneId;
use thiserror::Error;

/// An error raised while computing the phase table of a junction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhaseError {
    /// A lane needed for a collision check is null or unknown to the junction.
    /// The junction has no valid phase table.
    #[error("structural inconsistency between lanes {first:?} and {second:?}: {reason}")]
    StructuralInconsistency {
        first: LaneId,
        second: LaneId,
        reason: &'static str,
    },
    /// The clockwise ordering starting at `inlane` never reaches `outlane`.
    /// Absorbed by the collision predicate, which treats the pair as not colliding.
    #[error("clockwise ordering from lane {inlane:?} never reaches lane {outlane:?}")]
    MalformedOrdering { inlane: LaneId, outlane: LaneId },
}

impl PhaseError {
    pub(crate) fn inconsistent(first: LaneId, second: LaneId, reason: &'static str) -> Self {
        Self::StructuralInconsistency {
            first,
            second,
            reason,
        }
    }
}
