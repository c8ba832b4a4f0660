use crate::junction::LaneKind;
use crate::{LaneId, RoadId, SignId};

/// Read-only view of a junction's lane graph.
///
/// Lanes are identified by their handle; two lanes are the same lane iff their
/// [LaneId]s are equal.
pub trait LaneGraph {
    /// The inbound lanes of the junction, in a stable order.
    fn inbound_lanes(&self) -> Vec<LaneId>;

    /// The outbound lanes reachable from the given inbound lane by road users of the given kind.
    fn lanes_leading_from(&self, lane: LaneId, kind: LaneKind) -> Vec<LaneId>;

    /// All lanes around the junction in clockwise order, starting at `lane`.
    fn clockwise_lanes_from(&self, lane: LaneId) -> Vec<LaneId>;

    /// The road the lane belongs to, or `None` if the lane is unknown.
    fn road(&self, lane: LaneId) -> Option<RoadId>;

    /// The sign guarding an inbound lane, or `None` if it has none.
    fn sign(&self, lane: LaneId) -> Option<SignId>;
}
