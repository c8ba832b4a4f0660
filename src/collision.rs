use crate::configuration::Green;
use crate::graph::LaneGraph;
use crate::{LaneId, PhaseError, RoadId};
use itertools::iproduct;
use log::warn;
use slotmap::Key;

/// Determines whether two greens are unsafe to be set to "go" at the same time.
///
/// # Parameters
/// * `graph` - The junction the greens belong to
/// * `a`, `b` - The greens to test; their inbound lanes must differ
/// * `same_road_shortcut` - Whether lanes of the same road are always compatible.
///   This admits some crossing movements between lanes of one road.
pub fn collides(
    graph: &impl LaneGraph,
    a: &Green,
    b: &Green,
    same_road_shortcut: bool,
) -> Result<bool, PhaseError> {
    let road_a = road_of(graph, a.inlane(), b.inlane())?;
    let road_b = road_of(graph, b.inlane(), a.inlane())?;
    if same_road_shortcut && road_a == road_b {
        return Ok(false);
    }

    for (out_a, out_b) in iproduct!(a.outlanes(), b.outlanes()) {
        if !is_known(graph, *out_a) || !is_known(graph, *out_b) {
            return Err(PhaseError::inconsistent(
                *out_a,
                *out_b,
                "outbound lane is missing from the junction",
            ));
        }
    }

    // Two streams merging into one exit lane
    if a.outlanes().iter().any(|lane| b.outlanes().contains(lane)) {
        return Ok(true);
    }

    let ring = graph.clockwise_lanes_from(a.inlane());
    for (out_a, out_b) in iproduct!(a.outlanes(), b.outlanes()) {
        match crosses(&ring, a.inlane(), *out_a, b.inlane(), *out_b) {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(err) => warn!("{err}; assuming no collision"),
        }
    }
    Ok(false)
}

/// Tests whether the chord `inlane2 -> outlane2` crosses the chord `inlane1 -> outlane1`,
/// where `ring` lists the lanes clockwise starting at `inlane1`.
fn crosses(
    ring: &[LaneId],
    inlane1: LaneId,
    outlane1: LaneId,
    inlane2: LaneId,
    outlane2: LaneId,
) -> Result<bool, PhaseError> {
    let mut inside = false;
    for lane in ring {
        if *lane == outlane1 {
            return Ok(inside);
        }
        if *lane == inlane2 {
            inside = !inside;
        }
        if *lane == outlane2 {
            inside = !inside;
        }
    }
    Err(PhaseError::MalformedOrdering {
        inlane: inlane1,
        outlane: outlane1,
    })
}

fn road_of(graph: &impl LaneGraph, lane: LaneId, other: LaneId) -> Result<RoadId, PhaseError> {
    if lane.is_null() {
        return Err(PhaseError::inconsistent(lane, other, "inbound lane is null"));
    }
    graph
        .road(lane)
        .ok_or_else(|| PhaseError::inconsistent(lane, other, "inbound lane has no road"))
}

fn is_known(graph: &impl LaneGraph, lane: LaneId) -> bool {
    !lane.is_null() && graph.road(lane).is_some()
}
