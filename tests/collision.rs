//! Tests of the pairwise collision test between two green lanes.

mod common;

use common::Crossroads;
use itertools::Itertools;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use junction_phases::{
    collides, compute_sign_configurations, Green, Junction, Key, LaneGraph, LaneId, LaneKind,
    PhaseError, PhaseOptions, RoadId, SignId,
};

thread_local!(
    static WARNINGS: RefCell<Vec<String>> = Default::default();
);

/// Records warnings logged on the current thread.
struct WarningLog;

impl Log for WarningLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            WARNINGS.with(|w| w.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: WarningLog = WarningLog;

/// Installs the warning log and clears this thread's warnings.
fn capture_warnings() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Warn);
    }
    WARNINGS.with(|w| w.borrow_mut().clear());
}

fn take_warnings() -> Vec<String> {
    WARNINGS.with(|w| w.take())
}

/// Wraps a junction, optionally corrupting its lane graph.
struct Faulty<'a> {
    inner: &'a Junction,
    /// Adds a null outbound lane to this inbound lane.
    null_exit: Option<LaneId>,
    /// Leaves this lane out of every clockwise ordering.
    hidden: Option<LaneId>,
}

impl LaneGraph for Faulty<'_> {
    fn inbound_lanes(&self) -> Vec<LaneId> {
        self.inner.inbound_lanes()
    }

    fn lanes_leading_from(&self, lane: LaneId, kind: LaneKind) -> Vec<LaneId> {
        let mut lanes = self.inner.lanes_leading_from(lane, kind);
        if self.null_exit == Some(lane) {
            lanes.push(LaneId::null());
        }
        lanes
    }

    fn clockwise_lanes_from(&self, lane: LaneId) -> Vec<LaneId> {
        let mut lanes = self.inner.clockwise_lanes_from(lane);
        lanes.retain(|id| Some(*id) != self.hidden);
        lanes
    }

    fn road(&self, lane: LaneId) -> Option<RoadId> {
        self.inner.road(lane)
    }

    fn sign(&self, lane: LaneId) -> Option<SignId> {
        self.inner.sign(lane)
    }
}

/// A crossroads where every arm may go straight or turn either way.
fn all_movements() -> Crossroads {
    let mut x = Crossroads::new();
    let arms = [x.north, x.east, x.south, x.west];
    for (from, to) in arms.iter().cartesian_product(arms.iter()) {
        if from.road != to.road {
            x.junction
                .add_connection(from.inlane, to.outlane, LaneKind::General);
        }
    }
    x
}

fn greens(junction: &Junction) -> Vec<Green> {
    junction
        .inbound_lanes()
        .into_iter()
        .map(|lane| Green::new(junction, lane, LaneKind::General))
        .collect()
}

#[test]
fn straight_movements_cross_at_right_angles() {
    let x = Crossroads::new().straight_through();
    let [n, e, s, w] = [x.north, x.east, x.south, x.west]
        .map(|arm| Green::new(&x.junction, arm.inlane, LaneKind::General));

    assert!(!collides(&x.junction, &n, &s, true).unwrap());
    assert!(!collides(&x.junction, &e, &w, true).unwrap());
    assert!(collides(&x.junction, &n, &e, true).unwrap());
    assert!(collides(&x.junction, &s, &w, true).unwrap());
}

#[test]
fn collision_test_is_symmetric() {
    let x = all_movements();
    let greens = greens(&x.junction);
    for (a, b) in greens.iter().tuple_combinations() {
        assert_eq!(
            collides(&x.junction, a, b, true).unwrap(),
            collides(&x.junction, b, a, true).unwrap()
        );
    }
}

/// Right turns from opposite arms run side by side without crossing.
#[test]
fn opposite_right_turns_do_not_cross() {
    let mut x = Crossroads::new();
    x.junction
        .add_connection(x.north.inlane, x.west.outlane, LaneKind::General);
    x.junction
        .add_connection(x.south.inlane, x.east.outlane, LaneKind::General);
    let n = Green::new(&x.junction, x.north.inlane, LaneKind::General);
    let s = Green::new(&x.junction, x.south.inlane, LaneKind::General);

    assert!(!collides(&x.junction, &n, &s, true).unwrap());
}

#[test]
fn lanes_without_exits_never_collide() {
    let x = Crossroads::new();
    let n = Green::new(&x.junction, x.north.inlane, LaneKind::General);
    let e = Green::new(&x.junction, x.east.inlane, LaneKind::General);

    assert!(n.outlanes().is_empty());
    assert!(!collides(&x.junction, &n, &e, false).unwrap());
}

#[test]
fn null_exit_lane_is_a_structural_error() {
    let x = Crossroads::new().straight_through();
    let faulty = Faulty {
        inner: &x.junction,
        null_exit: Some(x.north.inlane),
        hidden: None,
    };

    let result = compute_sign_configurations(&faulty, &PhaseOptions::default());
    assert!(matches!(
        result,
        Err(PhaseError::StructuralInconsistency { .. })
    ));
}

/// A lane belonging to some other junction is treated like a missing lane.
#[test]
fn foreign_exit_lane_is_a_structural_error() {
    let mut x = Crossroads::new().straight_through();

    // Keys of identically built junctions coincide, so only a key past the end is foreign
    let mut big = Crossroads::new();
    let extra = common::add_arm(&mut big.junction, big.north.road, 45.0);
    x.junction
        .add_connection(x.west.inlane, extra.outlane, LaneKind::General);

    let n = Green::new(&x.junction, x.north.inlane, LaneKind::General);
    let w = Green::new(&x.junction, x.west.inlane, LaneKind::General);
    let result = collides(&x.junction, &n, &w, true);
    assert!(matches!(
        result,
        Err(PhaseError::StructuralInconsistency { .. })
    ));
}

/// An ordering that never reaches the exit lane is tolerated and counts as no collision.
#[test]
fn malformed_ordering_assumes_no_collision() {
    let x = Crossroads::new().straight_through();
    let faulty = Faulty {
        inner: &x.junction,
        null_exit: None,
        hidden: Some(x.south.outlane),
    };
    let n = Green::new(&faulty, x.north.inlane, LaneKind::General);
    let e = Green::new(&faulty, x.east.inlane, LaneKind::General);

    capture_warnings();
    assert!(collides(&x.junction, &n, &e, true).unwrap());
    assert!(take_warnings().is_empty());

    assert!(!collides(&faulty, &n, &e, true).unwrap());
    let warnings = take_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("never reaches"));

    assert!(compute_sign_configurations(&faulty, &PhaseOptions::default()).is_ok());
}
