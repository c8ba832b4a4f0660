//! Junction layouts shared by the integration tests.

#![allow(dead_code)]

use junction_phases::math::Point2d;
use junction_phases::{
    Junction, LaneAttributes, LaneDirection, LaneGraph, LaneId, LaneKind, RoadId, SignId,
};

/// Distance from the junction centre to the lanes, in m.
const RADIUS: f64 = 10.0;

/// One arm of a junction, with a single lane in each direction.
#[derive(Clone, Copy, Debug)]
pub struct Arm {
    pub road: RoadId,
    pub inlane: LaneId,
    pub outlane: LaneId,
}

/// A point on the junction boundary at the given clockwise bearing from north, in degrees.
pub fn boundary_point(bearing: f64) -> Point2d {
    let rad = bearing.to_radians();
    Point2d::new(RADIUS * rad.sin(), RADIUS * rad.cos())
}

/// Adds a lane to `road` at the given bearing.
pub fn add_lane(
    junction: &mut Junction,
    road: RoadId,
    direction: LaneDirection,
    bearing: f64,
) -> LaneId {
    junction.add_lane(&LaneAttributes {
        road,
        direction,
        position: boundary_point(bearing),
    })
}

/// Adds an arm centred on the given bearing. Traffic drives on the right,
/// so the inbound lane lies just anticlockwise of the outbound lane.
pub fn add_arm(junction: &mut Junction, road: RoadId, bearing: f64) -> Arm {
    Arm {
        road,
        inlane: add_lane(junction, road, LaneDirection::Inbound, bearing - 5.0),
        outlane: add_lane(junction, road, LaneDirection::Outbound, bearing + 5.0),
    }
}

/// A four-arm junction with the arms North, East, South and West.
pub struct Crossroads {
    pub junction: Junction,
    pub north: Arm,
    pub east: Arm,
    pub south: Arm,
    pub west: Arm,
}

impl Crossroads {
    /// Creates a crossroads with a road per arm and no connections.
    pub fn new() -> Self {
        let mut junction = Junction::new(Point2d::new(0.0, 0.0));
        let roads = ["North", "East", "South", "West"].map(|name| junction.add_road(name));
        Self::with_roads(junction, roads)
    }

    /// Creates a crossroads whose arms belong to the given roads.
    pub fn with_roads(mut junction: Junction, roads: [RoadId; 4]) -> Self {
        let north = add_arm(&mut junction, roads[0], 0.0);
        let east = add_arm(&mut junction, roads[1], 90.0);
        let south = add_arm(&mut junction, roads[2], 180.0);
        let west = add_arm(&mut junction, roads[3], 270.0);
        Self {
            junction,
            north,
            east,
            south,
            west,
        }
    }

    /// Connects every inbound lane to the outbound lane of the opposite arm.
    pub fn straight_through(mut self) -> Self {
        for (from, to) in [
            (self.north, self.south),
            (self.east, self.west),
            (self.south, self.north),
            (self.west, self.east),
        ] {
            self.junction
                .add_connection(from.inlane, to.outlane, LaneKind::General);
        }
        self
    }

    pub fn sign(&self, arm: Arm) -> SignId {
        self.junction.sign(arm.inlane).unwrap()
    }

    pub fn signs(&self, arms: &[Arm]) -> Vec<SignId> {
        arms.iter().map(|arm| self.sign(*arm)).collect()
    }
}

/// Sorts each phase and the phases themselves, so tables can be compared as sets of sets.
pub fn normalise(mut phases: Vec<Vec<SignId>>) -> Vec<Vec<SignId>> {
    for phase in &mut phases {
        phase.sort();
    }
    phases.sort();
    phases
}
