use crate::graph::LaneGraph;
use crate::math::{clockwise_bearing, Point2d};
use crate::phases::{compute_sign_configurations, PhaseOptions, PhaseTable};
use crate::util::rotated_range;
use crate::{LaneId, PhaseError, RoadId, SignId};
use slotmap::SlotMap;

/// A road junction: the lanes meeting at it and the signs guarding its inbound lanes.
#[derive(Clone)]
pub struct Junction {
    /// The centre point, used to order lanes around the junction.
    centre: Point2d,
    /// The roads meeting at the junction.
    roads: SlotMap<RoadId, Road>,
    /// The lanes of the junction.
    lanes: SlotMap<LaneId, Lane>,
    /// The signs guarding the inbound lanes.
    signs: SlotMap<SignId, Sign>,
    /// The inbound lanes, in insertion order.
    inbound: Vec<LaneId>,
    /// All lanes sorted clockwise around the centre.
    ring: Vec<LaneId>,
}

/// A road approaching or leaving the junction.
#[derive(Clone, Debug)]
pub struct Road {
    /// The road ID.
    id: RoadId,
    /// The name of the road.
    name: String,
}

/// A single lane at the junction boundary.
#[derive(Clone, Debug)]
pub struct Lane {
    /// The lane ID.
    id: LaneId,
    /// The road the lane belongs to.
    road: RoadId,
    /// Whether traffic enters or leaves the junction on this lane.
    direction: LaneDirection,
    /// Where the lane meets the junction.
    position: Point2d,
    /// The bearing of `position` from the junction centre.
    bearing: f64,
    /// The sign guarding the lane, if it is inbound.
    sign: Option<SignId>,
    /// The outbound lanes reachable from this lane.
    links_out: Vec<(LaneId, LaneKind)>,
}

/// The traffic sign guarding an inbound lane.
#[derive(Clone, Copy, Debug)]
pub struct Sign {
    /// The sign ID.
    id: SignId,
    /// The lane the sign guards.
    lane: LaneId,
}

/// The attributes of a lane.
pub struct LaneAttributes {
    /// The road the lane belongs to.
    pub road: RoadId,
    /// Whether the lane carries traffic into or out of the junction.
    pub direction: LaneDirection,
    /// The point where the lane meets the junction.
    pub position: Point2d,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneDirection {
    Inbound,
    Outbound,
}

/// The class of road user a connection between two lanes is meant for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneKind {
    #[default]
    General,
    Bus,
    Tram,
}

impl Junction {
    /// Creates an empty junction centred on the given point.
    pub fn new(centre: Point2d) -> Self {
        Self {
            centre,
            roads: Default::default(),
            lanes: Default::default(),
            signs: Default::default(),
            inbound: vec![],
            ring: vec![],
        }
    }

    /// Adds a road to the junction.
    pub fn add_road(&mut self, name: &str) -> RoadId {
        self.roads.insert_with_key(|id| Road {
            id,
            name: name.to_owned(),
        })
    }

    /// Adds a lane to the junction. Inbound lanes are given a sign.
    pub fn add_lane(&mut self, attributes: &LaneAttributes) -> LaneId {
        let bearing = clockwise_bearing(self.centre, attributes.position);
        let lane_id = self.lanes.insert_with_key(|id| Lane {
            id,
            road: attributes.road,
            direction: attributes.direction,
            position: attributes.position,
            bearing,
            sign: None,
            links_out: vec![],
        });

        if attributes.direction == LaneDirection::Inbound {
            let sign_id = self.signs.insert_with_key(|id| Sign { id, lane: lane_id });
            self.lanes[lane_id].sign = Some(sign_id);
            self.inbound.push(lane_id);
        }

        // Keep the ring sorted; equal bearings keep insertion order
        let idx = self
            .ring
            .iter()
            .position(|id| self.lanes[*id].bearing > bearing)
            .unwrap_or(self.ring.len());
        self.ring.insert(idx, lane_id);

        lane_id
    }

    /// Specifies that traffic of the given kind may travel from the inbound lane `from`
    /// to the outbound lane `to`.
    pub fn add_connection(&mut self, from: LaneId, to: LaneId, kind: LaneKind) {
        let links_out = &mut self.lanes[from].links_out;
        if !links_out.contains(&(to, kind)) {
            links_out.push((to, kind));
        }
    }

    /// Gets the centre point of the junction.
    pub fn centre(&self) -> Point2d {
        self.centre
    }

    /// Gets a reference to the lane with the given ID.
    pub fn get_lane(&self, lane_id: LaneId) -> &Lane {
        &self.lanes[lane_id]
    }

    /// Gets a reference to the road with the given ID.
    pub fn get_road(&self, road_id: RoadId) -> &Road {
        &self.roads[road_id]
    }

    /// Gets a reference to the sign with the given ID.
    pub fn get_sign(&self, sign_id: SignId) -> &Sign {
        &self.signs[sign_id]
    }

    /// Returns an iterator over all the lanes, in clockwise order.
    pub fn iter_lanes(&self) -> impl Iterator<Item = &Lane> {
        self.ring.iter().map(|id| &self.lanes[*id])
    }

    /// Returns an iterator over all the signs.
    pub fn iter_signs(&self) -> impl Iterator<Item = &Sign> {
        self.signs.values()
    }

    /// Computes the phase table of the junction.
    pub fn sign_configurations(&self, options: &PhaseOptions) -> Result<PhaseTable, PhaseError> {
        compute_sign_configurations(self, options)
    }
}

impl LaneGraph for Junction {
    fn inbound_lanes(&self) -> Vec<LaneId> {
        self.inbound.clone()
    }

    fn lanes_leading_from(&self, lane: LaneId, kind: LaneKind) -> Vec<LaneId> {
        self.lanes
            .get(lane)
            .map(|lane| {
                lane.links_out
                    .iter()
                    .filter(|(_, k)| *k == kind)
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn clockwise_lanes_from(&self, lane: LaneId) -> Vec<LaneId> {
        match self.ring.iter().position(|id| *id == lane) {
            Some(start) => rotated_range(self.ring.len(), start)
                .map(|idx| self.ring[idx])
                .collect(),
            None => vec![],
        }
    }

    fn road(&self, lane: LaneId) -> Option<RoadId> {
        self.lanes.get(lane).map(|lane| lane.road)
    }

    fn sign(&self, lane: LaneId) -> Option<SignId> {
        self.lanes.get(lane).and_then(|lane| lane.sign)
    }
}

impl Road {
    /// Gets the road's ID.
    pub fn id(&self) -> RoadId {
        self.id
    }

    /// Gets the road's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Lane {
    /// Gets the lane's ID.
    pub fn id(&self) -> LaneId {
        self.id
    }

    /// Gets the ID of the road the lane belongs to.
    pub fn road(&self) -> RoadId {
        self.road
    }

    pub fn direction(&self) -> LaneDirection {
        self.direction
    }

    /// Gets the point where the lane meets the junction.
    pub fn position(&self) -> Point2d {
        self.position
    }

    /// Gets the clockwise bearing of the lane from the junction centre, in radians.
    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    /// Gets the sign guarding the lane, if it is inbound.
    pub fn sign(&self) -> Option<SignId> {
        self.sign
    }
}

impl Sign {
    /// Gets the sign's ID.
    pub fn id(&self) -> SignId {
        self.id
    }

    /// Gets the ID of the lane the sign guards.
    pub fn lane(&self) -> LaneId {
        self.lane
    }
}
