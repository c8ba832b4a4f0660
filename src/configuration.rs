use crate::collision::collides;
use crate::graph::LaneGraph;
use crate::junction::LaneKind;
use crate::{LaneId, PhaseError, SignId};
use itertools::Itertools;
use smallvec::SmallVec;

/// An inbound lane set to "go", together with the outbound lanes its traffic may use.
///
/// Two greens are equal iff they share the same inbound lane; the outbound lanes
/// follow from the inbound lane and are never compared.
#[derive(Clone, Debug)]
pub struct Green {
    inlane: LaneId,
    outlanes: SmallVec<[LaneId; 4]>,
}

/// A set of greens with pairwise distinct inbound lanes.
///
/// Comparison ignores order, but the order of the greens is kept so that
/// results are reproducible.
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    greens: SmallVec<[Green; 8]>,
}

impl Green {
    /// Creates the green for an inbound lane from the lanes leading from it.
    pub fn new(graph: &impl LaneGraph, inlane: LaneId, kind: LaneKind) -> Self {
        Self {
            inlane,
            outlanes: graph.lanes_leading_from(inlane, kind).into_iter().collect(),
        }
    }

    /// Gets the inbound lane.
    pub fn inlane(&self) -> LaneId {
        self.inlane
    }

    /// Gets the outbound lanes.
    pub fn outlanes(&self) -> &[LaneId] {
        &self.outlanes
    }
}

impl PartialEq for Green {
    fn eq(&self, other: &Self) -> bool {
        self.inlane == other.inlane
    }
}

impl Eq for Green {}

impl Configuration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a configuration containing a single green.
    pub fn single(green: Green) -> Self {
        let mut config = Self::new();
        config.add_lane(green);
        config
    }

    /// Adds a green to the configuration, unless its inbound lane is already present.
    pub fn add_lane(&mut self, green: Green) {
        if !self.contains(green.inlane) {
            self.greens.push(green);
        }
    }

    /// Creates the union of two configurations.
    /// The greens of `self` come first, followed by the new greens of `other`.
    pub fn merged(&self, other: &Configuration) -> Self {
        let mut config = self.clone();
        for green in &other.greens {
            config.add_lane(green.clone());
        }
        config
    }

    /// Returns an iterator over the greens.
    pub fn greens(&self) -> std::slice::Iter<'_, Green> {
        self.greens.iter()
    }

    /// Returns an iterator over the inbound lanes.
    pub fn inlanes(&self) -> impl Iterator<Item = LaneId> + '_ {
        self.greens.iter().map(|green| green.inlane)
    }

    /// The number of greens.
    pub fn len(&self) -> usize {
        self.greens.len()
    }

    /// Returns true if the configuration has no greens.
    pub fn is_empty(&self) -> bool {
        self.greens.is_empty()
    }

    /// Returns true if the configuration contains the given inbound lane.
    pub fn contains(&self, inlane: LaneId) -> bool {
        self.inlanes().any(|id| id == inlane)
    }

    /// Returns true if every green of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &Configuration) -> bool {
        self.greens.iter().all(|green| other.greens.contains(green))
    }

    /// Checks that no two greens of the configuration collide.
    pub fn is_legal(
        &self,
        graph: &impl LaneGraph,
        same_road_shortcut: bool,
    ) -> Result<bool, PhaseError> {
        for (a, b) in self.greens.iter().tuple_combinations() {
            if collides(graph, a, b, same_road_shortcut)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Gets the signs of the inbound lanes, in the order of the greens.
    pub fn signs(&self, graph: &impl LaneGraph) -> Result<Vec<SignId>, PhaseError> {
        self.greens
            .iter()
            .map(|green| {
                graph.sign(green.inlane).ok_or_else(|| {
                    PhaseError::inconsistent(green.inlane, green.inlane, "inbound lane has no sign")
                })
            })
            .collect()
    }
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.is_subset_of(other) && other.is_subset_of(self)
    }
}

impl Eq for Configuration {}
