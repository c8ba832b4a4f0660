use crate::configuration::{Configuration, Green};
use crate::conflict::ConflictGraph;
#[cfg(feature = "debug")]
use crate::debug::debug_configuration;
use crate::graph::LaneGraph;
use crate::junction::LaneKind;
use crate::{PhaseError, SignId};
use log::{debug, trace};
use std::collections::VecDeque;

/// Options controlling how the phase table of a junction is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseOptions {
    /// The class of road user whose connections define each lane's outbound lanes.
    pub lane_kind: LaneKind,
    /// Treat lanes of the same road as never colliding.
    pub same_road_shortcut: bool,
    /// The enumeration strategy.
    pub enumeration: Enumeration,
}

/// How the maximal configurations are enumerated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Enumeration {
    /// Grow legal configurations one lane at a time until nothing new appears,
    /// then drop the non-maximal ones.
    #[default]
    Closure,
    /// Enumerate maximal independent sets of an explicit conflict graph.
    ConflictGraph,
}

/// A set of signs which may show "go" at the same time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phase {
    signs: Vec<SignId>,
}

/// The maximal sign configurations of a junction, in order of discovery.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseTable {
    phases: Vec<Phase>,
}

impl Default for PhaseOptions {
    fn default() -> Self {
        Self {
            lane_kind: LaneKind::General,
            same_road_shortcut: true,
            enumeration: Enumeration::Closure,
        }
    }
}

/// Computes every maximal set of signs of the junction that may be set to "go" together.
pub fn compute_sign_configurations(
    graph: &impl LaneGraph,
    options: &PhaseOptions,
) -> Result<PhaseTable, PhaseError> {
    let phases = maximal_configurations(graph, options)?
        .iter()
        .map(|config| config.signs(graph).map(|signs| Phase { signs }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PhaseTable { phases })
}

/// Computes the maximal legal configurations of the junction.
pub fn maximal_configurations(
    graph: &impl LaneGraph,
    options: &PhaseOptions,
) -> Result<Vec<Configuration>, PhaseError> {
    let greens = graph
        .inbound_lanes()
        .into_iter()
        .map(|lane| Green::new(graph, lane, options.lane_kind))
        .collect::<Vec<_>>();
    debug!(
        "Enumerating configurations of {} inbound lanes ({:?})",
        greens.len(),
        options.enumeration
    );

    match options.enumeration {
        Enumeration::Closure => {
            let pool = generate_candidates(graph, &greens, options.same_road_shortcut)?;
            Ok(retain_maximal(pool))
        }
        Enumeration::ConflictGraph => {
            let conflicts = ConflictGraph::new(graph, &greens, options.same_road_shortcut)?;
            Ok(conflicts.maximal_independent_sets())
        }
    }
}

/// Builds every legal configuration reachable by adding one lane at a time to a legal
/// configuration, starting from the single-lane configurations.
pub(crate) fn generate_candidates(
    graph: &impl LaneGraph,
    greens: &[Green],
    same_road_shortcut: bool,
) -> Result<Vec<Configuration>, PhaseError> {
    let singles = greens
        .iter()
        .cloned()
        .map(Configuration::single)
        .collect::<Vec<_>>();
    let mut pool = singles.clone();
    let mut queue = (0..pool.len()).collect::<VecDeque<_>>();

    while let Some(idx) = queue.pop_front() {
        for single in &singles {
            let merged = pool[idx].merged(single);
            if pool.contains(&merged) {
                continue;
            }
            if merged.is_legal(graph, same_road_shortcut)? {
                trace!("Accepted configuration {:?}", merged.inlanes().collect::<Vec<_>>());
                #[cfg(feature = "debug")]
                debug_configuration("accepted", &merged);
                queue.push_back(pool.len());
                pool.push(merged);
            }
        }
    }

    debug!("Generated {} legal configurations", pool.len());
    Ok(pool)
}

/// Removes every configuration contained in another configuration of the pool.
/// The pool must not contain equal configurations.
pub(crate) fn retain_maximal(pool: Vec<Configuration>) -> Vec<Configuration> {
    let keep = pool
        .iter()
        .enumerate()
        .map(|(i, config)| {
            !pool
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && config.is_subset_of(other))
        })
        .collect::<Vec<_>>();

    let mut maximal = vec![];
    for (config, keep) in pool.into_iter().zip(keep) {
        if keep {
            maximal.push(config);
        } else {
            #[cfg(feature = "debug")]
            debug_configuration("dropped", &config);
        }
    }
    maximal
}

impl Phase {
    /// Gets the signs to set to "go".
    pub fn signs(&self) -> &[SignId] {
        &self.signs
    }

    /// Returns true if the phase contains the given sign.
    pub fn contains(&self, sign: SignId) -> bool {
        self.signs.contains(&sign)
    }
}

impl PhaseTable {
    /// Returns an iterator over the phases.
    pub fn iter(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter()
    }

    /// Gets the phase at the given index.
    pub fn get(&self, idx: usize) -> Option<&Phase> {
        self.phases.get(idx)
    }

    /// The number of phases.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Returns true if the table has no phases.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Returns the distinct signs of the table, in order of first appearance.
    pub fn signs(&self) -> Vec<SignId> {
        let mut signs = vec![];
        for sign in self.phases.iter().flat_map(|phase| phase.signs.iter()) {
            if !signs.contains(sign) {
                signs.push(*sign);
            }
        }
        signs
    }

    /// Returns true if some phase lets both signs show "go" together.
    pub fn compatible(&self, a: SignId, b: SignId) -> bool {
        self.phases
            .iter()
            .any(|phase| phase.contains(a) && phase.contains(b))
    }

    /// Converts the table into plain lists of signs.
    pub fn into_signs(self) -> Vec<Vec<SignId>> {
        self.phases.into_iter().map(|phase| phase.signs).collect()
    }
}
