use crate::collision::collides;
use crate::configuration::{Configuration, Green};
use crate::graph::LaneGraph;
use crate::PhaseError;
use itertools::Itertools;
use log::debug;

/// The pairwise conflicts between the greens of a junction.
#[derive(Clone, Debug)]
pub(crate) struct ConflictGraph {
    /// The greens, one per inbound lane.
    greens: Vec<Green>,
    /// `conflicts[i][j]` is set if greens `i` and `j` collide.
    conflicts: Vec<Vec<bool>>,
}

impl ConflictGraph {
    pub(crate) fn new(
        graph: &impl LaneGraph,
        greens: &[Green],
        same_road_shortcut: bool,
    ) -> Result<Self, PhaseError> {
        let n = greens.len();
        let mut conflicts = vec![vec![false; n]; n];
        for (i, j) in (0..n).tuple_combinations() {
            let conflict = collides(graph, &greens[i], &greens[j], same_road_shortcut)?;
            conflicts[i][j] = conflict;
            conflicts[j][i] = conflict;
        }
        Ok(Self {
            greens: greens.to_vec(),
            conflicts,
        })
    }

    /// Enumerates the maximal sets of greens without a conflict between any two members.
    pub(crate) fn maximal_independent_sets(&self) -> Vec<Configuration> {
        let mut out = vec![];
        if !self.greens.is_empty() {
            let all = (0..self.greens.len()).collect();
            self.bron_kerbosch(vec![], all, vec![], &mut out);
        }
        debug!("Found {} maximal independent sets", out.len());
        out
    }

    /// Bron–Kerbosch with pivoting, run on the complement of the conflict graph.
    ///
    /// # Parameters
    /// * `r` - The greens in the set being built
    /// * `p` - The greens which may still extend `r`
    /// * `x` - The greens already tried, which must not extend `r`
    fn bron_kerbosch(
        &self,
        r: Vec<usize>,
        mut p: Vec<usize>,
        mut x: Vec<usize>,
        out: &mut Vec<Configuration>,
    ) {
        if p.is_empty() && x.is_empty() {
            let mut config = Configuration::new();
            for idx in r {
                config.add_lane(self.greens[idx].clone());
            }
            out.push(config);
            return;
        }

        let pivot = p
            .iter()
            .chain(&x)
            .copied()
            .max_by_key(|u| p.iter().filter(|v| self.compatible(*u, **v)).count());
        let candidates = p
            .iter()
            .copied()
            .filter(|v| pivot.map_or(true, |u| !self.compatible(u, *v)))
            .collect::<Vec<_>>();

        for v in candidates {
            let mut r_next = r.clone();
            r_next.push(v);
            let p_next = p.iter().copied().filter(|w| self.compatible(v, *w)).collect();
            let x_next = x.iter().copied().filter(|w| self.compatible(v, *w)).collect();
            self.bron_kerbosch(r_next, p_next, x_next, out);
            p.retain(|w| *w != v);
            x.push(v);
        }
    }

    /// Whether two distinct greens may be set to "go" together.
    fn compatible(&self, a: usize, b: usize) -> bool {
        a != b && !self.conflicts[a][b]
    }
}
