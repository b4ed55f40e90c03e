//! Per-tick nearest-neighbor connectivity between swarm members.
//!
//! Greedy matching in input order: each member scans the others for its
//! nearest eligible target and emits one edge. A member that has already
//! emitted an edge is excluded as a *target* for later sources, but its own
//! turn as a source is unaffected: the result is a directed matching, not a
//! mutual pairing, and a member may receive several incoming edges while
//! sourcing exactly one. This asymmetry is intentional behavior, kept as is.

use glam::Vec3;

/// The rebuilt edge set for one swarm group, stored as consecutive position
/// pairs ready for a line-list upload. The buffer is owned here and cleared
/// in place on every rebuild, so exactly one edge buffer exists per group
/// across any number of ticks.
#[derive(Default)]
pub struct ConnectivityGraph {
    points: Vec<Vec3>,
    used: Vec<bool>,
}

impl ConnectivityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the edge list from scratch. O(n²) over the input.
    pub fn rebuild(&mut self, positions: &[Vec3]) {
        // Last tick's edges are dropped before the new set is installed.
        self.points.clear();
        self.used.clear();
        self.used.resize(positions.len(), false);

        for (i, &a) in positions.iter().enumerate() {
            let mut best: Option<(usize, f32)> = None;
            for (j, &b) in positions.iter().enumerate() {
                if i == j || self.used[j] {
                    continue;
                }
                let dist = a.distance(b);
                match best {
                    Some((_, bd)) if dist >= bd => {}
                    _ => best = Some((j, dist)),
                }
            }
            if let Some((j, _)) = best {
                self.points.push(a);
                self.points.push(positions[j]);
                self.used[i] = true;
            }
        }
    }

    /// Edge endpoints, two entries per edge.
    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.points.len() / 2
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.used.clear();
    }
}
