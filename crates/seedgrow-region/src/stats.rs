//! Border statistics between regions
//!
//! Two square matrices indexed by region id `0..=max_id`:
//! effectiveness counts 4-adjacent pixel pairs with different labels,
//! similarity counts the subset of those pairs whose intensities are
//! close. The merge sweep turns similarity into a ratio in place.

use crate::options::BorderPolicy;

/// Adjacency counts between every pair of region ids
#[derive(Debug, Clone)]
pub struct BorderStats {
    dim: usize,
    policy: BorderPolicy,
    effectiveness: Vec<u32>,
    similarity: Vec<f64>,
}

impl BorderStats {
    /// Zeroed matrices for ids `0..=max_id`.
    pub fn new(max_id: u32, policy: BorderPolicy) -> Self {
        let dim = max_id as usize + 1;
        Self {
            dim,
            policy,
            effectiveness: vec![0; dim * dim],
            similarity: vec![0.0; dim * dim],
        }
    }

    /// Side length of the matrices (`max_id + 1`).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Cell policy used when recording.
    pub fn policy(&self) -> BorderPolicy {
        self.policy
    }

    #[inline]
    fn cell(&self, i: u32, j: u32) -> Option<usize> {
        let (i, j) = (i as usize, j as usize);
        (i < self.dim && j < self.dim).then_some(i * self.dim + j)
    }

    /// Record one adjacency between the scanned pixel's region `current`
    /// and its neighbor's region `neighbor`.
    ///
    /// Ids outside the matrices are ignored.
    pub fn record(&mut self, current: u32, neighbor: u32, similar: bool) {
        let (i, j) = match self.policy {
            BorderPolicy::Canonical => (current.min(neighbor), current.max(neighbor)),
            BorderPolicy::Directional => (current, neighbor),
        };
        if let Some(c) = self.cell(i, j) {
            self.effectiveness[c] += 1;
            if similar {
                self.similarity[c] += 1.0;
            }
        }
    }

    /// Number of adjacencies counted in cell `[i][j]`.
    pub fn effectiveness(&self, i: u32, j: u32) -> u32 {
        self.cell(i, j).map_or(0, |c| self.effectiveness[c])
    }

    /// Similar-adjacency count in cell `[i][j]`, or the ratio once the
    /// merge sweep has normalized it.
    pub fn similarity(&self, i: u32, j: u32) -> f64 {
        self.cell(i, j).map_or(0.0, |c| self.similarity[c])
    }

    /// Sum of all effectiveness cells.
    pub fn total_events(&self) -> u64 {
        self.effectiveness.iter().map(|&e| e as u64).sum()
    }

    /// Divide similarity by effectiveness in cell `[i][j]` and return the
    /// ratio. Cells with no adjacency are left alone and give `None`.
    pub(crate) fn normalize(&mut self, i: u32, j: u32) -> Option<f64> {
        let c = self.cell(i, j)?;
        let eff = self.effectiveness[c];
        if eff == 0 {
            return None;
        }
        self.similarity[c] /= eff as f64;
        Some(self.similarity[c])
    }

    /// Zero both matrices.
    pub(crate) fn clear(&mut self) {
        self.effectiveness.fill(0);
        self.similarity.fill(0.0);
    }
}
