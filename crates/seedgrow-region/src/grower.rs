//! Seeded region growing
//!
//! [`RegionGrower`] owns a copy of an 8 bpp intensity grid and a label grid
//! of the same size. A run goes through these steps, each exposed on its
//! own and chained by [`RegionGrower::segment`]:
//!
//! 1. [`seed`](RegionGrower::seed) places seeds at the centers of a square
//!    lattice of cells and gives them ids `1..`
//! 2. [`grow`](RegionGrower::grow) floods outward breadth-first over
//!    4-neighbors whose intensity is within the growth threshold
//! 3. [`compute_border_stats`](RegionGrower::compute_border_stats) counts
//!    adjacencies between differently labeled pixels
//! 4. [`merge`](RegionGrower::merge) joins regions whose shared border is
//!    mostly similar in intensity
//! 5. [`colorize`](RegionGrower::colorize) paints each region with a
//!    random color
//!
//! Label 0 marks pixels no seed reached. They keep label 0, appear in the
//! border statistics as region 0, never merge and render black.
//!
//! # Examples
//!
//! ```
//! use seedgrow_core::{Pix, PixelDepth};
//! use seedgrow_region::{GrowerOptions, RegionGrower};
//!
//! let pix = Pix::new(16, 16, PixelDepth::Bit8).unwrap();
//! let options = GrowerOptions::new().with_seed_count(4).with_color_seed(1);
//! let mut grower = RegionGrower::with_options(&pix, options).unwrap();
//! let seg = grower.segment().unwrap();
//! // a flat image collapses into one region
//! assert_eq!(seg.region_count, 1);
//! ```

use crate::options::{GrowerOptions, MergeStrategy};
use crate::sample::Sample;
use crate::stats::BorderStats;
use crate::{RegionError, RegionResult};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seedgrow_core::{Pix, PixelDepth, color};
use std::collections::VecDeque;

/// Outcome of [`RegionGrower::segment`]
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// 32 bpp grid of final region ids
    pub labels: Pix,
    /// Number of distinct non-zero ids left after merging
    pub region_count: u32,
    /// Number of seeded ids absorbed into another region
    pub merged_count: u32,
}

/// Region growing state for one image
#[derive(Debug)]
pub struct RegionGrower {
    width: u32,
    height: u32,
    intensity: Vec<u8>,
    labels: Vec<u32>,
    options: GrowerOptions,
    queue: VecDeque<Sample>,
    seed_count: u32,
    seeds_placed: u32,
    stats: BorderStats,
    mapping: Vec<u32>,
    seeded: bool,
    merged: bool,
}

impl RegionGrower {
    /// Create a grower with default options.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnsupportedDepth`] unless `pix` is 8 bpp.
    pub fn new(pix: &Pix) -> RegionResult<Self> {
        Self::with_options(pix, GrowerOptions::default())
    }

    /// Create a grower for an 8 bpp intensity image.
    pub fn with_options(pix: &Pix, options: GrowerOptions) -> RegionResult<Self> {
        if pix.depth() != PixelDepth::Bit8 {
            return Err(RegionError::UnsupportedDepth {
                expected: "8-bpp",
                actual: pix.depth().bits(),
            });
        }
        let (width, height) = (pix.width(), pix.height());
        let mut intensity = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            intensity.extend((0..width).map(|x| pix.get_pixel_unchecked(x, y) as u8));
        }
        let labels = vec![0; intensity.len()];

        Ok(Self {
            width,
            height,
            intensity,
            labels,
            queue: VecDeque::new(),
            seed_count: 0,
            seeds_placed: 0,
            stats: BorderStats::new(0, options.border_policy),
            mapping: vec![0],
            options,
            seeded: false,
            merged: false,
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Place up to `seed_count` seeds and enqueue them for growth.
    ///
    /// The image is divided into a `n x n` lattice with
    /// `n = ceil(sqrt(seed_count))`, cells of `width / n` by `height / n`
    /// pixels. Cell centers are visited row by row; a center that is
    /// already labeled is skipped without consuming an id. Returns the
    /// number of seeds placed, which can be less than requested when the
    /// image is smaller than the lattice. Ids only run up to the number
    /// placed, so the border matrices and mapping are sized by it.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidState`] if the grid was already seeded.
    pub fn seed(&mut self, seed_count: u32) -> RegionResult<u32> {
        if self.seeded {
            return Err(RegionError::InvalidState("grid is already seeded"));
        }
        self.seeded = true;
        self.seed_count = seed_count;

        if seed_count == 0 {
            debug!("no seeds requested");
            return Ok(0);
        }

        let cells = (seed_count as f64).sqrt().ceil() as u32;
        let dx = self.width / cells;
        let dy = self.height / cells;
        let mut next_id = 1;

        // centers repeat only for zero-sized cells or once clamped to the
        // last row or column; a repeated center is already labeled
        let mut prev_y = None;
        'lattice: for i in 0..cells {
            let y = (i * dy + dy / 2).min(self.height - 1);
            if prev_y == Some(y) {
                break;
            }
            prev_y = Some(y);
            let mut prev_x = None;
            for j in 0..cells {
                if next_id > seed_count {
                    break 'lattice;
                }
                let x = (j * dx + dx / 2).min(self.width - 1);
                if prev_x == Some(x) {
                    break;
                }
                prev_x = Some(x);
                let k = self.index(x, y);
                if self.labels[k] == 0 {
                    self.labels[k] = next_id;
                    let seed = Sample::new(next_id, x, y, self.intensity[k]);
                    self.queue.push_back(seed);
                    next_id += 1;
                }
            }
        }

        self.seeds_placed = next_id - 1;
        self.stats = BorderStats::new(self.seeds_placed, self.options.border_policy);
        self.mapping = (0..=self.seeds_placed).collect();
        debug!(
            "placed {} of {} seeds on a {}x{} lattice ({}x{} cells)",
            self.seeds_placed, seed_count, cells, cells, dx, dy
        );
        Ok(self.seeds_placed)
    }

    /// Grow regions from the queued samples until the queue is empty.
    ///
    /// Each dequeued sample claims its unlabeled 4-neighbors (left, right,
    /// up, down) whose intensity differs by at most the growth threshold.
    /// Returns the number of pixels claimed.
    pub fn grow(&mut self) -> u64 {
        let threshold = self.options.growth_threshold;
        let mut claimed = 0u64;

        while let Some(current) = self.queue.pop_front() {
            for (nx, ny) in neighbors4(current.x, current.y, self.width, self.height) {
                let k = self.index(nx, ny);
                let neighbor = Sample::new(self.labels[k], nx, ny, self.intensity[k]);
                if neighbor.label == 0 && current.intensity_diff(&neighbor) <= threshold {
                    self.labels[k] = current.label;
                    self.queue.push_back(Sample {
                        label: current.label,
                        ..neighbor
                    });
                    claimed += 1;
                }
            }
        }

        debug!("growth claimed {} pixels", claimed);
        claimed
    }

    /// Recount border adjacencies from the current label grid.
    ///
    /// Every pixel is compared with its right and lower neighbors. A pair
    /// with different labels counts toward effectiveness, and toward
    /// similarity too when the intensities differ by at most the merge
    /// intensity threshold.
    pub fn compute_border_stats(&mut self) -> &BorderStats {
        self.stats.clear();
        let (w, h) = (self.width as usize, self.height as usize);
        for y in 0..h {
            for x in 0..w {
                let k = y * w + x;
                if x + 1 < w {
                    self.record_pair(k, k + 1);
                }
                if y + 1 < h {
                    self.record_pair(k, k + w);
                }
            }
        }
        debug!(
            "{} border adjacencies between regions",
            self.stats.total_events()
        );
        &self.stats
    }

    fn record_pair(&mut self, a: usize, b: usize) {
        let (la, lb) = (self.labels[a], self.labels[b]);
        if la != lb {
            let diff = self.intensity[a].abs_diff(self.intensity[b]);
            let similar = diff <= self.options.merge_intensity_threshold;
            self.stats.record(la, lb, similar);
        }
    }

    /// Merge regions with mostly similar borders and relabel the grid.
    ///
    /// Pairs `(i, j)` with `1 <= i <= j <= seeds_placed` are visited in order.
    /// Where the pair has border adjacencies, its similarity is normalized
    /// to a ratio in place; a ratio above the merge ratio threshold accepts
    /// the pair. Accepted pairs are resolved by the configured
    /// [`MergeStrategy`], then every label `l` becomes `mapping[l]`.
    /// Returns the number of ids absorbed into another region.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidState`] if the regions were already
    /// merged.
    pub fn merge(&mut self) -> RegionResult<u32> {
        if self.merged {
            return Err(RegionError::InvalidState("regions are already merged"));
        }
        self.merged = true;

        let n = self.seeds_placed;
        let threshold = self.options.merge_ratio_threshold;
        let mut accepted = Vec::new();
        for i in 1..=n {
            for j in i..=n {
                if self.stats.normalize(i, j).is_some_and(|ratio| ratio > threshold) {
                    accepted.push((i as usize, j as usize));
                }
            }
        }

        match self.options.merge_strategy {
            MergeStrategy::SinglePass => {
                for &(i, j) in &accepted {
                    self.mapping[j] = self.mapping[i];
                }
            }
            MergeStrategy::UnionFind => {
                let mut sets = DisjointSets::new(self.mapping.len());
                for &(i, j) in &accepted {
                    sets.union(i, j);
                }
                for (k, m) in self.mapping.iter_mut().enumerate() {
                    *m = sets.find(k) as u32;
                }
            }
        }

        for label in self.labels.iter_mut() {
            *label = self.mapping[*label as usize];
        }

        let merged = (1..self.mapping.len())
            .filter(|&k| self.mapping[k] != k as u32)
            .count() as u32;
        debug!(
            "{} region pairs accepted, {} ids merged away",
            accepted.len(),
            merged
        );
        Ok(merged)
    }

    /// Paint each region with a color from `rng`.
    ///
    /// Colors for ids `1..=seeds_placed` are drawn in id order as red, green,
    /// blue bytes; id 0 is black. Returns a 32 bpp RGB image.
    pub fn colorize_with_rng<R: Rng>(&self, rng: &mut R) -> RegionResult<Pix> {
        let mut table = vec![color::compose_rgb(0, 0, 0); self.seeds_placed as usize + 1];
        for entry in table.iter_mut().skip(1) {
            let (r, g, b) = (rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>());
            *entry = color::compose_rgb(r, g, b);
        }

        // 32 bpp rows hold exactly one word per pixel
        let mut out = Pix::new(self.width, self.height, PixelDepth::Bit32)?.to_mut();
        for (word, &label) in out.data_mut().iter_mut().zip(&self.labels) {
            *word = table[label as usize];
        }
        Ok(out.into())
    }

    /// Paint each region using the configured color seed, or the thread
    /// RNG when none is set.
    pub fn colorize(&self) -> RegionResult<Pix> {
        match self.options.color_seed {
            Some(seed) => self.colorize_with_rng(&mut StdRng::seed_from_u64(seed)),
            None => self.colorize_with_rng(&mut rand::rng()),
        }
    }

    /// Seed with the configured count, grow, gather statistics and merge.
    pub fn segment(&mut self) -> RegionResult<Segmentation> {
        self.seed(self.options.seed_count)?;
        self.grow();
        self.compute_border_stats();
        let merged_count = self.merge()?;
        Ok(Segmentation {
            labels: self.label_grid()?,
            region_count: self.region_count(),
            merged_count,
        })
    }

    /// Image width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Options in use.
    pub fn options(&self) -> &GrowerOptions {
        &self.options
    }

    /// Seed count requested from [`seed`](Self::seed).
    pub fn seed_count(&self) -> u32 {
        self.seed_count
    }

    /// Seeds actually placed.
    pub fn seeds_placed(&self) -> u32 {
        self.seeds_placed
    }

    /// Row-major labels.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Label at `(x, y)`, or `None` outside the image.
    pub fn label_at(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.labels[self.index(x, y)])
    }

    /// Labels as a 32 bpp image.
    pub fn label_grid(&self) -> RegionResult<Pix> {
        let mut out = Pix::new(self.width, self.height, PixelDepth::Bit32)?.to_mut();
        out.data_mut().copy_from_slice(&self.labels);
        Ok(out.into())
    }

    /// Id each region was relabeled to, indexed by id.
    pub fn region_mapping(&self) -> &[u32] {
        &self.mapping
    }

    /// Border statistics from the last
    /// [`compute_border_stats`](Self::compute_border_stats).
    pub fn border_stats(&self) -> &BorderStats {
        &self.stats
    }

    /// Pixel count per id, indexed `0..=seeds_placed`.
    pub fn region_sizes(&self) -> Vec<u64> {
        let mut sizes = vec![0u64; self.seeds_placed as usize + 1];
        for &label in &self.labels {
            sizes[label as usize] += 1;
        }
        sizes
    }

    /// Number of distinct non-zero labels.
    pub fn region_count(&self) -> u32 {
        self.region_sizes()
            .iter()
            .skip(1)
            .filter(|&&size| size > 0)
            .count() as u32
    }
}

/// In-bounds 4-neighbors of `(x, y)` in the order left, right, up, down.
pub(crate) fn neighbors4(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> impl Iterator<Item = (u32, u32)> {
    let left = x.checked_sub(1).map(|nx| (nx, y));
    let right = (x + 1 < width).then_some((x + 1, y));
    let up = y.checked_sub(1).map(|ny| (x, ny));
    let down = (y + 1 < height).then_some((x, y + 1));
    [left, right, up, down].into_iter().flatten()
}

/// Union-find over region ids; every root is the smallest id in its set.
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut k: usize) -> usize {
        while self.parent[k] != k {
            self.parent[k] = self.parent[self.parent[k]];
            k = self.parent[k];
        }
        k
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra.max(rb)] = ra.min(rb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(rows: &[&[u8]]) -> Pix {
        let mut pm = Pix::new(rows[0].len() as u32, rows.len() as u32, PixelDepth::Bit8)
            .unwrap()
            .to_mut();
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                pm.set_pixel(x as u32, y as u32, v as u32).unwrap();
            }
        }
        pm.into()
    }

    #[test]
    fn test_neighbor_order() {
        let n: Vec<_> = neighbors4(1, 1, 3, 3).collect();
        assert_eq!(n, vec![(0, 1), (2, 1), (1, 0), (1, 2)]);
        let n: Vec<_> = neighbors4(0, 0, 3, 3).collect();
        assert_eq!(n, vec![(1, 0), (0, 1)]);
        assert_eq!(neighbors4(0, 0, 1, 1).count(), 0);
    }

    #[test]
    fn test_seed_positions() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let mut grower = RegionGrower::new(&pix).unwrap();
        assert_eq!(grower.seed(4).unwrap(), 4);
        assert_eq!(grower.label_at(1, 1), Some(1));
        assert_eq!(grower.label_at(3, 1), Some(2));
        assert_eq!(grower.label_at(1, 3), Some(3));
        assert_eq!(grower.label_at(3, 3), Some(4));
        assert_eq!(grower.labels().iter().filter(|&&l| l != 0).count(), 4);
    }

    #[test]
    fn test_seed_partial_lattice() {
        // 3 seeds use a 2x2 lattice and stop after the third cell
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let mut grower = RegionGrower::new(&pix).unwrap();
        assert_eq!(grower.seed(3).unwrap(), 3);
        assert_eq!(grower.label_at(3, 3), Some(0));
        assert_eq!(grower.region_mapping(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_seed_collisions_on_tiny_image() {
        // cells are 0 pixels wide, so every center lands on (0, 0)
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        let mut grower = RegionGrower::new(&pix).unwrap();
        assert_eq!(grower.seed(9).unwrap(), 1);
        assert_eq!(grower.label_at(0, 0), Some(1));
        assert_eq!(grower.seed_count(), 9);
        assert_eq!(grower.region_mapping(), &[0, 1]);
    }

    #[test]
    fn test_huge_seed_count_on_small_image() {
        let pix = gray(&[&[10; 4], &[10; 4], &[10; 4], &[10; 4]]);
        let mut grower = RegionGrower::new(&pix).unwrap();
        assert_eq!(grower.seed(u32::MAX).unwrap(), 1);
        assert_eq!(grower.border_stats().dim(), 2);
        assert_eq!(grower.grow(), 15);

        let options = GrowerOptions::new().with_seed_count(100_000).with_color_seed(2);
        let mut grower = RegionGrower::with_options(&pix, options).unwrap();
        let seg = grower.segment().unwrap();
        assert_eq!(seg.region_count, 1);
        assert_eq!(seg.merged_count, 0);
        assert_eq!(grower.region_sizes(), vec![0, 16]);
        assert!(grower.colorize().is_ok());
    }

    #[test]
    fn test_seed_zero_and_twice() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let mut grower = RegionGrower::new(&pix).unwrap();
        assert_eq!(grower.seed(0).unwrap(), 0);
        assert_eq!(grower.grow(), 0);
        assert!(grower.labels().iter().all(|&l| l == 0));
        assert!(matches!(grower.seed(1), Err(RegionError::InvalidState(_))));
    }

    #[test]
    fn test_growth_respects_threshold() {
        let pix = gray(&[&[10, 12, 14, 20], &[10, 13, 16, 30]]);
        let options = GrowerOptions::new().with_seed_count(1);
        let mut grower = RegionGrower::with_options(&pix, options).unwrap();
        grower.seed(1).unwrap();
        // seed at (2, 1), intensity 16
        assert_eq!(grower.label_at(2, 1), Some(1));
        grower.grow();
        let labels: Vec<_> = grower.labels().to_vec();
        assert_eq!(labels, vec![1, 1, 1, 0, 1, 1, 1, 0]);
    }

    #[test]
    fn test_unreached_pixels_stay_zero() {
        let pix = gray(&[&[0, 0, 0, 0], &[0, 0, 0, 0], &[200, 200, 200, 200]]);
        let options = GrowerOptions::new().with_seed_count(1);
        let mut grower = RegionGrower::with_options(&pix, options).unwrap();
        let seg = grower.segment().unwrap();
        assert_eq!(seg.region_count, 1);
        let sizes = grower.region_sizes();
        assert_eq!(sizes, vec![4, 8]);
        // region 0 borders region 1 along the whole bottom edge
        assert_eq!(grower.border_stats().effectiveness(0, 1), 4);
    }

    #[test]
    fn test_merge_twice_is_rejected() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let mut grower = RegionGrower::new(&pix).unwrap();
        grower.seed(2).unwrap();
        grower.grow();
        grower.compute_border_stats();
        grower.merge().unwrap();
        assert!(grower.merge().is_err());
    }

    #[test]
    fn test_colorize_is_seeded() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let options = GrowerOptions::new().with_color_seed(42);
        let mut grower = RegionGrower::with_options(&pix, options).unwrap();
        grower.seed(2).unwrap();
        let a = grower.colorize().unwrap();
        let b = grower.colorize().unwrap();
        assert!(a.equals(&b));
        assert_eq!(a.depth(), PixelDepth::Bit32);
        // unlabeled pixels are black
        assert_eq!(a.get_rgb(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_colorize_draws_rgb_in_id_order() {
        let pix = Pix::new(2, 1, PixelDepth::Bit8).unwrap();
        let mut grower = RegionGrower::new(&pix).unwrap();
        grower.seed(1).unwrap();
        grower.grow();

        let mut rng = StdRng::seed_from_u64(5);
        let out = grower.colorize_with_rng(&mut rng).unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let expected = (rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>());
        assert_eq!(out.get_rgb(0, 0), Some(expected));
        assert_eq!(out.get_rgb(1, 0), Some(expected));
    }

    #[test]
    fn test_rejects_color_input() {
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            RegionGrower::new(&pix),
            Err(RegionError::UnsupportedDepth { actual: 32, .. })
        ));
    }

    #[test]
    fn test_disjoint_sets_keep_smallest_root() {
        let mut sets = DisjointSets::new(6);
        sets.union(4, 5);
        sets.union(3, 5);
        sets.union(2, 4);
        assert_eq!(sets.find(5), 2);
        assert_eq!(sets.find(3), 2);
        assert_eq!(sets.find(1), 1);
    }
}
