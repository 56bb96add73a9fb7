//! Region growing configuration

/// Default number of seeds placed on the grid
pub const DEFAULT_SEED_COUNT: u32 = 200;
/// Default maximum intensity step for a pixel to join a region
pub const DEFAULT_GROWTH_THRESHOLD: u8 = 3;
/// Default maximum intensity step for a border pair to count as similar
pub const DEFAULT_MERGE_INTENSITY_THRESHOLD: u8 = 10;
/// Default similar/total ratio above which two regions merge
pub const DEFAULT_MERGE_RATIO_THRESHOLD: f64 = 0.5;

/// Which matrix cell a border adjacency between regions `a` and `b` is
/// counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderPolicy {
    /// Count every pair in `[min(a, b)][max(a, b)]`, so the merge sweep
    /// sees each border regardless of which side was scanned first.
    #[default]
    Canonical,
    /// Count in `[current][neighbor]` as scanned (right, then down).
    /// Adjacencies where the scanned pixel has the larger id land below
    /// the diagonal and are never considered for merging.
    Directional,
}

/// How accepted merges are resolved into final labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// One greedy sweep: `mapping[j] = mapping[i]` as each pair is
    /// accepted, then every label is looked up once. Chains that are
    /// accepted out of order are not followed to the end.
    #[default]
    SinglePass,
    /// Union accepted pairs and relabel every region to the smallest id
    /// of its merged set.
    UnionFind,
}

/// Options for [`RegionGrower`](crate::RegionGrower)
#[derive(Debug, Clone)]
pub struct GrowerOptions {
    /// Number of seeds requested by [`segment`](crate::RegionGrower::segment)
    pub seed_count: u32,
    /// Maximum `|Δintensity|` between a sample and a neighbor it claims
    pub growth_threshold: u8,
    /// Maximum `|Δintensity|` for a border adjacency to count as similar
    pub merge_intensity_threshold: u8,
    /// Regions merge when similar/total border adjacencies exceeds this
    pub merge_ratio_threshold: f64,
    /// Matrix cell selection for border statistics
    pub border_policy: BorderPolicy,
    /// Merge resolution
    pub merge_strategy: MergeStrategy,
    /// Seed for region colors; `None` draws from the thread RNG
    pub color_seed: Option<u64>,
}

impl Default for GrowerOptions {
    fn default() -> Self {
        Self {
            seed_count: DEFAULT_SEED_COUNT,
            growth_threshold: DEFAULT_GROWTH_THRESHOLD,
            merge_intensity_threshold: DEFAULT_MERGE_INTENSITY_THRESHOLD,
            merge_ratio_threshold: DEFAULT_MERGE_RATIO_THRESHOLD,
            border_policy: BorderPolicy::default(),
            merge_strategy: MergeStrategy::default(),
            color_seed: None,
        }
    }
}

impl GrowerOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of seeds
    pub fn with_seed_count(mut self, count: u32) -> Self {
        self.seed_count = count;
        self
    }

    /// Set the growth threshold
    pub fn with_growth_threshold(mut self, threshold: u8) -> Self {
        self.growth_threshold = threshold;
        self
    }

    /// Set the border similarity threshold
    pub fn with_merge_intensity_threshold(mut self, threshold: u8) -> Self {
        self.merge_intensity_threshold = threshold;
        self
    }

    /// Set the merge ratio threshold
    pub fn with_merge_ratio_threshold(mut self, ratio: f64) -> Self {
        self.merge_ratio_threshold = ratio;
        self
    }

    /// Set the border policy
    pub fn with_border_policy(mut self, policy: BorderPolicy) -> Self {
        self.border_policy = policy;
        self
    }

    /// Set the merge strategy
    pub fn with_merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.merge_strategy = strategy;
        self
    }

    /// Fix the color seed
    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = GrowerOptions::default();
        assert_eq!(opts.seed_count, 200);
        assert_eq!(opts.growth_threshold, 3);
        assert_eq!(opts.merge_intensity_threshold, 10);
        assert_eq!(opts.merge_ratio_threshold, 0.5);
        assert_eq!(opts.border_policy, BorderPolicy::Canonical);
        assert_eq!(opts.merge_strategy, MergeStrategy::SinglePass);
        assert!(opts.color_seed.is_none());
    }

    #[test]
    fn test_builders() {
        let opts = GrowerOptions::new()
            .with_seed_count(4)
            .with_border_policy(BorderPolicy::Directional)
            .with_merge_strategy(MergeStrategy::UnionFind)
            .with_color_seed(7);
        assert_eq!(opts.seed_count, 4);
        assert_eq!(opts.border_policy, BorderPolicy::Directional);
        assert_eq!(opts.merge_strategy, MergeStrategy::UnionFind);
        assert_eq!(opts.color_seed, Some(7));
    }
}
