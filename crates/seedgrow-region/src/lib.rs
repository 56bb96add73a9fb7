//! seedgrow-region - Seeded region growing segmentation
//!
//! This crate provides the segmentation engine:
//!
//! - **Seeding and growth** - lattice seeds flooded breadth-first over
//!   4-neighbors of similar intensity ([`RegionGrower`])
//! - **Border statistics** - adjacency counts between regions
//!   ([`BorderStats`])
//! - **Merging** - joining regions whose shared border is mostly similar
//! - **Visualization** - random region colors and border masks
//!   ([`extract_borders`])
//!
//! # Examples
//!
//! ```
//! use seedgrow_core::{Pix, PixelDepth};
//! use seedgrow_region::{extract_borders, GrowerOptions, RegionGrower};
//!
//! let mut pm = Pix::new(8, 8, PixelDepth::Bit8).unwrap().to_mut();
//! for y in 0..8 {
//!     for x in 4..8 {
//!         pm.set_pixel(x, y, 200).unwrap();
//!     }
//! }
//! let pix: Pix = pm.into();
//!
//! let options = GrowerOptions::new().with_seed_count(2).with_color_seed(3);
//! let mut grower = RegionGrower::with_options(&pix, options).unwrap();
//! let seg = grower.segment().unwrap();
//! assert_eq!(seg.region_count, 2);
//!
//! let colors = grower.colorize().unwrap();
//! let borders = extract_borders(&colors, 1).unwrap();
//! assert_eq!(borders.get_pixel(3, 0), Some(255));
//! assert_eq!(borders.get_pixel(0, 0), Some(0));
//! ```

pub mod border;
pub mod error;
pub mod grower;
pub mod options;
pub mod sample;
pub mod stats;

pub use seedgrow_core;

pub use border::extract_borders;
pub use error::{RegionError, RegionResult};
pub use grower::{RegionGrower, Segmentation};
pub use options::{
    BorderPolicy, DEFAULT_GROWTH_THRESHOLD, DEFAULT_MERGE_INTENSITY_THRESHOLD,
    DEFAULT_MERGE_RATIO_THRESHOLD, DEFAULT_SEED_COUNT, GrowerOptions, MergeStrategy,
};
pub use sample::Sample;
pub use stats::BorderStats;
