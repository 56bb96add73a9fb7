//! seedgrow - Seeded region growing segmentation
//!
//! Segments a grayscale image into regions of similar intensity: seeds are
//! placed on a regular lattice, grown breadth-first, and adjacent regions
//! whose shared border is mostly homogeneous are merged. The result is
//! rendered as a random-color region map and a border mask.
//!
//! The building blocks live in the member crates and are re-exported as
//! modules; [`pipeline`] chains them for whole images.
//!
//! # Example
//!
//! ```
//! use seedgrow::pipeline::{PipelineOptions, segment_pix};
//! use seedgrow::{Pix, PixelDepth};
//!
//! let pix = Pix::new(64, 48, PixelDepth::Bit8).unwrap();
//! let options = PipelineOptions::new().with_working_size(32, 32);
//! let output = segment_pix(&pix, &options).unwrap();
//! assert_eq!(output.regions.width(), 32);
//! assert_eq!(output.borders.depth(), PixelDepth::Bit8);
//! ```

pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use seedgrow_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use seedgrow_filter as filter;
pub use seedgrow_io as io;
pub use seedgrow_morph as morph;
pub use seedgrow_region as region;
pub use seedgrow_transform as transform;

pub use pipeline::{PipelineError, PipelineOptions, PipelineOutput, PipelineResult};
