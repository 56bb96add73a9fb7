//! seedgrow-test - Regression harness shared by the seedgrow crates
//!
//! Every `tests/*_reg.rs` file drives a [`RegParams`], which numbers each
//! check, records failures instead of panicking, and reports once at
//! [`RegParams::cleanup`]. Image checks can be pinned to golden files:
//!
//! - **Generate**: write outputs and copy them into `tests/golden`
//! - **Compare**: write outputs and compare them with the golden copies
//! - **Display**: write outputs only, for inspection
//!
//! # Usage
//!
//! ```ignore
//! use seedgrow_test::RegParams;
//!
//! let mut rp = RegParams::new("grower");
//! rp.compare_values(2.0, region_count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! The mode is taken from the `REGTEST_MODE` environment variable
//! (`generate`, `compare` or `display`).

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use seedgrow_core::Pix;
use std::path::PathBuf;

/// Load an image from `tests/data/images` at the workspace root.
pub fn load_test_image(name: &str) -> TestResult<Pix> {
    let path = test_data_path(name);
    seedgrow_io::read_image(&path).map_err(|e| TestError::ImageLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load a test image as 8 bpp grayscale.
pub fn load_test_image_gray(name: &str) -> TestResult<Pix> {
    let path = test_data_path(name);
    seedgrow_io::read_image_gray(&path).map_err(|e| TestError::ImageLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

// this crate lives at crates/seedgrow-test
fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Path of a file in the test image directory.
pub fn test_data_path(name: &str) -> PathBuf {
    workspace_root().join("tests/data/images").join(name)
}

/// Directory holding golden outputs.
pub fn golden_dir() -> PathBuf {
    workspace_root().join("tests/golden")
}

/// Directory receiving regression outputs.
pub fn regout_dir() -> PathBuf {
    workspace_root().join("tests/regout")
}
