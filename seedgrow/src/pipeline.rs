//! Whole-image segmentation
//!
//! Chains the member crates for one image:
//!
//! 1. convert to 8 bpp grayscale
//! 2. resize to the working size (bilinear)
//! 3. median filter
//! 4. seed, grow, gather border statistics and merge
//! 5. colorize regions and extract their borders
//!
//! [`process_file`] adds reading the image and writing the three rasters
//! as `<stem>_filtered.png`, `<stem>_regions.png` and `<stem>_borders.png`.
//! Images are processed one at a time; a [`RegionGrower`] lives only for
//! the image it was built for.

use log::info;
use seedgrow_core::{ImageFormat, Pix, PixelDepth};
use seedgrow_filter::{FilterError, median_filter};
use seedgrow_io::IoError;
use seedgrow_region::{GrowerOptions, RegionError, RegionGrower, Segmentation, extract_borders};
use seedgrow_transform::{TransformError, scale_to_size};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default working width
pub const DEFAULT_WORKING_WIDTH: u32 = 512;
/// Default working height
pub const DEFAULT_WORKING_HEIGHT: u32 = 512;
/// Default median kernel size (1 leaves the image unchanged)
pub const DEFAULT_NOISE_KERNEL_SIZE: u32 = 1;
/// Default border thickness
pub const DEFAULT_BORDER_THICKNESS: u32 = 1;

/// Errors from any stage of the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] seedgrow_core::Error),

    /// Reading or writing an image failed
    #[error("image I/O error: {0}")]
    Io(#[from] IoError),

    /// Resizing failed
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    /// Noise filtering failed
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Segmentation failed
    #[error("region error: {0}")]
    Region(#[from] RegionError),

    /// Output directory could not be prepared
    #[error("filesystem error: {0}")]
    Fs(#[from] std::io::Error),

    /// Input path has no usable file name
    #[error("invalid input path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Options for [`segment_pix`] and [`process_file`]
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Width the image is resized to before segmentation
    pub working_width: u32,
    /// Height the image is resized to before segmentation
    pub working_height: u32,
    /// Median kernel size; even sizes skip filtering
    pub noise_kernel_size: u32,
    /// Border mask thickness
    pub border_thickness: u32,
    /// Region growing options
    pub grower: GrowerOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            working_width: DEFAULT_WORKING_WIDTH,
            working_height: DEFAULT_WORKING_HEIGHT,
            noise_kernel_size: DEFAULT_NOISE_KERNEL_SIZE,
            border_thickness: DEFAULT_BORDER_THICKNESS,
            grower: GrowerOptions::default(),
        }
    }
}

impl PipelineOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working size
    pub fn with_working_size(mut self, width: u32, height: u32) -> Self {
        self.working_width = width;
        self.working_height = height;
        self
    }

    /// Set the median kernel size
    pub fn with_noise_kernel_size(mut self, size: u32) -> Self {
        self.noise_kernel_size = size;
        self
    }

    /// Set the border thickness
    pub fn with_border_thickness(mut self, thickness: u32) -> Self {
        self.border_thickness = thickness;
        self
    }

    /// Set the region growing options
    pub fn with_grower(mut self, grower: GrowerOptions) -> Self {
        self.grower = grower;
        self
    }
}

/// Rasters produced for one image
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Resized and filtered 8 bpp input that was segmented
    pub filtered: Pix,
    /// 32 bpp random-color region map
    pub regions: Pix,
    /// 8 bpp border mask
    pub borders: Pix,
    /// Labels and counts
    pub segmentation: Segmentation,
}

/// Segment an image already in memory.
///
/// Any input depth that converts to 8 bpp is accepted.
pub fn segment_pix(pix: &Pix, options: &PipelineOptions) -> PipelineResult<PipelineOutput> {
    let gray = match pix.depth() {
        PixelDepth::Bit8 => pix.clone(),
        _ => pix.convert_to_8()?,
    };
    let resized = scale_to_size(&gray, options.working_width, options.working_height)?;
    let filtered = median_filter(&resized, options.noise_kernel_size)?;

    let mut grower = RegionGrower::with_options(&filtered, options.grower.clone())?;
    let segmentation = grower.segment()?;
    let regions = grower.colorize()?;
    let borders = extract_borders(&regions, options.border_thickness)?;

    info!(
        "segmented {}x{} image into {} regions ({} seeds, {} merged)",
        filtered.width(),
        filtered.height(),
        segmentation.region_count,
        grower.seeds_placed(),
        segmentation.merged_count
    );

    Ok(PipelineOutput {
        filtered,
        regions,
        borders,
        segmentation,
    })
}

/// Write the filtered input, region map and border mask as PNG files
/// named `<stem>_<label>.png` in `out_dir`, creating it if needed.
///
/// Returns the written paths in that order.
pub fn write_outputs(
    output: &PipelineOutput,
    stem: &str,
    out_dir: &Path,
) -> PipelineResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let rasters = [
        ("filtered", &output.filtered),
        ("regions", &output.regions),
        ("borders", &output.borders),
    ];
    let mut written = Vec::with_capacity(rasters.len());
    for (label, pix) in rasters {
        let path = out_dir.join(format!("{}_{}.png", stem, label));
        seedgrow_io::write_image(pix, &path, ImageFormat::Png)?;
        written.push(path);
    }
    Ok(written)
}

/// Read an image, segment it and write its outputs into `out_dir`.
pub fn process_file<P: AsRef<Path>>(
    path: P,
    out_dir: &Path,
    options: &PipelineOptions,
) -> PipelineResult<PipelineOutput> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| PipelineError::InvalidPath(path.to_path_buf()))?;

    let pix = seedgrow_io::read_image_gray(path)?;
    info!(
        "processing {} ({}x{})",
        path.display(),
        pix.width(),
        pix.height()
    );
    let output = segment_pix(&pix, options)?;
    let written = write_outputs(&output, stem, out_dir)?;
    info!("wrote {} files to {}", written.len(), out_dir.display());
    Ok(output)
}

/// Process several images in order, stopping at the first failure.
pub fn process_files<P: AsRef<Path>>(
    paths: &[P],
    out_dir: &Path,
    options: &PipelineOptions,
) -> PipelineResult<Vec<PipelineOutput>> {
    paths
        .iter()
        .map(|p| process_file(p, out_dir, options))
        .collect()
}
