//! Regression check bookkeeping

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use seedgrow_core::{ImageFormat, Pix};
use std::fs;
use std::path::{Path, PathBuf};

/// What file-based checks do with their outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Copy outputs into the golden directory
    Generate,
    /// Compare outputs with the golden directory
    #[default]
    Compare,
    /// Write outputs without comparing
    Display,
}

impl RegTestMode {
    /// Read the mode from `REGTEST_MODE`; anything unrecognized is `Compare`.
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test
///
/// Each check bumps `index`, so failure messages and output file names
/// identify which check produced them.
pub struct RegParams {
    /// Name of the test, e.g. "grower"
    pub test_name: String,
    index: usize,
    /// File check mode
    pub mode: RegTestMode,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a regression test, creating the output directories.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("======== {}_reg ({:?}) ========", test_name, mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Index of the most recent check.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether outputs are only written for inspection.
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, detail: String) {
        let msg = format!("{}_reg #{}: {}", self.test_name, self.index, detail);
        eprintln!("Failure in {}", msg);
        self.failures.push(msg);
    }

    /// Check that `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff > delta {
            self.fail(format!(
                "expected {}, got {} (difference {} > {})",
                expected, actual, diff, delta
            ));
            return false;
        }
        true
    }

    /// Check that a condition holds.
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            self.fail(format!("check failed: {}", what));
        }
        condition
    }

    /// Check that two images have the same geometry and identical pixels.
    pub fn compare_pix(&mut self, expected: &Pix, actual: &Pix) -> bool {
        self.index += 1;
        match expected.count_diff_pixels(actual) {
            None => {
                self.fail(format!(
                    "geometry mismatch: {}x{}x{} vs {}x{}x{}",
                    expected.width(),
                    expected.height(),
                    expected.depth().bits(),
                    actual.width(),
                    actual.height(),
                    actual.depth().bits()
                ));
                false
            }
            Some(0) => true,
            Some(n) => {
                self.fail(format!("{} pixels differ", n));
                false
            }
        }
    }

    /// Write `pix` to the output directory and check it against its golden
    /// copy according to the mode.
    pub fn write_pix_and_check(&mut self, pix: &Pix, format: ImageFormat) -> TestResult<()> {
        self.index += 1;
        let local = self.output_path(&regout_dir(), "", format.extension());
        seedgrow_io::write_image(pix, &local, format).map_err(|e| TestError::ImageWrite {
            path: local.display().to_string(),
            message: e.to_string(),
        })?;
        self.check_file(&local, format.extension())
    }

    fn output_path(&self, dir: &Path, suffix: &str, ext: &str) -> PathBuf {
        dir.join(format!(
            "{}{}.{:02}.{}",
            self.test_name, suffix, self.index, ext
        ))
    }

    fn check_file(&mut self, local: &Path, ext: &str) -> TestResult<()> {
        let golden = self.output_path(&golden_dir(), "_golden", ext);
        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local, &golden)?;
                eprintln!("Generated: {}", golden.display());
            }
            RegTestMode::Compare => {
                if !golden.exists() {
                    self.fail(format!("golden file not found: {}", golden.display()));
                } else if fs::read(local)? != fs::read(&golden)?
                    && !same_pixels(local, &golden)
                {
                    self.fail(format!(
                        "{} differs from {}",
                        local.display(),
                        golden.display()
                    ));
                }
            }
            RegTestMode::Display => {}
        }
        Ok(())
    }

    /// Report the outcome; `true` if every check passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        self.failures.is_empty()
    }

    /// Whether every check so far passed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failure messages recorded so far.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

// encoders may differ byte-wise while decoding to the same raster
fn same_pixels(a: &Path, b: &Path) -> bool {
    match (seedgrow_io::read_image(a), seedgrow_io::read_image(b)) {
        (Ok(pa), Ok(pb)) => pa.count_diff_pixels(&pb) == Some(0),
        _ => false,
    }
}
