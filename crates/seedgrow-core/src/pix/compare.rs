//! Image comparison

use super::Pix;

impl Pix {
    /// Check whether two images have identical size, depth and pixel values.
    pub fn equals(&self, other: &Pix) -> bool {
        if !self.sizes_equal(other) {
            return false;
        }
        (0..self.height()).all(|y| {
            (0..self.width())
                .all(|x| self.get_pixel_unchecked(x, y) == other.get_pixel_unchecked(x, y))
        })
    }

    /// Count pixels whose values differ between two images of the same size.
    ///
    /// Returns `None` if the images differ in size or depth.
    pub fn count_diff_pixels(&self, other: &Pix) -> Option<u64> {
        if !self.sizes_equal(other) {
            return None;
        }
        let mut count = 0u64;
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.get_pixel_unchecked(x, y) != other.get_pixel_unchecked(x, y) {
                    count += 1;
                }
            }
        }
        Some(count)
    }

    /// Number of distinct pixel values in the image.
    pub fn count_distinct_values(&self) -> usize {
        let mut values: Vec<u32> = (0..self.height())
            .flat_map(|y| (0..self.width()).map(move |x| (x, y)))
            .map(|(x, y)| self.get_pixel_unchecked(x, y))
            .collect();
        values.sort_unstable();
        values.dedup();
        values.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Pix, PixelDepth};

    #[test]
    fn test_equals_and_diff() {
        let a = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let mut pm = a.to_mut();
        pm.set_pixel(3, 3, 1).unwrap();
        pm.set_pixel(0, 1, 1).unwrap();
        let b: Pix = pm.into();
        assert!(a.equals(&a.deep_clone()));
        assert!(!a.equals(&b));
        assert_eq!(a.count_diff_pixels(&b), Some(2));
        assert_eq!(b.count_distinct_values(), 2);
    }

    #[test]
    fn test_size_mismatch() {
        let a = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let b = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(!a.equals(&b));
        assert_eq!(a.count_diff_pixels(&b), None);
    }
}
