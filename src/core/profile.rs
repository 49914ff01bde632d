//! Downsampled color profiles and the bounded similarity metric
//!
//! A profile is the row-major pixel sequence of a small rendition of an image
//! (either one grid cell of the target or one candidate tile). Profiles exist
//! purely for comparison; full-resolution pixel data is kept separately for
//! compositing.

/// One RGB pixel with 8-bit channels
pub type Pixel = [u8; 3];

/// Ordered row-major sequence of downsampled pixels
///
/// All profiles compared against each other must have identical length. The
/// length is `profile_dim * profile_dim` for every profile produced by one
/// run's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorProfile {
    pixels: Vec<Pixel>,
}

impl ColorProfile {
    /// Wrap a row-major pixel sequence
    pub fn new(pixels: Vec<Pixel>) -> Self {
        Self { pixels }
    }

    /// Number of pixels in the profile
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check whether the profile contains no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Iterate over the pixels in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, Pixel> {
        self.pixels.iter()
    }

    /// Squared-Euclidean RGB distance to another profile, pruned at `bound`
    ///
    /// Accumulates the sum of squared per-channel differences over aligned
    /// pixel pairs. As soon as the running sum exceeds `bound` the partial sum
    /// is returned immediately; callers only ever compare the result against
    /// `bound`, so the early exit is a pruning shortcut rather than an
    /// approximation. Both profiles must have the same length.
    pub fn distance_within(&self, other: &Self, bound: u64) -> u64 {
        debug_assert_eq!(self.len(), other.len(), "profile lengths must match");

        let mut sum: u64 = 0;
        for (a, b) in self.pixels.iter().zip(other.pixels.iter()) {
            for (ca, cb) in a.iter().zip(b.iter()) {
                let d = i64::from(*ca) - i64::from(*cb);
                sum += (d * d) as u64;
            }
            if sum > bound {
                return sum;
            }
        }
        sum
    }
}

impl<'a> IntoIterator for &'a ColorProfile {
    type Item = &'a Pixel;
    type IntoIter = std::slice::Iter<'a, Pixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
