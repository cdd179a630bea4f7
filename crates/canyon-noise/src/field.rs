//! Row-major 2D scalar grids produced by the generator.

/// Un-normalized fractal sums together with the observed value range.
///
/// The range of a raw sum depends on the octave count and persistence, so it
/// is only meaningful after [`normalize`](Self::normalize).
#[derive(Clone, Debug)]
pub struct RawField {
    width: usize,
    height: usize,
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl RawField {
    /// Build a raw field, scanning `values` for its range.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != width * height`.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            width * height,
            "raw field of {width}x{height} needs {} values",
            width * height
        );
        let (min, max) = values
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Self {
            width,
            height,
            values,
            min,
            max,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw sum at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// `(min, max)` over all cells. `(f64::MAX, f64::MIN)` for an empty field.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Inverse-lerp every cell from the observed range into `[0, 1]`.
    ///
    /// When every cell holds the same value the result is all zeros.
    pub fn normalize(self) -> NoiseField {
        let span = self.max - self.min;
        let values = if span > 0.0 {
            self.values
                .iter()
                .map(|&v| ((v - self.min) / span) as f32)
                .collect()
        } else {
            vec![0.0; self.values.len()]
        };

        NoiseField {
            width: self.width,
            height: self.height,
            values,
        }
    }
}

/// A normalized noise field: every cell lies in `[0, 1]`.
///
/// Cells are stored row-major and addressed as `(x, y)` = `(column, row)`.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl NoiseField {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Value at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.values[y * self.width + x]
    }

    /// One row of the field, `width` cells long.
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.width;
        &self.values[start..start + self.width]
    }

    /// All cells, row-major.
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}
