//! Mutable heightmap buffer exchanged with a terrain sink.

/// Row-major 2D height array, addressed as `(x, y)` = `(column, row)`.
///
/// Values are nominally in `[0, 1]`; the buffer itself does not clamp.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightBuffer {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl HeightBuffer {
    /// A buffer of the given resolution filled with zeros.
    pub fn zeroed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Wrap existing row-major data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "height buffer of {width}x{height} needs {} values",
            width * height
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Columns per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Height at column `x`, row `y`. Panics when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Overwrite the height at column `x`, row `y`.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Heights of row `y`, west to east.
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Mutable heights of row `y`.
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// `(min, max, mean)` over all cells, or `None` for an empty buffer.
    pub fn stats(&self) -> Option<(f32, f32, f32)> {
        if self.data.is_empty() {
            return None;
        }
        let (min, max, sum) = self
            .data
            .iter()
            .fold((f32::MAX, f32::MIN, 0.0f64), |(lo, hi, sum), &v| {
                (lo.min(v), hi.max(v), sum + v as f64)
            });
        Some((min, max, (sum / self.data.len() as f64) as f32))
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} height buffer",
            self.width,
            self.height
        );
        y * self.width + x
    }
}
