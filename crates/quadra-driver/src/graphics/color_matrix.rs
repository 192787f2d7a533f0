/// A 4x5 color transform: `out = body * rgba + translation`.
///
/// Rows are output channels (r, g, b, a); the fifth column is the translation.
/// The matrix operates on non-premultiplied color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorMatrix {
    body: [[f32; 4]; 4],
    translation: [f32; 4],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorMatrix {
    #[inline]
    pub const fn new(body: [[f32; 4]; 4], translation: [f32; 4]) -> Self {
        Self { body, translation }
    }

    pub const fn identity() -> Self {
        Self::new(
            [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            [0.0; 4],
        )
    }

    /// Per-channel scale.
    pub const fn scale(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(
            [
                [r, 0.0, 0.0, 0.0],
                [0.0, g, 0.0, 0.0],
                [0.0, 0.0, b, 0.0],
                [0.0, 0.0, 0.0, a],
            ],
            [0.0; 4],
        )
    }

    /// Per-channel offset.
    pub const fn translate(r: f32, g: f32, b: f32, a: f32) -> Self {
        let mut m = Self::identity();
        m.translation = [r, g, b, a];
        m
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Returns `other` applied after `self`.
    pub fn then(&self, other: &ColorMatrix) -> ColorMatrix {
        let mut body = [[0.0f32; 4]; 4];
        let mut translation = [0.0f32; 4];
        for row in 0..4 {
            for col in 0..4 {
                body[row][col] = (0..4).map(|k| other.body[row][k] * self.body[k][col]).sum();
            }
            translation[row] = (0..4)
                .map(|k| other.body[row][k] * self.translation[k])
                .sum::<f32>()
                + other.translation[row];
        }
        ColorMatrix { body, translation }
    }

    /// Applies the transform to a single non-premultiplied color.
    pub fn apply(&self, rgba: [f32; 4]) -> [f32; 4] {
        let mut out = self.translation;
        for (row, o) in out.iter_mut().enumerate() {
            *o += (0..4).map(|k| self.body[row][k] * rgba[k]).sum::<f32>();
        }
        out
    }

    /// Body in column-major order, as a WGSL `mat4x4<f32>` expects.
    pub fn body_columns(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = self.body[row][col];
            }
        }
        out
    }

    #[inline]
    pub fn translation(&self) -> [f32; 4] {
        self.translation
    }
}
