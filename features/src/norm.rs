//! Block normalization schemes.
//!
//! See <https://en.wikipedia.org/wiki/Histogram_of_oriented_gradients#Block_normalization>

/// Keeps a zero-energy block from dividing by zero.
pub const EPSILON: f32 = 1e-6;

/// Normalization applied to each concatenated block histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockNorm {
    /// Divide by the sum of elements.
    L1,
    /// L1, then elementwise square root.
    L1Sqrt,
    /// Divide by the Euclidean norm.
    L2,
    /// L2, clip to 0.2, L2 again.
    L2Hys,
    /// Leave the histogram untouched.
    None,
}

impl BlockNorm {
    pub fn apply(self, v: &mut [f32]) {
        match self {
            BlockNorm::L1 => l1(v),
            BlockNorm::L1Sqrt => {
                l1(v);
                for x in v.iter_mut() {
                    *x = x.sqrt();
                }
            }
            BlockNorm::L2 => l2(v),
            BlockNorm::L2Hys => {
                l2(v);
                for x in v.iter_mut() {
                    *x = x.clamp(0.0, 0.2);
                }
                l2(v);
            }
            BlockNorm::None => {}
        }
    }
}

fn l1(v: &mut [f32]) {
    let den = v.iter().sum::<f32>() + EPSILON;
    for x in v.iter_mut() {
        *x /= den;
    }
}

fn l2(v: &mut [f32]) {
    let den = (v.iter().map(|x| x * x).sum::<f32>() + EPSILON).sqrt();
    for x in v.iter_mut() {
        *x /= den;
    }
}
