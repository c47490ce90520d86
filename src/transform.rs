// Piecewise-linear remap of progress into pixels, opacity or scale.

use serde::{Deserialize, Serialize};

/// Maps `input` onto `output`. Clamped transforms hold the output bounds
/// outside the input range; unclamped ones extrapolate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeTransform {
    pub input: [f64; 2],
    pub output: [f64; 2],
    #[serde(default = "default_clamp")]
    pub clamp: bool,
}

fn default_clamp() -> bool {
    true
}

impl RangeTransform {
    pub fn new(input: [f64; 2], output: [f64; 2]) -> Self {
        RangeTransform {
            input,
            output,
            clamp: true,
        }
    }

    pub fn unclamped(input: [f64; 2], output: [f64; 2]) -> Self {
        RangeTransform {
            input,
            output,
            clamp: false,
        }
    }

    pub fn identity() -> Self {
        RangeTransform::new([0.0, 1.0], [0.0, 1.0])
    }

    pub fn apply(&self, progress: f64) -> f64 {
        let [in_min, in_max] = self.input;
        let [out_min, out_max] = self.output;

        if progress.is_nan() {
            return out_min;
        }

        let span = in_max - in_min;
        if self.clamp || span == 0.0 || !span.is_finite() {
            if progress <= in_min {
                return out_min;
            }
            if progress >= in_max {
                return out_max;
            }
            if span == 0.0 || !span.is_finite() {
                return out_min;
            }
        }

        let normalized = (progress - in_min) / span;
        out_min + normalized * (out_max - out_min)
    }
}

/// Clamped remap, the form every page script calls.
pub fn transform_progress(progress: f64, input: [f64; 2], output: [f64; 2]) -> f64 {
    RangeTransform::new(input, output).apply(progress)
}
