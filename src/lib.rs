// scroll_motion: Rust/WASM spring engine for scroll-linked page animations.
// All numeric state and decisions live here; JS is plumbing (rAF, clock, DOM reads and writes).

mod animator;
mod error;
mod presets;
mod progress;
mod spring;
mod transform;
mod types;

pub mod scenes;

use wasm_bindgen::prelude::*;

pub use animator::{
    Animator, AnimatorConfig, Binding, DriverState, Frame, GeometrySnapshot, GeometrySource,
    ResponsiveStages, StyleWrite, Track, TrackConfig, WasmAnimator, MAX_FRAME_DELTA_MS,
    MAX_SUBSTEPS_PER_FRAME, MAX_SUBSTEP_MS,
};
pub use error::MotionError;
pub use presets::{SpringPresets, SpringSpec};
pub use progress::{
    card_scroll_progress, card_scroll_progress_start_center, grid_scroll_progress,
    image_scroll_progress, map_scroll_progress, progress_to_scale, scroll_progress,
    scroll_progress_center, OffsetPoint, ScrollOffset,
};
pub use spring::{Spring, SpringConfig, SETTLE_EPSILON};
pub use transform::{transform_progress, RangeTransform};
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Clamped range transform for one-off use from page scripts.
#[wasm_bindgen(js_name = transformProgress)]
pub fn transform_progress_js(
    progress: f64,
    input_min: f64,
    input_max: f64,
    output_min: f64,
    output_max: f64,
) -> f64 {
    transform_progress(progress, [input_min, input_max], [output_min, output_max])
}

/// Tip image zoom curve (0.8 → 1.0).
#[wasm_bindgen(js_name = progressToScale)]
pub fn progress_to_scale_js(progress: f64) -> f64 {
    progress_to_scale(progress)
}
