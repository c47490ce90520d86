// Per-subject animation driver: Idle/Scheduled state machine over a set of springs.
// JS owns requestAnimationFrame, the clock and the DOM; this decides what to write and
// whether another frame is needed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use wasm_bindgen::prelude::*;

use crate::error::MotionError;
use crate::presets::{SpringPresets, SpringSpec};
use crate::progress::ScrollOffset;
use crate::spring::{Spring, SpringConfig};
use crate::transform::RangeTransform;
use crate::types::{ElementRect, FrameTime, StyleProperty, ViewportSize};

/// Longest frame the integrator will see, e.g. after the tab was backgrounded.
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

/// Longest single Euler step. Longer frames are split.
pub const MAX_SUBSTEP_MS: f64 = 20.0;

/// Upper bound on Euler steps per frame that a limits pair may imply.
pub const MAX_SUBSTEPS_PER_FRAME: f64 = 64.0;

/// Live layout, read once per frame.
pub trait GeometrySource {
    fn viewport(&self) -> ViewportSize;

    /// Bounding rect of an observed element; `None` once it left the document.
    fn rect(&self, element: &str) -> Option<ElementRect>;
}

/// Geometry gathered by JS for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub viewport: ViewportSize,
    #[serde(default)]
    pub rects: HashMap<String, ElementRect>,
}

impl GeometrySnapshot {
    pub fn new(viewport: ViewportSize) -> Self {
        GeometrySnapshot {
            viewport,
            rects: HashMap::new(),
        }
    }

    pub fn with_rect(mut self, element: &str, rect: ElementRect) -> Self {
        self.rects.insert(element.to_string(), rect);
        self
    }
}

impl GeometrySource for GeometrySnapshot {
    fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    fn rect(&self, element: &str) -> Option<ElementRect> {
        self.rects.get(element).copied()
    }
}

/// Writes a spring value, through a chain of range transforms, to one style property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub target: String,
    pub property: StyleProperty,
    pub stages: Vec<RangeTransform>,
    /// Stage chains that replace `stages` from a viewport width upwards.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responsive: Vec<ResponsiveStages>,
}

/// Stages used while the viewport is at least `min_width` CSS pixels wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveStages {
    pub min_width: f64,
    pub stages: Vec<RangeTransform>,
}

impl Binding {
    pub fn new(target: &str, property: StyleProperty, transform: RangeTransform) -> Self {
        Binding::chain(target, property, vec![transform])
    }

    pub fn chain(target: &str, property: StyleProperty, stages: Vec<RangeTransform>) -> Self {
        Binding {
            target: target.to_string(),
            property,
            stages,
            responsive: Vec::new(),
        }
    }

    /// Feed the output of the existing stages through `transform`.
    pub fn then(mut self, transform: RangeTransform) -> Self {
        self.stages.push(transform);
        self
    }

    /// Use `stages` instead once the viewport is `min_width` wide or wider.
    pub fn at_width(mut self, min_width: f64, stages: Vec<RangeTransform>) -> Self {
        self.responsive.push(ResponsiveStages { min_width, stages });
        self
    }

    /// The chain in effect at `viewport_width`: the widest matching entry wins.
    pub fn stages_at(&self, viewport_width: f64) -> &[RangeTransform] {
        self.responsive
            .iter()
            .filter(|r| viewport_width >= r.min_width)
            .max_by(|a, b| a.min_width.total_cmp(&b.min_width))
            .map_or(&self.stages, |r| &r.stages)
    }

    pub fn apply(&self, value: f64, viewport_width: f64) -> f64 {
        self.stages_at(viewport_width)
            .iter()
            .fold(value, |v, stage| stage.apply(v))
    }
}

/// One spring following the scroll progress of one element.
#[derive(Debug, Clone)]
pub struct Track {
    element: String,
    offset: ScrollOffset,
    spring: Spring,
    target_map: Option<RangeTransform>,
    seed_from_geometry: bool,
    seeded: bool,
    bindings: Vec<Binding>,
}

impl Track {
    pub fn new(element: &str, offset: ScrollOffset, config: SpringConfig) -> Self {
        Track {
            element: element.to_string(),
            offset,
            spring: Spring::new(config),
            target_map: None,
            seed_from_geometry: false,
            seeded: false,
            bindings: Vec::new(),
        }
    }

    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Remap raw progress before it becomes the spring target.
    pub fn with_target_map(mut self, transform: RangeTransform) -> Self {
        self.target_map = Some(transform);
        self
    }

    /// Start the spring at rest on whatever the first frame's geometry says,
    /// so elements already in view do not animate in on load.
    pub fn seeded_from_geometry(mut self) -> Self {
        self.seed_from_geometry = true;
        self
    }

    pub fn with_initial(mut self, value: f64) -> Self {
        self.spring = Spring::with_value(self.spring.config(), value);
        self
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    pub fn spring(&self) -> &Spring {
        &self.spring
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    fn target_for(&self, rect: ElementRect, viewport: ViewportSize) -> f64 {
        let raw = self.offset.progress(rect, viewport);
        match &self.target_map {
            Some(transform) => transform.apply(raw),
            None => raw,
        }
    }

    fn step(
        &mut self,
        rect: ElementRect,
        viewport: ViewportSize,
        delta_ms: f64,
        max_substep_ms: f64,
    ) -> f64 {
        let target = self.target_for(rect, viewport);
        if self.seed_from_geometry && !self.seeded {
            self.spring.snap_to(target);
        }
        self.seeded = true;
        self.spring.set_target(target);

        let steps = (delta_ms / max_substep_ms).ceil().max(1.0) as u32;
        let step_ms = delta_ms / steps as f64;
        for _ in 0..steps {
            self.spring.update(step_ms);
        }
        self.spring.value()
    }
}

/// A single `element.style` assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleWrite {
    pub target: String,
    pub property: String,
    pub value: String,
}

/// Result of one animation-frame callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub writes: Vec<StyleWrite>,
    /// Request another animation frame.
    pub keep_running: bool,
}

impl Frame {
    /// Value written to `target.style[property]` in this frame, if any.
    pub fn value_of(&self, target: &str, property: &str) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.target == target && w.property == property)
            .map(|w| w.value.as_str())
    }
}

#[derive(Default)]
struct StyleWriter {
    writes: Vec<StyleWrite>,
}

impl StyleWriter {
    fn push(&mut self, target: &str, property: StyleProperty, value: f64) {
        let rendered = property.render(value);

        // Transform functions on one element share a single declaration.
        if property.is_transform() {
            if let Some(existing) = self
                .writes
                .iter_mut()
                .find(|w| w.target == target && w.property == "transform")
            {
                existing.value.push(' ');
                existing.value.push_str(&rendered);
                return;
            }
        }

        self.writes.push(StyleWrite {
            target: target.to_string(),
            property: property.css_name().to_string(),
            value: rendered,
        });
    }

    fn finish(self) -> Vec<StyleWrite> {
        self.writes
    }
}

/// Scheduling state of one animated subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No animation frame outstanding.
    Idle,
    /// One animation frame requested and not yet delivered.
    Scheduled,
}

/// Drives every spring of one animated subject from a shared frame tick.
#[derive(Debug, Clone)]
pub struct Animator {
    name: String,
    tracks: Vec<Track>,
    state: DriverState,
    last_time: Option<FrameTime>,
    max_delta_ms: f64,
    max_substep_ms: f64,
}

impl Animator {
    pub fn new(name: &str) -> Self {
        Animator {
            name: name.to_string(),
            tracks: Vec::new(),
            state: DriverState::Idle,
            last_time: None,
            max_delta_ms: MAX_FRAME_DELTA_MS,
            max_substep_ms: MAX_SUBSTEP_MS,
        }
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn push_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Override the frame delta cap and the Euler step length. The pair may
    /// not imply more than [`MAX_SUBSTEPS_PER_FRAME`] steps per frame.
    pub fn with_limits(
        mut self,
        max_delta_ms: f64,
        max_substep_ms: f64,
    ) -> Result<Self, MotionError> {
        check_positive("max_delta_ms", max_delta_ms)?;
        check_positive("max_substep_ms", max_substep_ms)?;
        if max_delta_ms / max_substep_ms > MAX_SUBSTEPS_PER_FRAME {
            return Err(MotionError::InvalidConfig(format!(
                "max_delta_ms {} over max_substep_ms {} exceeds {} substeps per frame",
                max_delta_ms, max_substep_ms, MAX_SUBSTEPS_PER_FRAME
            )));
        }
        self.max_delta_ms = max_delta_ms;
        self.max_substep_ms = max_substep_ms;
        Ok(self)
    }

    pub fn from_config(
        config: &AnimatorConfig,
        presets: &SpringPresets,
    ) -> Result<Self, MotionError> {
        let mut table = presets.clone();
        if let Some(overrides) = &config.presets {
            table.merge(overrides.clone())?;
        }

        let mut animator =
            Animator::new(&config.name).with_limits(config.max_delta_ms, config.max_substep_ms)?;

        for track_config in &config.tracks {
            animator.push_track(track_config.build(&table)?);
        }

        debug!(
            animator = %animator.name,
            tracks = animator.tracks.len(),
            "animator configured"
        );
        Ok(animator)
    }

    /// Parse an [`AnimatorConfig`] and resolve it against the built-in presets.
    pub fn from_json(config_json: &str) -> Result<Self, MotionError> {
        let config: AnimatorConfig = serde_json::from_str(config_json)?;
        Animator::from_config(&config, &SpringPresets::default())
    }

    /// Scroll or resize happened. Returns `true` when the caller must request an
    /// animation frame; `false` while one is already outstanding.
    pub fn request_frame(&mut self, now: FrameTime) -> bool {
        match self.state {
            DriverState::Scheduled => false,
            DriverState::Idle if self.tracks.is_empty() => false,
            DriverState::Idle => {
                self.state = DriverState::Scheduled;
                self.last_time = Some(now);
                debug!(animator = %self.name, "frame scheduled");
                true
            }
        }
    }

    /// Animation-frame callback body.
    pub fn frame<G>(&mut self, now: FrameTime, geometry: &G) -> Frame
    where
        G: GeometrySource + ?Sized,
    {
        let delta_ms = self.frame_delta(now);
        self.last_time = Some(now);

        let viewport = geometry.viewport();
        let max_substep_ms = self.max_substep_ms;
        let name = &self.name;
        let mut writer = StyleWriter::default();
        let mut settled = true;

        self.tracks.retain_mut(|track| {
            let Some(rect) = geometry.rect(&track.element) else {
                debug!(
                    animator = %name,
                    element = %track.element,
                    "element detached, dropping track"
                );
                return false;
            };

            let value = track.step(rect, viewport, delta_ms, max_substep_ms);
            for binding in &track.bindings {
                let styled = binding.apply(value, viewport.width);
                writer.push(&binding.target, binding.property, styled);
            }
            settled &= track.spring.is_settled();
            true
        });

        let keep_running = !settled && !self.tracks.is_empty();
        self.state = if keep_running {
            DriverState::Scheduled
        } else {
            debug!(animator = %self.name, "settled");
            DriverState::Idle
        };

        trace!(
            animator = %self.name,
            delta_ms,
            tracks = self.tracks.len(),
            keep_running,
            "frame"
        );

        Frame {
            writes: writer.finish(),
            keep_running,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_settled(&self) -> bool {
        self.tracks.iter().all(|t| t.spring.is_settled())
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    fn frame_delta(&self, now: FrameTime) -> f64 {
        let Some(last) = self.last_time else {
            return 0.0;
        };
        let delta = now.millis_since(last);
        if delta.is_nan() || delta <= 0.0 {
            0.0
        } else {
            delta.min(self.max_delta_ms)
        }
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), MotionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MotionError::InvalidConfig(format!(
            "{} must be finite and positive, got {}",
            field, value
        )))
    }
}

// ============================================================================
// JSON configuration
// ============================================================================

/// Animator configuration passed from JS.
///
/// # Example
/// ```json
/// {
///   "name": "faq",
///   "tracks": [{
///     "element": "faqs-section",
///     "spring": "FAQ",
///     "offset": ["start end", "start center"],
///     "bindings": [
///       { "target": "faqs-section", "property": "translate_y",
///         "stages": [{ "input": [0, 0.7], "output": [220, 0] }] }
///     ]
///   }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimatorConfig {
    pub name: String,
    /// Preset overrides merged over the built-in table.
    #[serde(default)]
    pub presets: Option<SpringPresets>,
    #[serde(default = "default_max_delta_ms")]
    pub max_delta_ms: f64,
    #[serde(default = "default_max_substep_ms")]
    pub max_substep_ms: f64,
    pub tracks: Vec<TrackConfig>,
}

fn default_max_delta_ms() -> f64 {
    MAX_FRAME_DELTA_MS
}

fn default_max_substep_ms() -> f64 {
    MAX_SUBSTEP_MS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Key of the observed element in the per-frame geometry.
    pub element: String,
    pub spring: SpringSpec,
    pub offset: ScrollOffset,
    #[serde(default)]
    pub target_map: Option<RangeTransform>,
    #[serde(default)]
    pub seed_from_geometry: bool,
    #[serde(default)]
    pub initial: Option<f64>,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl TrackConfig {
    fn build(&self, presets: &SpringPresets) -> Result<Track, MotionError> {
        let config = self.spring.resolve(presets)?;
        let mut track = Track::new(&self.element, self.offset, config);

        if let Some(initial) = self.initial {
            track = track.with_initial(initial);
        }
        if let Some(transform) = self.target_map {
            track = track.with_target_map(transform);
        }
        if self.seed_from_geometry {
            track = track.seeded_from_geometry();
        }
        for binding in &self.bindings {
            let empty = binding.stages.is_empty()
                || binding.responsive.iter().any(|r| r.stages.is_empty());
            if empty {
                return Err(MotionError::InvalidConfig(format!(
                    "binding for {} on {} has no stages",
                    binding.target, self.element
                )));
            }
            if let Some(r) = binding.responsive.iter().find(|r| !r.min_width.is_finite()) {
                return Err(MotionError::InvalidConfig(format!(
                    "binding for {} on {} has min_width {}",
                    binding.target, self.element, r.min_width
                )));
            }
            track = track.with_binding(binding.clone());
        }
        Ok(track)
    }
}

// ============================================================================
// WASM surface
// ============================================================================

/// WASM-exposed animator. One instance per animated subject.
///
/// JS side per subject:
/// ```js
/// const anim = new WasmAnimator(configJson);
/// const onScroll = () => {
///   if (anim.request_frame(performance.now())) requestAnimationFrame(tick);
/// };
/// function tick(now) {
///   const frame = JSON.parse(anim.frame(now, JSON.stringify(readGeometry())));
///   applyWrites(frame.writes);
///   if (frame.keep_running) requestAnimationFrame(tick);
/// }
/// ```
#[wasm_bindgen]
pub struct WasmAnimator {
    inner: Animator,
}

#[wasm_bindgen]
impl WasmAnimator {
    /// Create an animator from an `AnimatorConfig` JSON string.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmAnimator, JsValue> {
        let inner = Animator::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid animator config: {}", e)))?;
        Ok(WasmAnimator { inner })
    }

    /// One of the site's built-in scenes, wired to its default element ids.
    #[wasm_bindgen]
    pub fn scene(name: &str) -> Result<WasmAnimator, JsValue> {
        let inner = crate::scenes::by_name(name, &SpringPresets::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmAnimator { inner })
    }

    /// Call from scroll and resize listeners.
    /// Returns `true` when JS must call `requestAnimationFrame`.
    #[wasm_bindgen]
    pub fn request_frame(&mut self, now_ms: f64) -> bool {
        self.inner.request_frame(FrameTime::from_millis(now_ms))
    }

    /// Run one frame against a `GeometrySnapshot` JSON string.
    /// Returns a `Frame` JSON string.
    #[wasm_bindgen]
    pub fn frame(&mut self, now_ms: f64, geometry_json: &str) -> Result<String, JsValue> {
        let geometry: GeometrySnapshot = serde_json::from_str(geometry_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid geometry: {}", e)))?;

        let frame = self.inner.frame(FrameTime::from_millis(now_ms), &geometry);

        serde_json::to_string(&frame)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen]
    pub fn is_settled(&self) -> bool {
        self.inner.is_settled()
    }

    #[wasm_bindgen]
    pub fn track_count(&self) -> usize {
        self.inner.track_count()
    }

    #[wasm_bindgen]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }
}
