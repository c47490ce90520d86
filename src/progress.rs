// Scroll progress from live geometry: two-point offsets in the Framer Motion style.
// Pure functions of the current rect and viewport, recomputed every frame.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MotionError;
use crate::types::{ElementRect, ViewportSize};

/// Where an element line meets a viewport line.
/// Both are fractions: 0 = start (top), 0.5 = center, 1 = end (bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetPoint {
    pub element: f64,
    pub viewport: f64,
}

impl OffsetPoint {
    pub const fn new(element: f64, viewport: f64) -> Self {
        OffsetPoint { element, viewport }
    }

    /// Element top (relative to the viewport) at which this point holds.
    fn element_top_at(&self, element_height: f64, viewport_height: f64) -> f64 {
        self.viewport * viewport_height - self.element * element_height
    }
}

impl FromStr for OffsetPoint {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| MotionError::InvalidOffset {
            input: s.to_string(),
            message: message.to_string(),
        };

        let mut parts = s.split_whitespace();
        let element = parts.next().ok_or_else(|| invalid("empty offset"))?;
        let viewport = parts
            .next()
            .ok_or_else(|| invalid("expected \"<element> <viewport>\""))?;
        if parts.next().is_some() {
            return Err(invalid("expected exactly two edges"));
        }

        let element = parse_edge(element).ok_or_else(|| invalid("unknown element edge"))?;
        let viewport = parse_edge(viewport).ok_or_else(|| invalid("unknown viewport edge"))?;
        Ok(OffsetPoint { element, viewport })
    }
}

fn parse_edge(word: &str) -> Option<f64> {
    match word {
        "start" => Some(0.0),
        "center" => Some(0.5),
        "end" => Some(1.0),
        other => other.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

fn edge_name(value: f64) -> String {
    if value == 0.0 {
        "start".to_string()
    } else if value == 0.5 {
        "center".to_string()
    } else if value == 1.0 {
        "end".to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for OffsetPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", edge_name(self.element), edge_name(self.viewport))
    }
}

/// Progress is 0 when `from` holds and 1 when `to` holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[String; 2]", into = "[String; 2]")]
pub struct ScrollOffset {
    pub from: OffsetPoint,
    pub to: OffsetPoint,
}

impl ScrollOffset {
    pub const fn new(from: OffsetPoint, to: OffsetPoint) -> Self {
        ScrollOffset { from, to }
    }

    /// `['start end', 'start center']`
    pub const START_END_TO_START_CENTER: ScrollOffset =
        ScrollOffset::new(OffsetPoint::new(0.0, 1.0), OffsetPoint::new(0.0, 0.5));
    /// `['center end', 'center center']`
    pub const CENTER_END_TO_CENTER_CENTER: ScrollOffset =
        ScrollOffset::new(OffsetPoint::new(0.5, 1.0), OffsetPoint::new(0.5, 0.5));
    /// `['start end', 'end end']`
    pub const START_END_TO_END_END: ScrollOffset =
        ScrollOffset::new(OffsetPoint::new(0.0, 1.0), OffsetPoint::new(1.0, 1.0));
    /// `['start end', 'center center']`
    pub const START_END_TO_CENTER_CENTER: ScrollOffset =
        ScrollOffset::new(OffsetPoint::new(0.0, 1.0), OffsetPoint::new(0.5, 0.5));
    /// `['start end', 'start 0.3']`
    pub const START_END_TO_START_30: ScrollOffset =
        ScrollOffset::new(OffsetPoint::new(0.0, 1.0), OffsetPoint::new(0.0, 0.3));

    /// Parse a pair such as `("start end", "end end")`.
    pub fn parse(from: &str, to: &str) -> Result<Self, MotionError> {
        Ok(ScrollOffset {
            from: from.parse()?,
            to: to.parse()?,
        })
    }

    /// Normalized progress in [0, 1]. Degenerate geometry yields 0.
    pub fn progress(&self, rect: ElementRect, viewport: ViewportSize) -> f64 {
        let at_zero = self.from.element_top_at(rect.height, viewport.height);
        let at_one = self.to.element_top_at(rect.height, viewport.height);
        let span = at_zero - at_one;

        if span == 0.0 || !span.is_finite() {
            return 0.0;
        }

        let progress = (at_zero - rect.top) / span;
        if progress.is_nan() {
            return 0.0;
        }
        progress.clamp(0.0, 1.0)
    }
}

impl TryFrom<[String; 2]> for ScrollOffset {
    type Error = MotionError;

    fn try_from([from, to]: [String; 2]) -> Result<Self, Self::Error> {
        ScrollOffset::parse(&from, &to)
    }
}

impl From<ScrollOffset> for [String; 2] {
    fn from(offset: ScrollOffset) -> Self {
        [offset.from.to_string(), offset.to.to_string()]
    }
}

/// Section reveal: top edge travels from viewport bottom to viewport middle.
pub fn scroll_progress(rect: ElementRect, viewport: ViewportSize) -> f64 {
    ScrollOffset::START_END_TO_START_CENTER.progress(rect, viewport)
}

/// Element center travels from viewport bottom to viewport center.
pub fn scroll_progress_center(rect: ElementRect, viewport: ViewportSize) -> f64 {
    ScrollOffset::CENTER_END_TO_CENTER_CENTER.progress(rect, viewport)
}

/// Element scrolls fully in from the bottom edge.
pub fn grid_scroll_progress(rect: ElementRect, viewport: ViewportSize) -> f64 {
    ScrollOffset::START_END_TO_END_END.progress(rect, viewport)
}

pub fn card_scroll_progress(rect: ElementRect, viewport: ViewportSize) -> f64 {
    ScrollOffset::START_END_TO_CENTER_CENTER.progress(rect, viewport)
}

pub fn card_scroll_progress_start_center(rect: ElementRect, viewport: ViewportSize) -> f64 {
    ScrollOffset::START_END_TO_START_CENTER.progress(rect, viewport)
}

pub fn map_scroll_progress(rect: ElementRect, viewport: ViewportSize) -> f64 {
    ScrollOffset::START_END_TO_START_30.progress(rect, viewport)
}

/// Progress of the card enclosing a scaled image; `rect` is the card's.
pub fn image_scroll_progress(card_rect: ElementRect, viewport: ViewportSize) -> f64 {
    ScrollOffset::START_END_TO_START_CENTER.progress(card_rect, viewport)
}

/// Image zoom curve: 0.8 at the bottom edge, full size from 65% progress on.
pub fn progress_to_scale(progress: f64) -> f64 {
    if progress.is_nan() || progress <= 0.0 {
        return 0.8;
    }
    if progress >= 0.65 {
        return 1.0;
    }
    0.8 + 0.2 * (progress / 0.65)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: ViewportSize = ViewportSize {
        width: 1280.0,
        height: 800.0,
    };

    #[test]
    fn entering_at_bottom_is_zero() {
        let rect = ElementRect::new(800.0, 400.0);
        assert_eq!(scroll_progress(rect, VIEWPORT), 0.0);
        assert_eq!(grid_scroll_progress(rect, VIEWPORT), 0.0);
        assert_eq!(card_scroll_progress(rect, VIEWPORT), 0.0);
        assert_eq!(card_scroll_progress_start_center(rect, VIEWPORT), 0.0);
        assert_eq!(map_scroll_progress(rect, VIEWPORT), 0.0);
        assert_eq!(image_scroll_progress(rect, VIEWPORT), 0.0);
    }

    #[test]
    fn top_aligned_is_one_for_start_center() {
        let rect = ElementRect::new(0.0, 400.0);
        assert_eq!(scroll_progress(rect, VIEWPORT), 1.0);
        assert_eq!(card_scroll_progress_start_center(rect, VIEWPORT), 1.0);
    }

    #[test]
    fn halfway_to_center() {
        // Top at 600: a quarter viewport above the bottom, half-way to the middle.
        let rect = ElementRect::new(600.0, 400.0);
        assert!((scroll_progress(rect, VIEWPORT) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn grid_progress_tracks_height() {
        let rect = ElementRect::new(700.0, 200.0);
        assert!((grid_scroll_progress(rect, VIEWPORT) - 0.5).abs() < 1e-12);
        let rect = ElementRect::new(600.0, 200.0);
        assert_eq!(grid_scroll_progress(rect, VIEWPORT), 1.0);
    }

    #[test]
    fn center_progress_uses_element_center() {
        // Center at 600 is half-way between bottom (800) and middle (400).
        let rect = ElementRect::new(500.0, 200.0);
        assert!((scroll_progress_center(rect, VIEWPORT) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn card_progress_ends_with_centered_card() {
        let rect = ElementRect::new(300.0, 200.0);
        assert_eq!(card_scroll_progress(rect, VIEWPORT), 1.0);
        let rect = ElementRect::new(550.0, 200.0);
        assert!((card_scroll_progress(rect, VIEWPORT) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn map_progress_ends_at_thirty_percent() {
        let rect = ElementRect::new(240.0, 600.0);
        assert!((map_scroll_progress(rect, VIEWPORT) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_height_grid_is_neutral() {
        let rect = ElementRect::new(100.0, 0.0);
        assert_eq!(grid_scroll_progress(rect, VIEWPORT), 0.0);
    }

    #[test]
    fn zero_viewport_is_neutral() {
        let rect = ElementRect::new(100.0, 50.0);
        assert_eq!(scroll_progress(rect, ViewportSize::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn image_scale_curve() {
        assert_eq!(progress_to_scale(0.0), 0.8);
        assert_eq!(progress_to_scale(-1.0), 0.8);
        assert_eq!(progress_to_scale(0.65), 1.0);
        assert_eq!(progress_to_scale(2.0), 1.0);
        assert!((progress_to_scale(0.325) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn parses_keywords_and_numbers() {
        let offset = ScrollOffset::parse("start end", "start 0.3").unwrap();
        assert_eq!(offset, ScrollOffset::START_END_TO_START_30);

        let offset = ScrollOffset::parse("center end", "center center").unwrap();
        assert_eq!(offset, ScrollOffset::CENTER_END_TO_CENTER_CENTER);
    }

    #[test]
    fn rejects_bad_offsets() {
        assert!("middle end".parse::<OffsetPoint>().is_err());
        assert!("start".parse::<OffsetPoint>().is_err());
        assert!("start end extra".parse::<OffsetPoint>().is_err());
        assert!("start NaN".parse::<OffsetPoint>().is_err());
        assert!("".parse::<OffsetPoint>().is_err());
    }

    #[test]
    fn serde_uses_string_pairs() {
        let json = serde_json::to_string(&ScrollOffset::START_END_TO_END_END).unwrap();
        assert_eq!(json, r#"["start end","end end"]"#);

        let parsed: ScrollOffset = serde_json::from_str(r#"["start end", "start 0.3"]"#).unwrap();
        assert_eq!(parsed, ScrollOffset::START_END_TO_START_30);

        let bad: Result<ScrollOffset, _> = serde_json::from_str(r#"["top end", "end end"]"#);
        assert!(bad.is_err());
    }

    fn offsets() -> impl Strategy<Value = ScrollOffset> {
        prop_oneof![
            Just(ScrollOffset::START_END_TO_START_CENTER),
            Just(ScrollOffset::CENTER_END_TO_CENTER_CENTER),
            Just(ScrollOffset::START_END_TO_END_END),
            Just(ScrollOffset::START_END_TO_CENTER_CENTER),
            Just(ScrollOffset::START_END_TO_START_30),
        ]
    }

    proptest! {
        #[test]
        fn progress_stays_in_unit_range(
            offset in offsets(),
            top in -1.0e9f64..1.0e9,
            height in 0.0f64..1.0e6,
            viewport_height in 0.0f64..1.0e5,
        ) {
            let p = offset.progress(
                ElementRect::new(top, height),
                ViewportSize::new(1280.0, viewport_height),
            );
            prop_assert!((0.0..=1.0).contains(&p), "progress {} out of range", p);
        }

        #[test]
        fn infinite_geometry_stays_in_unit_range(
            offset in offsets(),
            top in prop_oneof![Just(f64::INFINITY), Just(f64::NEG_INFINITY), Just(f64::NAN)],
        ) {
            let p = offset.progress(ElementRect::new(top, 100.0), VIEWPORT);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
