// Strong typing over strings. Newtypes for frame timestamps, geometry in CSS pixels.
// Everything here crosses the JS boundary as JSON.

use serde::{Deserialize, Serialize};

/// Frame timestamp in milliseconds, as handed out by `performance.now()`
/// or the `requestAnimationFrame` callback argument.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
pub struct FrameTime(f64);

impl FrameTime {
    pub fn from_millis(ms: f64) -> Self {
        FrameTime(ms)
    }

    pub fn as_millis(&self) -> f64 {
        self.0
    }

    pub fn as_secs(&self) -> f64 {
        self.0 / 1000.0
    }

    /// Milliseconds elapsed since `earlier`. May be negative or non-finite;
    /// callers sanitize.
    pub fn millis_since(&self, earlier: FrameTime) -> f64 {
        self.0 - earlier.0
    }
}

/// The slice of `getBoundingClientRect()` the progress functions read.
/// `top` is relative to the viewport top, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn new(top: f64, height: f64) -> Self {
        ElementRect { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Viewport size in CSS pixels (`innerWidth`, `innerHeight`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        ViewportSize { width, height }
    }
}

/// Tailwind width breakpoints the page layout switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    Base,
    Md,
    Lg,
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Base,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    /// Smallest viewport width, in CSS pixels, at which this breakpoint applies.
    pub fn min_width(&self) -> f64 {
        match self {
            Breakpoint::Base => 0.0,
            Breakpoint::Md => 768.0,
            Breakpoint::Lg => 1024.0,
            Breakpoint::Xl => 1280.0,
            Breakpoint::Xxl => 1536.0,
        }
    }

    /// Largest breakpoint whose minimum width `width` reaches.
    pub fn for_width(width: f64) -> Breakpoint {
        Breakpoint::ALL
            .into_iter()
            .rev()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::Base)
    }
}

/// Pixel box used by the service cards' collapsed and expanded image sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CardSize {
    pub width: f64,
    pub height: f64,
}

impl CardSize {
    pub fn new(width: f64, height: f64) -> Self {
        CardSize { width, height }
    }
}

/// Style property an animated value is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleProperty {
    TranslateX,
    TranslateY,
    Scale,
    ScaleX,
    Opacity,
    WidthPercent,
    WidthPx,
    HeightPx,
    PaddingBottomPx,
    /// `flex` while the value is positive, `none` otherwise.
    DisplayFlex,
    /// `flex-start` while the value is positive, cleared otherwise.
    JustifyFlexStart,
}

impl StyleProperty {
    /// CSS property name the value ends up in.
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::TranslateX
            | StyleProperty::TranslateY
            | StyleProperty::Scale
            | StyleProperty::ScaleX => "transform",
            StyleProperty::Opacity => "opacity",
            StyleProperty::WidthPercent | StyleProperty::WidthPx => "width",
            StyleProperty::HeightPx => "height",
            StyleProperty::PaddingBottomPx => "padding-bottom",
            StyleProperty::DisplayFlex => "display",
            StyleProperty::JustifyFlexStart => "justify-content",
        }
    }

    pub fn is_transform(&self) -> bool {
        self.css_name() == "transform"
    }

    /// Render a value as it would be assigned to `element.style`.
    pub fn render(&self, value: f64) -> String {
        match self {
            StyleProperty::TranslateX => format!("translateX({}px)", value),
            StyleProperty::TranslateY => format!("translateY({}px)", value),
            StyleProperty::Scale => format!("scale({})", value),
            StyleProperty::ScaleX => format!("scaleX({})", value),
            StyleProperty::Opacity => format!("{}", value),
            StyleProperty::WidthPercent => format!("{}%", value),
            StyleProperty::WidthPx | StyleProperty::HeightPx | StyleProperty::PaddingBottomPx => {
                format!("{}px", value)
            }
            StyleProperty::DisplayFlex => {
                String::from(if value > 0.0 { "flex" } else { "none" })
            }
            StyleProperty::JustifyFlexStart => {
                String::from(if value > 0.0 { "flex-start" } else { "" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_time_conversions() {
        let t = FrameTime::from_millis(1500.0);
        assert_eq!(t.as_millis(), 1500.0);
        assert!((t.as_secs() - 1.5).abs() < 1e-12);
        assert_eq!(t.millis_since(FrameTime::from_millis(1000.0)), 500.0);
    }

    #[test]
    fn rect_edges() {
        let rect = ElementRect::new(100.0, 50.0);
        assert_eq!(rect.bottom(), 150.0);
        assert_eq!(rect.center(), 125.0);
    }

    #[test]
    fn property_rendering() {
        assert_eq!(StyleProperty::TranslateY.render(110.0), "translateY(110px)");
        assert_eq!(StyleProperty::ScaleX.render(0.85), "scaleX(0.85)");
        assert_eq!(StyleProperty::WidthPercent.render(60.0), "60%");
        assert_eq!(StyleProperty::Opacity.render(0.3), "0.3");
        assert_eq!(StyleProperty::PaddingBottomPx.css_name(), "padding-bottom");
        assert!(StyleProperty::Scale.is_transform());
        assert!(!StyleProperty::HeightPx.is_transform());
    }

    #[test]
    fn threshold_properties() {
        assert_eq!(StyleProperty::DisplayFlex.render(0.2), "flex");
        assert_eq!(StyleProperty::DisplayFlex.render(0.0), "none");
        assert_eq!(StyleProperty::DisplayFlex.css_name(), "display");
        assert_eq!(StyleProperty::JustifyFlexStart.render(1.0), "flex-start");
        assert_eq!(StyleProperty::JustifyFlexStart.render(0.0), "");
        assert!(!StyleProperty::JustifyFlexStart.is_transform());
    }

    #[test]
    fn breakpoint_from_width() {
        assert_eq!(Breakpoint::for_width(375.0), Breakpoint::Base);
        assert_eq!(Breakpoint::for_width(768.0), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(1279.9), Breakpoint::Lg);
        assert_eq!(Breakpoint::for_width(1280.0), Breakpoint::Xl);
        assert_eq!(Breakpoint::for_width(1920.0), Breakpoint::Xxl);
        assert_eq!(Breakpoint::for_width(f64::NAN), Breakpoint::Base);
        assert_eq!(serde_json::to_string(&Breakpoint::Xxl).unwrap(), "\"2xl\"");
    }

    #[test]
    fn property_serde_names() {
        let json = serde_json::to_string(&StyleProperty::TranslateY).unwrap();
        assert_eq!(json, "\"translate_y\"");
        let parsed: StyleProperty = serde_json::from_str("\"width_percent\"").unwrap();
        assert_eq!(parsed, StyleProperty::WidthPercent);
    }
}
