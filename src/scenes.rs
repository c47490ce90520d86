// Ready-made animators for the site's scroll effects.
// Element keys are whatever JS uses to look elements up in the per-frame geometry.

use crate::animator::{Animator, Binding, Track};
use crate::error::MotionError;
use crate::presets::SpringPresets;
use crate::progress::ScrollOffset;
use crate::transform::RangeTransform;
use crate::types::{Breakpoint, CardSize, StyleProperty};

/// Map layout offset `(x, y)` in px per breakpoint, before the scroll rise.
pub const MAP_BASE_OFFSETS: [(Breakpoint, (f64, f64)); 5] = [
    (Breakpoint::Base, (-50.0, 0.0)),
    (Breakpoint::Md, (53.0, -100.0)),
    (Breakpoint::Lg, (183.0, -100.0)),
    (Breakpoint::Xl, (503.0, -50.0)),
    (Breakpoint::Xxl, (800.0, 0.0)),
];

/// Collapsed and expanded image box of a service card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSizes {
    pub small: CardSize,
    pub large: CardSize,
}

/// Service card image sizes. Anything narrower than `xl` uses the `lg` row.
pub const SERVICE_CARD_SIZES: [(Breakpoint, CardSizes); 3] = [
    (
        Breakpoint::Lg,
        CardSizes {
            small: CardSize {
                width: 350.0,
                height: 265.0,
            },
            large: CardSize {
                width: 700.0,
                height: 470.0,
            },
        },
    ),
    (
        Breakpoint::Xl,
        CardSizes {
            small: CardSize {
                width: 461.0,
                height: 365.0,
            },
            large: CardSize {
                width: 884.0,
                height: 545.0,
            },
        },
    ),
    (
        Breakpoint::Xxl,
        CardSizes {
            small: CardSize {
                width: 690.0,
                height: 485.0,
            },
            large: CardSize {
                width: 1090.0,
                height: 735.0,
            },
        },
    ),
];

/// Binding whose stage chain is picked by breakpoint. The first row also
/// covers every width below its own breakpoint.
fn per_breakpoint<T: Copy>(
    target: &str,
    property: StyleProperty,
    table: &[(Breakpoint, T)],
    stages: impl Fn(T) -> Vec<RangeTransform>,
) -> Binding {
    let mut rows = table.iter();
    let mut binding = match rows.next() {
        Some(&(_, first)) => Binding::chain(target, property, stages(first)),
        None => Binding::chain(target, property, Vec::new()),
    };
    for &(breakpoint, row) in rows {
        binding = binding.at_width(breakpoint.min_width(), stages(row));
    }
    binding
}

/// Section slides up 220px and fades in from 0.3 as its top reaches mid-screen.
pub fn faq_section(section: &str, presets: &SpringPresets) -> Result<Animator, MotionError> {
    let track = Track::new(
        section,
        ScrollOffset::START_END_TO_START_CENTER,
        presets.get("FAQ")?,
    )
    .with_binding(Binding::new(
        section,
        StyleProperty::TranslateY,
        RangeTransform::new([0.0, 0.7], [220.0, 0.0]),
    ))
    .with_binding(Binding::new(
        section,
        StyleProperty::Opacity,
        RangeTransform::new([0.0, 0.5], [0.3, 1.0]),
    ));

    Ok(Animator::new("faq_section").with_track(track))
}

/// Grid parallax plus a staggered reveal of every `(card, icon)` pair.
pub fn reviews_grid(
    grid: &str,
    cards: &[(&str, &str)],
    presets: &SpringPresets,
) -> Result<Animator, MotionError> {
    let grid_track = Track::new(
        grid,
        ScrollOffset::START_END_TO_END_END,
        presets.get("REVIEWS_GRID")?,
    )
    .with_binding(Binding::new(
        grid,
        StyleProperty::TranslateY,
        RangeTransform::new([0.0, 1.0], [30.0, -60.0]),
    ));

    let card_spring = presets.get("REVIEWS_CARD")?;
    let mut animator = Animator::new("reviews_grid").with_track(grid_track);

    for &(card, icon) in cards {
        let track = Track::new(card, ScrollOffset::START_END_TO_CENTER_CENTER, card_spring)
            .with_binding(Binding::new(
                icon,
                StyleProperty::Scale,
                RangeTransform::identity(),
            ))
            .with_binding(Binding::new(
                icon,
                StyleProperty::Opacity,
                RangeTransform::new([0.0, 0.3], [0.0, 1.0]),
            ))
            .with_binding(Binding::new(
                card,
                StyleProperty::Opacity,
                RangeTransform::new([0.0, 0.5], [0.0, 1.0]),
            ))
            .with_binding(Binding::new(
                card,
                StyleProperty::TranslateY,
                RangeTransform::new([0.0, 0.5], [30.0, 0.0]),
            ));
        animator.push_track(track);
    }

    Ok(animator)
}

/// Map rises 150px from its breakpoint layout offset while the markers pop in
/// over the last 5% of travel. Both springs follow the same container geometry.
pub fn location_map(
    container: &str,
    map: &str,
    markers: &str,
    presets: &SpringPresets,
) -> Result<Animator, MotionError> {
    let config = presets.get("LOCATION")?;

    let map_track = Track::new(container, ScrollOffset::START_END_TO_START_30, config)
        .with_binding(per_breakpoint(
            map,
            StyleProperty::TranslateX,
            &MAP_BASE_OFFSETS,
            |(x, _)| vec![RangeTransform::new([0.0, 1.0], [x, x])],
        ))
        .with_binding(per_breakpoint(
            map,
            StyleProperty::TranslateY,
            &MAP_BASE_OFFSETS,
            |(_, y)| vec![RangeTransform::new([0.0, 1.0], [y + 150.0, y])],
        ));
    let markers_track = Track::new(container, ScrollOffset::START_END_TO_START_30, config)
        .with_binding(Binding::new(
            markers,
            StyleProperty::Opacity,
            RangeTransform::new([0.95, 1.0], [0.0, 1.0]),
        ));

    Ok(Animator::new("location_map")
        .with_track(map_track)
        .with_track(markers_track))
}

/// Newsletter form widens from 60% to full width; the bottom bar unfolds at the end.
pub fn footer(
    form_container: &str,
    form: &str,
    bottom_bar: &str,
    presets: &SpringPresets,
) -> Result<Animator, MotionError> {
    let track = Track::new(
        form_container,
        ScrollOffset::START_END_TO_END_END,
        presets.get("FOOTER")?,
    )
    .with_binding(Binding::new(
        form,
        StyleProperty::WidthPercent,
        RangeTransform::new([0.0, 1.0], [60.0, 100.0]),
    ))
    .with_binding(Binding::new(
        bottom_bar,
        StyleProperty::ScaleX,
        RangeTransform::new([0.8, 1.0], [0.85, 1.0]),
    ));

    Ok(Animator::new("footer").with_track(track))
}

/// Tip card images zoom from 0.8 to full size. `(card, image)` pairs; the
/// spring smooths the scale itself and starts wherever the card already is.
pub fn tips_images(
    images: &[(&str, &str)],
    presets: &SpringPresets,
) -> Result<Animator, MotionError> {
    let config = presets.get("TIPS")?;
    let mut animator = Animator::new("tips_images");

    for &(card, image) in images {
        animator.push_track(
            Track::new(card, ScrollOffset::START_END_TO_START_CENTER, config)
                .with_target_map(RangeTransform::new([0.0, 0.65], [0.8, 1.0]))
                .seeded_from_geometry()
                .with_binding(Binding::new(
                    image,
                    StyleProperty::Scale,
                    RangeTransform::identity(),
                )),
        );
    }

    Ok(animator)
}

/// Elements of one expandable service card.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCard<'a> {
    pub card: &'a str,
    pub wrapper: &'a str,
    pub image: &'a str,
    pub price: &'a str,
}

/// Service cards grow from their small to their large image box as they reach
/// the screen center. `sizes` is keyed by breakpoint, e.g. [`SERVICE_CARD_SIZES`].
pub fn service_cards(
    cards: &[ServiceCard<'_>],
    sizes: &[(Breakpoint, CardSizes)],
    presets: &SpringPresets,
) -> Result<Animator, MotionError> {
    if sizes.is_empty() {
        return Err(MotionError::InvalidConfig(
            "service cards need at least one size row".to_string(),
        ));
    }
    let config = presets.get("SERVICES")?;
    let expand = RangeTransform::new([0.0, 0.8], [0.0, 1.0]);
    let active = RangeTransform::new([0.0, 0.4], [0.0, 1.0]);
    let mut animator = Animator::new("service_cards");

    for card in cards {
        let track = Track::new(card.card, ScrollOffset::CENTER_END_TO_CENTER_CENTER, config)
            .with_binding(per_breakpoint(
                card.image,
                StyleProperty::HeightPx,
                sizes,
                |s| {
                    let grow = [s.small.height, s.large.height];
                    vec![expand, RangeTransform::new([0.0, 0.9], grow)]
                },
            ))
            .with_binding(per_breakpoint(
                card.image,
                StyleProperty::WidthPx,
                sizes,
                |s| {
                    let grow = [s.small.width, s.large.width];
                    vec![expand, RangeTransform::new([0.0, 1.0], grow)]
                },
            ))
            .with_binding(
                Binding::new(card.wrapper, StyleProperty::JustifyFlexStart, expand)
                    .then(RangeTransform::new([0.0, 0.3], [1.0, 0.0])),
            )
            .with_binding(
                Binding::new(card.wrapper, StyleProperty::PaddingBottomPx, expand)
                    .then(RangeTransform::new([0.0, 0.3], [12.0, 0.0])),
            )
            .with_binding(Binding::new(card.price, StyleProperty::Opacity, expand).then(active))
            .with_binding(
                Binding::new(card.price, StyleProperty::DisplayFlex, expand).then(active),
            );
        animator.push_track(track);
    }

    Ok(animator)
}

/// Parameterless scenes wired to the site's element ids.
pub fn by_name(name: &str, presets: &SpringPresets) -> Result<Animator, MotionError> {
    match name {
        "faq_section" => faq_section("faqs-section", presets),
        "location_map" => location_map(
            "location-map-container",
            "location-map-desktop",
            "location-markers",
            presets,
        ),
        "footer" => footer(
            "footer-form-container",
            "newsletter-form",
            "footer-bottom-bar",
            presets,
        ),
        other => Err(MotionError::UnknownScene(other.to_string())),
    }
}
