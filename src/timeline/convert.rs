use crate::{
    animation::ease::Ease,
    config::{
        model::{AnimationConfig, PropertyType, SequenceItem},
        value::{PointValue, PropertyValue},
    },
    foundation::core::{CoordinateSpace, Point, Rgb, Vec2},
    stage::target::Target,
    timeline::model::{TimelineAnimation, TimelineElement, TrackName},
};

/// Turn an element's tracks and `onScreen` windows into sequence items.
///
/// Only the first entry of each track is scheduled; later entries are
/// validated but not played. Positions are remapped from the design
/// resolution to the output resolution.
pub fn element_to_sequence(element: &TimelineElement, space: &CoordinateSpace) -> Vec<SequenceItem> {
    let mut items = Vec::new();
    for (&track, entries) in &element.timeline {
        let Some(first) = entries.first() else {
            continue;
        };
        if entries.len() > 1 {
            tracing::debug!(
                element = %element.element_name,
                track = track.name(),
                ignored = entries.len() - 1,
                "only the first entry of a track is scheduled"
            );
        }
        if !first.has_valid_range() {
            tracing::warn!(
                element = %element.element_name,
                track = track.name(),
                "skipping entry with invalid time range"
            );
            continue;
        }
        items.push(SequenceItem::new(
            track.property_type(),
            entry_config(track, first, space),
        ));
    }

    for window in &element.on_screen {
        if !(window.start_time.is_finite()
            && window.end_time.is_finite()
            && window.start_time >= 0.0
            && window.end_time > window.start_time)
        {
            continue;
        }
        let config = AnimationConfig {
            start_value: Some(true.into()),
            end_value: Some(false.into()),
            duration: (window.end_time - window.start_time) * 1000.0,
            delay: window.start_time * 1000.0,
            ..AnimationConfig::default()
        };
        items.push(SequenceItem::new(PropertyType::Visibility, config));
    }
    items
}

fn entry_config(
    track: TrackName,
    entry: &TimelineAnimation,
    space: &CoordinateSpace,
) -> AnimationConfig {
    let remap = |value: &Option<PropertyValue>| match (track, value) {
        (TrackName::Position, Some(PropertyValue::Point(p))) => {
            let q = space.remap_point(Point::new(p.x, p.y));
            Some(PropertyValue::Point(PointValue {
                x: q.x,
                y: q.y,
                z: p.z,
            }))
        }
        _ => value.clone(),
    };

    let easing = Ease::from_in_out(
        entry.ease_in.as_deref().unwrap_or("Linear"),
        entry.ease_out.as_deref().unwrap_or("Linear"),
    )
    .map(|ease| ease.to_string())
    .ok();

    AnimationConfig {
        property_type: Some(track.property_type()),
        start_value: remap(&entry.start_value),
        end_value: remap(&entry.end_value),
        duration: (entry.end_time - entry.start_time) * 1000.0,
        delay: entry.start_time * 1000.0,
        easing,
        ..AnimationConfig::default()
    }
}

/// Write an element's normalized initial state onto its target.
///
/// Elements with `onScreen` windows start hidden; their visibility items
/// show them.
pub fn apply_initial_state(target: &mut Target, element: &TimelineElement, space: &CoordinateSpace) {
    let state = &element.initial_state;
    target.position = space.remap_point(Point::new(state.position.x, state.position.y));
    target.depth = state.position.z;
    target.scale = Vec2::new(state.scale.x, state.scale.y);
    target.alpha = state.opacity.clamp(0.0, 1.0);
    target.rotation_deg = state.rotation;
    target.tint = if target.caps.tint {
        Rgb::parse_hex(&state.color).ok()
    } else {
        None
    };
    target.visible = element.on_screen.is_empty();
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/convert.rs"]
mod tests;
