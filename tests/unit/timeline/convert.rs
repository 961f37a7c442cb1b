use super::*;
use crate::foundation::core::{Resolution, TargetId};
use crate::stage::target::TargetKind;
use crate::timeline::normalize::normalize_element;
use serde_json::json;

fn logo() -> TimelineElement {
    normalize_element(&json!({
        "elementName": "logo",
        "assetType": "image",
        "assetName": "logo_png",
        "timeline": {
            "opacity": [{"startTime": 1, "endTime": 2, "startValue": 0, "endValue": 1,
                         "easeIn": "Linear", "easeOut": "Linear"}]
        }
    }))
}

#[test]
fn logo_opacity_entry_becomes_one_item() {
    let items = element_to_sequence(&logo(), &CoordinateSpace::default());
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.property_type, PropertyType::Opacity);
    assert_eq!(item.config.delay, 1000.0);
    assert_eq!(item.config.duration, 1000.0);
    assert_eq!(item.config.end_value, Some(PropertyValue::Number(1.0)));
    assert_eq!(item.config.start_value, Some(PropertyValue::Number(0.0)));
    assert_eq!(item.config.easing.as_deref(), Some("Linear"));
    assert_eq!(item.effective_delay_ms(), 1000.0);
}

#[test]
fn only_first_entry_per_track_is_converted() {
    let el = normalize_element(&json!({
        "elementName": "a",
        "timeline": {
            "rotation": [
                {"startTime": 0, "endTime": 1, "endValue": 90, "easeIn": "Quad", "easeOut": "Linear"},
                {"startTime": 1, "endTime": 2, "endValue": 180}
            ]
        }
    }));
    let items = element_to_sequence(&el, &CoordinateSpace::default());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].config.end_value, Some(PropertyValue::Number(90.0)));
    assert_eq!(items[0].config.easing.as_deref(), Some("Quad.easeIn"));
}

#[test]
fn positions_are_remapped_to_output_resolution() {
    let space = CoordinateSpace {
        design: Resolution::new(1920.0, 1080.0).unwrap(),
        output: Resolution::new(960.0, 540.0).unwrap(),
    };
    let el = normalize_element(&json!({
        "elementName": "a",
        "initialState": {"position": {"x": 100, "y": 200, "z": 3}},
        "timeline": {
            "position": [{"startTime": 0, "endTime": 1,
                          "startValue": {"x": 0, "y": 0}, "endValue": {"x": 1920, "y": 1080}}]
        }
    }));
    let items = element_to_sequence(&el, &space);
    assert_eq!(items[0].config.end_value, Some(PropertyValue::point(960.0, 540.0)));

    let mut target = Target::new(TargetId(0), TargetKind::Image);
    apply_initial_state(&mut target, &el, &space);
    assert_eq!(target.position, Point::new(50.0, 100.0));
    assert_eq!(target.depth, 3.0);
    assert_eq!(target.tint, Some(Rgb::WHITE));
    assert!(target.visible);
}

#[test]
fn on_screen_windows_become_visibility_items() {
    let el = normalize_element(&json!({
        "elementName": "a",
        "onScreen": [{"startTime": 0.5, "endTime": 2}, {"startTime": 3, "endTime": 3}]
    }));
    let items = element_to_sequence(&el, &CoordinateSpace::default());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].property_type, PropertyType::Visibility);
    assert_eq!(items[0].config.delay, 500.0);
    assert_eq!(items[0].config.duration, 1500.0);

    let mut target = Target::new(TargetId(1), TargetKind::Video);
    apply_initial_state(&mut target, &el, &CoordinateSpace::default());
    assert!(!target.visible);
    assert_eq!(target.tint, None);
}
