use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    config::value::PropertyValue,
    foundation::{
        core::Rgb,
        error::{ReelError, ReelResult},
    },
    timeline::model::{
        InitialPosition, InitialScale, InitialState, OnScreenWindow, TIMELINE_KEY,
        TimelineAnimation, TimelineElement, TrackName,
    },
};

/// Numbers pass through; numeric strings are parsed; anything else is `None`.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn coerce_string(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// Colours may be written as integers; normalize those to `0xRRGGBB`.
fn coerce_color(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => InitialState::default().color,
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64().map(Rgb::from_number) {
            Some(Ok(rgb)) => rgb.to_string(),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Default malformed or missing numeric fields instead of rejecting them.
pub fn normalize_initial_state(raw: Option<&Value>) -> InitialState {
    let defaults = InitialState::default();
    let Some(raw) = raw else {
        return defaults;
    };
    let position = raw.get("position");
    let scale = raw.get("scale");
    let uniform = scale.and_then(|s| coerce_number(Some(s)));

    InitialState {
        position: InitialPosition {
            x: coerce_number(position.and_then(|p| p.get("x"))).unwrap_or(0.0),
            y: coerce_number(position.and_then(|p| p.get("y"))).unwrap_or(0.0),
            z: coerce_number(position.and_then(|p| p.get("z"))).unwrap_or(0.0),
        },
        scale: InitialScale {
            x: coerce_number(scale.and_then(|s| s.get("x")))
                .or(uniform)
                .unwrap_or(1.0),
            y: coerce_number(scale.and_then(|s| s.get("y")))
                .or(uniform)
                .unwrap_or(1.0),
        },
        opacity: coerce_number(raw.get("opacity")).unwrap_or(defaults.opacity),
        rotation: coerce_number(raw.get("rotation")).unwrap_or(defaults.rotation),
        color: coerce_color(raw.get("color")),
    }
}

/// Times that cannot be read become NaN so range validation reports them.
pub fn normalize_animation(raw: &Value) -> TimelineAnimation {
    let value = |key: &str| {
        raw.get(key)
            .filter(|v| !v.is_null())
            .and_then(|v| serde_json::from_value::<PropertyValue>(v.clone()).ok())
    };
    let name = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_owned);
    TimelineAnimation {
        start_time: coerce_number(raw.get("startTime")).unwrap_or(f64::NAN),
        end_time: coerce_number(raw.get("endTime")).unwrap_or(f64::NAN),
        start_value: value("startValue"),
        end_value: value("endValue"),
        ease_in: name("easeIn"),
        ease_out: name("easeOut"),
    }
}

pub fn normalize_element(raw: &Value) -> TimelineElement {
    let mut timeline: BTreeMap<TrackName, Vec<TimelineAnimation>> = BTreeMap::new();
    if let Some(tracks) = raw.get("timeline").and_then(Value::as_object) {
        for (key, entries) in tracks {
            let Some(track) = TrackName::parse(key) else {
                tracing::debug!(track = %key, "ignoring unknown timeline track");
                continue;
            };
            let entries: Vec<TimelineAnimation> = entries
                .as_array()
                .map(|arr| arr.iter().map(normalize_animation).collect())
                .unwrap_or_default();
            let _ = timeline.insert(track, entries);
        }
    }

    let on_screen: Vec<OnScreenWindow> = raw
        .get("onScreen")
        .and_then(Value::as_array)
        .map(|windows| {
            windows
                .iter()
                .map(|w| OnScreenWindow {
                    start_time: coerce_number(w.get("startTime")).unwrap_or(f64::NAN),
                    end_time: coerce_number(w.get("endTime")).unwrap_or(f64::NAN),
                })
                .collect()
        })
        .unwrap_or_default();

    TimelineElement {
        element_name: coerce_string(raw.get("elementName")),
        asset_type: coerce_string(raw.get("assetType")),
        asset_name: coerce_string(raw.get("assetName")),
        initial_state: normalize_initial_state(raw.get("initialState")),
        timeline,
        on_screen,
    }
}

/// The raw element array of a document, if it has the expected shape.
pub fn element_array(doc: &Value) -> ReelResult<&[Value]> {
    match doc.get(TIMELINE_KEY) {
        Some(Value::Array(elements)) if !elements.is_empty() => Ok(elements.as_slice()),
        Some(Value::Array(_)) => Err(ReelError::validation(format!(
            "\"{TIMELINE_KEY}\" must not be empty"
        ))),
        Some(_) => Err(ReelError::validation(format!(
            "\"{TIMELINE_KEY}\" must be an array"
        ))),
        None => Err(ReelError::validation(format!(
            "missing \"{TIMELINE_KEY}\" array"
        ))),
    }
}

/// Normalize every element of a document.
pub fn normalize_document(doc: &Value) -> ReelResult<Vec<TimelineElement>> {
    Ok(element_array(doc)?.iter().map(normalize_element).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/normalize.rs"]
mod tests;
