use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

use crate::{
    animation::ease::Ease,
    config::value::PropertyValue,
    foundation::{core::Rgb, error::ReelError},
    timeline::{
        model::{AssetMap, TIMELINE_KEY, TimelineAnimation, TimelineElement, TrackName},
        normalize::{element_array, normalize_element},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) if name.contains(' ') => {
                s.push_str("[\"");
                s.push_str(name);
                s.push_str("\"]");
            }
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Blocking errors plus non-blocking warnings for one document.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// No errors; warnings do not block playback.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a timeline document; an empty result means it is schedulable.
#[tracing::instrument(level = "debug", skip_all)]
pub fn validate_timeline_json(doc: &Value) -> Vec<String> {
    collect_errors(doc)
        .into_iter()
        .map(|e| e.to_string())
        .collect()
}

/// [`validate_timeline_json`] plus asset cross-references, reported as warnings.
pub fn validate_timeline_with_assets(doc: &Value, assets: &AssetMap) -> ValidationReport {
    let errors = validate_timeline_json(doc);
    let mut warnings = Vec::new();
    if let Ok(elements) = element_array(doc) {
        for (i, raw) in elements.iter().enumerate() {
            let Some(name) = raw.get("assetName").and_then(Value::as_str) else {
                continue;
            };
            if !name.is_empty() && !assets.contains_key(name) {
                let path = [
                    SchemaPathElem::Field(TIMELINE_KEY),
                    SchemaPathElem::Index(i),
                    SchemaPathElem::Field("assetName"),
                ];
                warnings.push(
                    SchemaError::at(&path, format!("asset '{name}' not found in asset map"))
                        .to_string(),
                );
            }
        }
    }
    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "timeline references missing assets");
    }
    ValidationReport { errors, warnings }
}

fn collect_errors(doc: &Value) -> Vec<SchemaError> {
    let elements = match element_array(doc) {
        Ok(elements) => elements,
        Err(err) => {
            return vec![SchemaError::at(
                &[SchemaPathElem::Field(TIMELINE_KEY)],
                match err {
                    ReelError::Validation(msg) => msg,
                    other => other.to_string(),
                },
            )];
        }
    };

    let mut errors = Vec::new();
    let mut names = HashSet::<String>::new();
    for (i, raw) in elements.iter().enumerate() {
        let mut path = vec![SchemaPathElem::Field(TIMELINE_KEY), SchemaPathElem::Index(i)];
        if !raw.is_object() {
            errors.push(SchemaError::at(&path, "element must be an object"));
            continue;
        }
        let element = normalize_element(raw);
        validate_required(raw, &mut path, &mut errors);
        if !element.element_name.is_empty() && !names.insert(element.element_name.clone()) {
            path.push(SchemaPathElem::Field("elementName"));
            errors.push(SchemaError::at(
                &path,
                format!("duplicate elementName '{}'", element.element_name),
            ));
            let _ = path.pop();
        }
        validate_initial_state(&element, &mut path, &mut errors);
        validate_tracks(raw, &element, &mut path, &mut errors);
        validate_on_screen(raw, &element, &mut path, &mut errors);
    }
    errors
}

fn validate_required(raw: &Value, path: &mut Vec<SchemaPathElem>, errors: &mut Vec<SchemaError>) {
    for field in ["elementName", "assetType", "assetName"] {
        let ok = raw
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !ok {
            path.push(SchemaPathElem::Field(field));
            errors.push(SchemaError::at(path, "required non-empty string"));
            let _ = path.pop();
        }
    }
}

fn validate_initial_state(
    element: &TimelineElement,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    let state = &element.initial_state;
    path.push(SchemaPathElem::Field("initialState"));
    if !(0.0..=1.0).contains(&state.opacity) {
        path.push(SchemaPathElem::Field("opacity"));
        errors.push(SchemaError::at(path, "opacity must be in [0, 1]"));
        let _ = path.pop();
    }
    if Rgb::parse_hex(&state.color).is_err() {
        path.push(SchemaPathElem::Field("color"));
        errors.push(SchemaError::at(
            path,
            format!("invalid colour '{}' (expected 0xRRGGBB or #RRGGBB)", state.color),
        ));
        let _ = path.pop();
    }
    let _ = path.pop();
}

fn validate_tracks(
    raw: &Value,
    element: &TimelineElement,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    let Some(raw_timeline) = raw.get("timeline").filter(|v| !v.is_null()) else {
        return;
    };
    path.push(SchemaPathElem::Field("timeline"));
    if !raw_timeline.is_object() {
        errors.push(SchemaError::at(path, "timeline must be an object"));
        let _ = path.pop();
        return;
    }

    for track in TrackName::ALL {
        let Some(raw_entries) = raw_timeline.get(track.name()) else {
            continue;
        };
        path.push(SchemaPathElem::Field(track.name()));
        let Some(raw_entries) = raw_entries.as_array() else {
            errors.push(SchemaError::at(path, "track must be an array"));
            let _ = path.pop();
            continue;
        };
        let entries = element.timeline.get(&track).map(Vec::as_slice).unwrap_or(&[]);

        for (j, (raw_entry, entry)) in raw_entries.iter().zip(entries).enumerate() {
            path.push(SchemaPathElem::Index(j));
            if raw_entry.is_object() {
                validate_entry(track, entry, path, errors);
            } else {
                errors.push(SchemaError::at(path, "animation entry must be an object"));
            }
            let _ = path.pop();
        }
        validate_overlaps(raw_entries, entries, path, errors);
        let _ = path.pop();
    }
    let _ = path.pop();
}

fn validate_entry(
    track: TrackName,
    entry: &TimelineAnimation,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    if let Some(msg) = range_problem(entry.start_time, entry.end_time) {
        errors.push(SchemaError::at(
            path,
            format!("invalid time range on {} track: {msg}", track.name()),
        ));
    }

    for (field, name) in [("easeIn", &entry.ease_in), ("easeOut", &entry.ease_out)] {
        if let Some(name) = name {
            if !Ease::is_known_name(name) {
                path.push(SchemaPathElem::Field(field));
                errors.push(SchemaError::at(path, format!("unknown easing '{name}'")));
                let _ = path.pop();
            }
        }
    }

    for (field, value) in [
        ("startValue", &entry.start_value),
        ("endValue", &entry.end_value),
    ] {
        let Some(value) = value else {
            continue;
        };
        if let Some(msg) = value_problem(track, value) {
            path.push(SchemaPathElem::Field(field));
            errors.push(SchemaError::at(path, msg));
            let _ = path.pop();
        }
    }
}

/// One combined message per entry, or `None` for a valid range.
fn range_problem(start: f64, end: f64) -> Option<String> {
    if !start.is_finite() || !end.is_finite() {
        return Some("startTime and endTime must be numbers".to_owned());
    }
    let mut problems = Vec::new();
    if start < 0.0 {
        problems.push(format!("startTime ({start}) must be >= 0"));
    }
    if end <= start {
        problems.push(format!("endTime ({end}) must be greater than startTime ({start})"));
    }
    (!problems.is_empty()).then(|| problems.join("; "))
}

fn value_problem(track: TrackName, value: &PropertyValue) -> Option<String> {
    match track {
        TrackName::Opacity => match value.as_number() {
            Ok(n) if (0.0..=1.0).contains(&n) => None,
            Ok(n) => Some(format!("opacity {n} must be in [0, 1]")),
            Err(_) => Some("opacity must be a number".to_owned()),
        },
        TrackName::Color => value
            .as_color()
            .err()
            .map(|_| "invalid colour (expected 0xRRGGBB, #RRGGBB or an integer)".to_owned()),
        TrackName::Position => value
            .as_point()
            .err()
            .map(|_| "position must be an {x, y} point".to_owned()),
        TrackName::Scale => value
            .as_scale()
            .err()
            .map(|_| "scale must be a number or an {x, y} pair".to_owned()),
        TrackName::Rotation => value
            .as_number()
            .err()
            .map(|_| "rotation must be a number".to_owned()),
    }
}

/// Pairwise half-open overlap among entries whose own range is valid.
fn validate_overlaps(
    raw_entries: &[Value],
    entries: &[TimelineAnimation],
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) {
    let valid: Vec<(usize, &TimelineAnimation)> = entries
        .iter()
        .enumerate()
        .filter(|(j, e)| raw_entries.get(*j).is_some_and(Value::is_object) && e.has_valid_range())
        .collect();
    for (a, &(i, first)) in valid.iter().enumerate() {
        for &(j, second) in &valid[a + 1..] {
            if first.overlaps(second) {
                errors.push(SchemaError::at(
                    path,
                    format!(
                        "entries [{i}] ({}s-{}s) and [{j}] ({}s-{}s) overlap",
                        first.start_time, first.end_time, second.start_time, second.end_time
                    ),
                ));
            }
        }
    }
}

fn validate_on_screen(
    raw: &Value,
    element: &TimelineElement,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    let Some(raw_windows) = raw.get("onScreen").filter(|v| !v.is_null()) else {
        return;
    };
    path.push(SchemaPathElem::Field("onScreen"));
    if !raw_windows.is_array() {
        errors.push(SchemaError::at(path, "onScreen must be an array"));
        let _ = path.pop();
        return;
    }

    let mut previous_end: Option<f64> = None;
    for (k, window) in element.on_screen.iter().enumerate() {
        path.push(SchemaPathElem::Index(k));
        if let Some(msg) = range_problem(window.start_time, window.end_time) {
            errors.push(SchemaError::at(path, format!("invalid window: {msg}")));
        } else {
            if let Some(prev) = previous_end {
                if window.start_time < prev {
                    errors.push(SchemaError::at(
                        path,
                        format!(
                            "window starting at {}s begins before the previous window ends ({prev}s)",
                            window.start_time
                        ),
                    ));
                }
            }
            previous_end = Some(window.end_time);
        }
        let _ = path.pop();
    }
    let _ = path.pop();
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/validate.rs"]
mod tests;
