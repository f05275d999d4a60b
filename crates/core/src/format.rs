use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{FormattedRoute, FormattedStep, RawRoute};

/// Convert a raw provider route into the display-ready itinerary.
///
/// Labels keep only their first comma-delimited segment, dropping the
/// regional qualifier appended before geocoding.
pub fn format_route(
    origin_label: &str,
    destination_label: &str,
    route: &RawRoute,
) -> FormattedRoute {
    FormattedRoute {
        origin: display_label(origin_label),
        destination: display_label(destination_label),
        total_distance: format_distance(route.summary.distance_meters),
        total_duration: format_duration(route.summary.duration_seconds / 60.0),
        steps: route
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| FormattedStep {
                step_number: index + 1,
                instruction: clean_instruction(&step.instruction),
                distance: format_distance(step.distance_meters),
                duration: step
                    .duration_seconds
                    .map(|seconds| format_duration(seconds / 60.0)),
            })
            .collect(),
    }
}

pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        return format!("{meters:.0} meters");
    }

    let km = meters / 1000.0;
    if km < 10.0 {
        format!("{km:.1} km")
    } else {
        format!("{km:.0} km")
    }
}

/// Render a duration given in minutes.
///
/// Below an hour the unit is always plural, and the hour unit stays plural
/// even for a single hour ("1 hours"). Both quirks are inherited from the
/// voice frontend's oracle and are kept verbatim.
pub fn format_duration(minutes: f64) -> String {
    if minutes < 1.0 {
        return "less than a minute".to_string();
    }

    if minutes < 60.0 {
        return format!("{} minutes", minutes.round() as u64);
    }

    let hours = (minutes / 60.0).floor() as u64;
    let mins = (minutes % 60.0).round() as u64;

    if mins == 0 {
        format!("{hours} hours")
    } else {
        format!(
            "{hours} hours {mins} minute{}",
            if mins != 1 { "s" } else { "" }
        )
    }
}

static MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid markup pattern"));

// Applied in order over the whole string.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("Continue onto", "Continue on"),
    ("Turn slight", "Turn slightly"),
    ("Destination will be", "Your destination will be"),
    ("Head ", "Drive "),
    ("left-hand", "left"),
    ("right-hand", "right"),
    ("Walk ", "Drive "),
];

/// Strip markup tags and rewrite provider phrasing into the driving
/// vocabulary the voice output expects.
pub fn clean_instruction(instruction: &str) -> String {
    let mut cleaned = MARKUP.replace_all(instruction, "").into_owned();

    for (old, new) in REPLACEMENTS {
        cleaned = cleaned.replace(old, new);
    }

    cleaned
}

fn display_label(label: &str) -> String {
    label.split(',').next().unwrap_or(label).trim().to_string()
}
