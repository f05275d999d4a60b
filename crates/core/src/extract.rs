use once_cell::sync::Lazy;
use regex::Regex;

/// Outcome of trying to read an origin/destination pair out of free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Matched { origin: String, destination: String },
    NoMatch,
}

impl Extraction {
    pub fn matched(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::Matched {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Extract a trip pair from a free-text prompt.
///
/// `entities` is the ordered geo-entity list produced by the recognizer
/// collaborator; two or more recognized places win outright, anything past
/// the second is ignored. Otherwise the pattern chain runs in order and the
/// first matcher producing a pair wins.
pub fn extract_locations(prompt: &str, entities: &[String]) -> Extraction {
    if entities.len() >= 2 {
        return Extraction::Matched {
            origin: entities[0].clone(),
            destination: entities[1].clone(),
        };
    }

    for matcher in MATCHERS {
        if let Some((origin, destination)) = matcher(prompt) {
            return Extraction::Matched {
                origin,
                destination,
            };
        }
    }

    Extraction::NoMatch
}

type Matcher = fn(&str) -> Option<(String, String)>;

// Ordered by precedence. The bare "A to B" split stays last: it fires on any
// phrase containing "to", travel-related or not, which is an accepted
// limitation of the heuristic.
const MATCHERS: &[Matcher] = &[
    match_from_to,
    match_to_from,
    match_navigate,
    match_go,
    match_directions,
    match_generic_to,
];

static FROM_TO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfrom\s+(.+?)\s+to\s+(.+)$").expect("valid from/to pattern"));
static TO_FROM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bto\s+(.+?)\s+from\s+(.+)$").expect("valid to/from pattern"));
static NAVIGATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bnavigate\s+(?:from\s+)?(.+?)\s+to\s+(.+)$").expect("valid navigate pattern")
});
static GO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bgo\s+(?:from\s+)?(.+?)\s+to\s+(.+)$").expect("valid go pattern")
});
static DIRECTIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bdirections\s+(?:from\s+)?(.+?)\s+to\s+(.+)$")
        .expect("valid directions pattern")
});
static GENERIC_TO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.+?)\s+to\s+(.+)$").expect("valid generic pattern"));

fn match_from_to(text: &str) -> Option<(String, String)> {
    capture_pair(&FROM_TO, text, false)
}

// Groups capture destination first, so they come back swapped.
fn match_to_from(text: &str) -> Option<(String, String)> {
    capture_pair(&TO_FROM, text, true)
}

fn match_navigate(text: &str) -> Option<(String, String)> {
    capture_pair(&NAVIGATE, text, false)
}

fn match_go(text: &str) -> Option<(String, String)> {
    capture_pair(&GO, text, false)
}

fn match_directions(text: &str) -> Option<(String, String)> {
    capture_pair(&DIRECTIONS, text, false)
}

fn match_generic_to(text: &str) -> Option<(String, String)> {
    capture_pair(&GENERIC_TO, text, false)
}

fn capture_pair(pattern: &Regex, text: &str, swap: bool) -> Option<(String, String)> {
    let caps = pattern.captures(text)?;
    let first = caps.get(1)?.as_str().trim();
    let second = caps.get(2)?.as_str().trim();

    if first.is_empty() || second.is_empty() {
        return None;
    }

    if swap {
        Some((second.to_string(), first.to_string()))
    } else {
        Some((first.to_string(), second.to_string()))
    }
}
