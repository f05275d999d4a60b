use crate::EntityRecognizer;

// Localities and cities a Hyderabad deployment is likely to hear. Stands in
// for a full NER model; the trait keeps one swappable.
const DEFAULT_PLACES: &[&str] = &[
    "Banjara Hills",
    "Jubilee Hills",
    "Gachibowli",
    "Hitec City",
    "Financial District",
    "Madhapur",
    "Kondapur",
    "Manikonda",
    "Kukatpally",
    "Miyapur",
    "Ameerpet",
    "Begumpet",
    "Secunderabad",
    "Charminar",
    "Golconda",
    "Mehdipatnam",
    "Tolichowki",
    "Dilsukhnagar",
    "LB Nagar",
    "Uppal",
    "Shamshabad",
    "Necklace Road",
    "Tank Bund",
    "Abids",
    "Koti",
    "Hyderabad",
    "Warangal",
    "Vijayawada",
    "Bengaluru",
    "Chennai",
    "Mumbai",
    "Delhi",
    "Kolkata",
    "Pune",
];

/// Word-boundary substring recognizer over a fixed place list, reporting
/// matches in order of appearance.
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    places: Vec<String>,
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_PLACES.iter().map(ToString::to_string))
    }
}

impl GazetteerRecognizer {
    pub fn new(places: impl IntoIterator<Item = String>) -> Self {
        let mut places: Vec<String> = places
            .into_iter()
            .map(|place| place.trim().to_string())
            .filter(|place| !place.is_empty())
            .collect();

        // Longest names first so "Banjara Hills" claims its span before any
        // shorter overlapping entry can.
        places.sort_by(|a, b| b.len().cmp(&a.len()));

        Self { places }
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize_geo_entities(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut claimed: Vec<(usize, usize)> = Vec::new();
        let mut found: Vec<(usize, &str)> = Vec::new();

        for place in &self.places {
            let needle = place.to_lowercase();
            let mut search_from = 0;

            while let Some(offset) = lower[search_from..].find(&needle) {
                let start = search_from + offset;
                let end = start + needle.len();

                let overlaps = claimed.iter().any(|(s, e)| start < *e && end > *s);
                if !overlaps && is_word_bounded(&lower, start, end) {
                    claimed.push((start, end));
                    found.push((start, place.as_str()));
                    break;
                }

                search_from = end;
            }
        }

        found.sort_by_key(|(start, _)| *start);
        found.into_iter().map(|(_, place)| place.to_string()).collect()
    }
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.is_some_and(|ch| ch.is_alphanumeric()) && !after.is_some_and(|ch| ch.is_alphanumeric())
}
