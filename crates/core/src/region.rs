use std::env;

/// Regional qualifier appended to bare location strings so the geocoder
/// resolves them inside the deployment area instead of globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionContext {
    pub region: String,
    pub country: String,
}

impl Default for RegionContext {
    fn default() -> Self {
        Self {
            region: "Hyderabad".to_string(),
            country: "India".to_string(),
        }
    }
}

impl RegionContext {
    pub fn new(region: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            country: country.into(),
        }
    }

    pub fn from_env() -> Self {
        let mut context = Self::default();

        if let Ok(region) = env::var("WAYFINDER_REGION") {
            if !region.trim().is_empty() {
                context.region = region.trim().to_string();
            }
        }
        if let Ok(country) = env::var("WAYFINDER_COUNTRY") {
            if !country.trim().is_empty() {
                context.country = country.trim().to_string();
            }
        }

        context
    }

    /// Append `", <Region>, <Country>"` unless the string already mentions
    /// either name. Idempotent as long as the names stay detectable by
    /// substring match.
    pub fn qualify(&self, location: &str) -> String {
        let lower = location.to_lowercase();
        if lower.contains(&self.region.to_lowercase()) || lower.contains(&self.country.to_lowercase())
        {
            return location.to_string();
        }

        format!("{location}, {}, {}", self.region, self.country)
    }
}
