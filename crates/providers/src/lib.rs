pub mod gazetteer;
pub mod ors;

pub use gazetteer::GazetteerRecognizer;
pub use ors::OrsClient;

use wayfinder_core::{Coordinate, DirectionsError, RawRoute};

/// Resolves a location string to coordinates. Implementations pick the
/// highest-confidence candidate when the backend scores its results.
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, text: &str) -> Result<Coordinate, DirectionsError>;
}

/// Computes a driving route between two resolved coordinates.
pub trait RoutePlanner: Send + Sync {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RawRoute, DirectionsError>;
}

/// Lists geo-political place names mentioned in a text, in order of
/// appearance.
pub trait EntityRecognizer: Send + Sync {
    fn recognize_geo_entities(&self, text: &str) -> Vec<String>;
}
