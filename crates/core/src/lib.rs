pub mod error;
pub mod extract;
pub mod format;
pub mod models;
pub mod region;

pub use error::DirectionsError;
pub use extract::{extract_locations, normalize_text, Extraction};
pub use format::{clean_instruction, format_distance, format_duration, format_route};
pub use models::*;
pub use region::RegionContext;
