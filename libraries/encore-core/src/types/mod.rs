//! Domain types

mod category;
mod ids;
mod track;

pub use category::{tracks_in_category, Category};
pub use ids::{CategoryId, TrackId};
pub use track::Track;
