//! Encore Core
//!
//! Domain types and collaborator traits shared by every Encore crate.
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Category` and their identifiers
//! - **Collaborator Traits**: `CatalogSource` (where the song list comes from)
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use encore_core::types::{Track, TrackId};
//!
//! let track = Track::new("t1", "Blue Hour", "Mara Lind", "https://cdn.example.com/t1.mp3")
//!     .with_duration(212.0);
//!
//! assert_eq!(track.id, TrackId::new("t1"));
//! assert_eq!(track.nominal_duration().as_secs(), 212);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CoreError, Result};
pub use traits::CatalogSource;
pub use types::{tracks_in_category, Category, CategoryId, Track, TrackId};
