//! Country and city catalog for Skycast
//!
//! Loads the flat city dataset once at startup, builds country/city lookup
//! tables, and narrows candidate lists as the user types.

pub mod catalog;
pub mod countries;
pub mod filter;

pub use catalog::{City, CityCatalog};
pub use countries::{country_name, flag_glyph};
pub use filter::{filter, filter_with, MAX_RESULTS, SIMILARITY_CUTOFF};
