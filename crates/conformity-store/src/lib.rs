//! Storage layer: reference documents on disk (plain text and PDF) and JSON persistence.

mod error;
pub use error::StoreError;

pub mod json;
pub use json::{load_json, save_json};

mod reference;
pub use reference::{DocumentFormat, ReferenceStore};
