//! Shared types and models for the Beach Finder
//!
//! Scoring, filtering and the domain models live here so the backend and the
//! WASM bindings evaluate beaches with the same rules.

pub mod collection;
pub mod filtering;
pub mod models;
pub mod scoring;
pub mod types;
pub mod validation;

pub use collection::*;
pub use filtering::*;
pub use models::*;
pub use scoring::*;
pub use types::*;
pub use validation::*;
