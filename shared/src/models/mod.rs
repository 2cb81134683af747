//! Domain models for the beach finder

mod beach;
mod crowd;
mod marine;
mod place;
mod weather;

pub use beach::*;
pub use crowd::*;
pub use marine::*;
pub use place::*;
pub use weather::*;
