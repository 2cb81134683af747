//! Search services for the Beach Finder

pub mod enricher;
pub mod pager;
pub mod pipeline;
pub mod session;

pub use enricher::{BeachEnricher, EnrichOutcome, SkipReason};
pub use pager::{PagedPlaces, PlacesPager};
pub use pipeline::{
    AggregationPipeline, PipelineState, ResolvedLocation, SearchLocation, SearchOutcome,
    SearchQuery, SkipCounts,
};
pub use session::{BeachDetail, SearchSession, SessionSnapshot};
