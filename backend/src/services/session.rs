//! Single-user search session with last-search-wins semantics

use std::sync::Arc;

use serde::Serialize;
use shared::{
    BeachCollection, BeachSummary, EnrichedBeach, FilterCriteria, FilterEngine, MarineSample,
};
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::pipeline::{
    AggregationPipeline, PipelineState, ResolvedLocation, SearchOutcome, SearchQuery,
};
use crate::error::{AppError, AppResult};

/// Current session state as served to the client
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub state: PipelineState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ResolvedLocation>,
    pub criteria: FilterCriteria,
    pub total: usize,
    pub beaches: Vec<BeachSummary>,
}

/// A full record plus its hourly series
#[derive(Debug, Clone, Serialize)]
pub struct BeachDetail {
    #[serde(flatten)]
    pub beach: EnrichedBeach,
    pub samples: Vec<MarineSample>,
}

struct SessionInner {
    generation: u64,
    cancel: CancellationToken,
    progress: watch::Receiver<PipelineState>,
    run_id: Option<Uuid>,
    location: Option<ResolvedLocation>,
    collection: BeachCollection,
}

pub struct SearchSession {
    pipeline: Arc<AggregationPipeline>,
    filter_engine: FilterEngine,
    inner: Mutex<SessionInner>,
}

impl SearchSession {
    pub fn new(pipeline: Arc<AggregationPipeline>, filter_engine: FilterEngine) -> Self {
        let (_, progress) = watch::channel(PipelineState::Idle);
        Self {
            pipeline,
            filter_engine,
            inner: Mutex::new(SessionInner {
                generation: 0,
                cancel: CancellationToken::new(),
                progress,
                run_id: None,
                location: None,
                collection: BeachCollection::default(),
            }),
        }
    }

    /// Run a new search, superseding any run still in flight.
    ///
    /// The previous result and filter are cleared up front. The new result is
    /// kept only if no newer search started meanwhile; otherwise `Superseded`.
    pub async fn search(&self, query: SearchQuery) -> AppResult<SearchOutcome> {
        let (generation, cancel, progress) = {
            let mut inner = self.inner.lock().await;
            inner.cancel.cancel();
            inner.generation += 1;
            inner.cancel = CancellationToken::new();

            let (tx, rx) = watch::channel(PipelineState::Idle);
            inner.progress = rx;
            inner.run_id = None;
            inner.location = None;
            inner.collection = BeachCollection::default();

            (inner.generation, inner.cancel.clone(), tx)
        };

        let result = self.pipeline.run(&query, &cancel, &progress).await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            tracing::info!(generation, current = inner.generation, "Discarding superseded search");
            return Err(AppError::Superseded);
        }

        let outcome = result?;
        inner.run_id = Some(outcome.run_id);
        inner.location = Some(outcome.location.clone());
        inner.collection = BeachCollection::new(outcome.beaches.clone());
        Ok(outcome)
    }

    pub async fn state(&self) -> SessionSnapshot {
        let inner = self.inner.lock().await;
        self.snapshot(&inner)
    }

    pub async fn apply_filter(&self, criteria: FilterCriteria) -> SessionSnapshot {
        let mut inner = self.inner.lock().await;
        inner.collection.apply(criteria);
        tracing::debug!(?criteria, "Applied beach filter");
        self.snapshot(&inner)
    }

    pub async fn clear_filters(&self) -> SessionSnapshot {
        let mut inner = self.inner.lock().await;
        inner.collection.clear_all();
        self.snapshot(&inner)
    }

    pub async fn beach(&self, place_id: &str) -> AppResult<BeachDetail> {
        let inner = self.inner.lock().await;
        let beach = inner
            .collection
            .get(place_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("beach {}", place_id)))?;
        Ok(BeachDetail {
            samples: beach.marine.samples(),
            beach,
        })
    }

    fn snapshot(&self, inner: &SessionInner) -> SessionSnapshot {
        SessionSnapshot {
            generation: inner.generation,
            state: *inner.progress.borrow(),
            run_id: inner.run_id,
            location: inner.location.clone(),
            criteria: *inner.collection.criteria(),
            total: inner.collection.len(),
            beaches: inner
                .collection
                .visible(&self.filter_engine)
                .into_iter()
                .map(EnrichedBeach::summary)
                .collect(),
        }
    }
}
