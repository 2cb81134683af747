//! Paginated nearby search with a mandatory cooldown between pages

use std::sync::Arc;
use std::time::Duration;

use shared::{validate_coordinates, validate_radius, CandidatePlace, Coordinates};
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};
use crate::external::PlacesSource;

/// Places collected across all fetched pages, in provider order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedPlaces {
    pub places: Vec<CandidatePlace>,
    pub pages: u32,
    /// A later page failed and pagination stopped early
    pub truncated: bool,
}

/// Follows continuation tokens up to `max_pages`, sleeping `page_delay`
/// before every follow-up request
#[derive(Clone)]
pub struct PlacesPager {
    source: Arc<dyn PlacesSource>,
    max_pages: u32,
    page_delay: Duration,
}

impl PlacesPager {
    pub fn new(source: Arc<dyn PlacesSource>, max_pages: u32, page_delay: Duration) -> Self {
        Self {
            source,
            max_pages: max_pages.max(1),
            page_delay,
        }
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Fetch every page for `center`/`radius_m`.
    ///
    /// A first-page failure is returned as an error. A failure on a later page
    /// keeps what was already fetched. Cancellation yields `Superseded`.
    pub async fn fetch(
        &self,
        center: &Coordinates,
        radius_m: u32,
        cancel: &CancellationToken,
    ) -> AppResult<PagedPlaces> {
        validate_coordinates(center)?;
        validate_radius(radius_m)?;

        let mut result = PagedPlaces::default();
        let mut page_token: Option<String> = None;

        loop {
            let request = self
                .source
                .nearby_page(center, radius_m, page_token.as_deref());
            let page = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AppError::Superseded),
                page = request => page,
            };

            let page = match page {
                Ok(page) => page,
                Err(e) if result.pages == 0 => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        page = result.pages + 1,
                        error = %e,
                        "Stopping pagination after page failure"
                    );
                    result.truncated = true;
                    break;
                }
            };

            result.pages += 1;
            tracing::debug!(
                page = result.pages,
                count = page.places.len(),
                has_next = page.next_page_token.is_some(),
                "Fetched places page"
            );
            result.places.extend(page.places);

            match page.next_page_token {
                Some(token) if result.pages < self.max_pages => {
                    // The provider needs time before a continuation token becomes valid
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(AppError::Superseded),
                        _ = tokio::time::sleep(self.page_delay) => {}
                    }
                    page_token = Some(token);
                }
                _ => break,
            }
        }

        Ok(result)
    }
}
