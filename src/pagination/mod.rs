/// Incremental loading state for the launch list
use crate::clients::LaunchSource;
use crate::domain::{LaunchRecord, PageResult};
use crate::errors::SourceResult;
use serde::Serialize;
use tracing::{error, info};

/// Page size used by the list view unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    Idle,
    Loading,
    Loaded,
    Exhausted,
    Failed,
}

/// A fetch the pager has committed to; hand it back to `complete_request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

/// Accumulated launches of one list view.
///
/// Records are only ever appended. State moves through `request_next_page`
/// (or the split `begin_request` / `complete_request` pair) and `retry`.
#[derive(Debug, Clone)]
pub struct LaunchPager {
    page_size: u32,
    current_page: u32,
    state: PageState,
    records: Vec<LaunchRecord>,
    last_error: Option<String>,
    // state to return to when a failed request is retried
    resume_state: PageState,
}

impl LaunchPager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            state: PageState::Idle,
            records: Vec::new(),
            last_error: None,
            resume_state: PageState::Idle,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<LaunchRecord> {
        self.records
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Next page number that would be requested
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// False once the source reported the last page.
    ///
    /// Still true while `Failed`: more may remain after a failure, call
    /// [`retry`](Self::retry) before requesting the next page.
    pub fn has_more(&self) -> bool {
        self.state != PageState::Exhausted
    }

    /// Move to `Loading` and return the page to fetch.
    ///
    /// Returns `None` (leaving the state untouched) unless the pager is
    /// `Idle` or `Loaded`.
    pub fn begin_request(&mut self) -> Option<PageRequest> {
        match self.state {
            PageState::Idle | PageState::Loaded => {
                self.resume_state = self.state;
                self.state = PageState::Loading;
                Some(PageRequest {
                    page: self.current_page,
                    page_size: self.page_size,
                })
            }
            PageState::Loading | PageState::Exhausted | PageState::Failed => None,
        }
    }

    /// Apply the outcome of a request started with `begin_request`.
    ///
    /// Ignored unless the pager is `Loading` and `request` matches the
    /// outstanding page.
    pub fn complete_request(&mut self, request: PageRequest, result: SourceResult<PageResult>) {
        if self.state != PageState::Loading || request.page != self.current_page {
            return;
        }

        match result {
            Ok(page) => {
                self.records.extend(page.launches);
                self.current_page += 1;
                self.last_error = None;
                self.state = if page.has_next_page {
                    PageState::Loaded
                } else {
                    PageState::Exhausted
                };
            }
            Err(e) => {
                error!("Launch page {} failed to load: {}", request.page, e);
                self.last_error = Some(e.to_string());
                self.state = PageState::Failed;
            }
        }
    }

    /// Fetch the next page from `source` and fold it into the pager.
    ///
    /// A no-op outside `Idle`/`Loaded`; in particular nothing is fetched once
    /// `Exhausted` or after a failure until [`retry`](Self::retry) is called.
    pub async fn request_next_page(&mut self, source: &dyn LaunchSource) -> PageState {
        let Some(request) = self.begin_request() else {
            return self.state;
        };

        let result = source
            .list_launches(request.page, request.page_size)
            .await;
        self.complete_request(request, result);

        if self.state != PageState::Failed {
            info!(
                "Loaded launch page {} ({} records total, state {:?})",
                request.page,
                self.records.len(),
                self.state
            );
        }
        self.state
    }

    /// Re-arm a failed pager so the next `request_next_page` asks for the
    /// same page again. Returns false when the pager had not failed.
    pub fn retry(&mut self) -> bool {
        if self.state != PageState::Failed {
            return false;
        }
        self.state = self.resume_state;
        self.last_error = None;
        true
    }
}

impl Default for LaunchPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
