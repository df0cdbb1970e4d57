/// View services: one operation per dashboard view
use crate::analytics::LaunchAnalytics;
use crate::clients::LaunchSource;
use crate::domain::{LaunchCard, LaunchDetail};
use crate::errors::SourceResult;
use crate::pagination::{LaunchPager, PageState};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const LIST_ERROR_MESSAGE: &str = "Error loading missions";
pub const DETAIL_ERROR_MESSAGE: &str = "Error loading mission details";
pub const ANALYTICS_ERROR_MESSAGE: &str = "Error loading data";

/// Snapshot of a list view after its pages were requested
#[derive(Debug, Clone, Serialize)]
pub struct LaunchListView {
    pub state: PageState,
    pub launches: Vec<LaunchCard>,
    pub total: usize,
    pub has_more: bool,
    pub next_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl From<&LaunchPager> for LaunchListView {
    fn from(pager: &LaunchPager) -> Self {
        Self {
            state: pager.state(),
            launches: pager.records().iter().map(LaunchCard::from).collect(),
            total: pager.len(),
            has_more: pager.has_more(),
            next_page: pager.current_page(),
            error: pager.last_error().map(|_| LIST_ERROR_MESSAGE),
            error_detail: pager.last_error().map(str::to_string),
        }
    }
}

/// Load a launch, then its rocket and launchpad concurrently.
///
/// Only the primary lookup can fail the call; a related record that cannot
/// be fetched is logged and left empty.
pub async fn load_launch_detail(source: &dyn LaunchSource, id: &str) -> SourceResult<LaunchDetail> {
    let launch = source.get_launch(id).await?;

    let rocket = async {
        let Some(rocket_id) = launch.rocket.as_deref() else {
            return None;
        };
        match source.get_rocket(rocket_id).await {
            Ok(rocket) => Some(rocket),
            Err(e) => {
                warn!("Rocket {} for launch {} unavailable: {}", rocket_id, launch.id, e);
                None
            }
        }
    };
    let launchpad = async {
        let Some(pad_id) = launch.launchpad.as_deref() else {
            return None;
        };
        match source.get_launchpad(pad_id).await {
            Ok(pad) => Some(pad),
            Err(e) => {
                warn!("Launchpad {} for launch {} unavailable: {}", pad_id, launch.id, e);
                None
            }
        }
    };
    let (rocket, launchpad) = tokio::join!(rocket, launchpad);

    Ok(LaunchDetail {
        launch,
        rocket,
        launchpad,
    })
}

/// Backs the list, detail and analytics views with a shared launch source
pub struct LaunchService {
    source: Arc<dyn LaunchSource>,
    page_size: u32,
    analytics_cap: u32,
}

impl LaunchService {
    pub fn new(source: Arc<dyn LaunchSource>, page_size: u32, analytics_cap: u32) -> Self {
        Self {
            source,
            page_size,
            analytics_cap,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Build a fresh list view and load up to `pages` pages into it.
    ///
    /// Stops at the first failed or final page; a failure is reported inside
    /// the view alongside whatever was loaded before it.
    pub async fn list_view(&self, pages: u32, page_size: Option<u32>) -> LaunchListView {
        let mut pager = LaunchPager::new(page_size.unwrap_or(self.page_size));

        for _ in 0..pages {
            if pager.request_next_page(self.source.as_ref()).await != PageState::Loaded {
                break;
            }
        }

        LaunchListView::from(&pager)
    }

    pub async fn detail(&self, id: &str) -> SourceResult<LaunchDetail> {
        let detail = load_launch_detail(self.source.as_ref(), id).await?;
        info!(
            "Loaded launch {} (rocket: {}, launchpad: {})",
            id,
            detail.rocket.is_some(),
            detail.launchpad.is_some()
        );
        Ok(detail)
    }

    pub async fn analytics(&self) -> SourceResult<LaunchAnalytics> {
        let records = self.source.get_all_launches(self.analytics_cap).await?;
        info!("Aggregating {} launches for analytics", records.len());
        Ok(LaunchAnalytics::from_records(&records))
    }
}
