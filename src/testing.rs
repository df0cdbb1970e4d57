/// In-memory `LaunchSource` used by unit tests
use crate::clients::LaunchSource;
use crate::domain::{LaunchRecord, LaunchpadRecord, Outcome, PageResult, RocketRecord};
use crate::errors::{SourceError, SourceResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

pub fn launch(id: &str) -> LaunchRecord {
    LaunchRecord {
        id: id.to_string(),
        name: Some(format!("Mission {}", id)),
        flight_number: None,
        date_utc: None,
        outcome: Outcome::Pending,
        details: None,
        rocket: None,
        launchpad: None,
        links: Default::default(),
    }
}

pub fn page(ids: &[&str], has_next_page: bool) -> PageResult {
    PageResult {
        launches: ids.iter().map(|id| launch(id)).collect(),
        has_next_page,
    }
}

fn upstream_failure(path: &str) -> SourceError {
    SourceError::UpstreamStatus {
        status: 500,
        url: format!("http://scripted{}", path),
    }
}

/// Serves queued pages in order and records from maps; ids listed as
/// failing answer with an upstream 500.
#[derive(Default)]
pub struct ScriptedSource {
    pages: Mutex<VecDeque<SourceResult<PageResult>>>,
    all: Mutex<Option<SourceResult<Vec<LaunchRecord>>>>,
    launches: HashMap<String, LaunchRecord>,
    rockets: HashMap<String, RocketRecord>,
    launchpads: HashMap<String, LaunchpadRecord>,
    failing: HashSet<String>,
    page_calls: Mutex<Vec<(u32, u32)>>,
    lookups: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page: PageResult) -> Self {
        self.pages.lock().unwrap().push_back(Ok(page));
        self
    }

    pub fn with_page_error(self, err: SourceError) -> Self {
        self.pages.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_all(self, records: Vec<LaunchRecord>) -> Self {
        *self.all.lock().unwrap() = Some(Ok(records));
        self
    }

    pub fn with_all_error(self, err: SourceError) -> Self {
        *self.all.lock().unwrap() = Some(Err(err));
        self
    }

    pub fn with_launch(mut self, record: LaunchRecord) -> Self {
        self.launches.insert(record.id.clone(), record);
        self
    }

    pub fn with_rocket(mut self, id: &str, rocket: RocketRecord) -> Self {
        self.rockets.insert(id.to_string(), rocket);
        self
    }

    pub fn with_launchpad(mut self, id: &str, pad: LaunchpadRecord) -> Self {
        self.launchpads.insert(id.to_string(), pad);
        self
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn page_calls(&self) -> Vec<(u32, u32)> {
        self.page_calls.lock().unwrap().clone()
    }

    /// Paths of every by-id lookup, e.g. "/rockets/r1"
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    fn lookup<T: Clone>(
        &self,
        collection: &str,
        kind: &'static str,
        map: &HashMap<String, T>,
        id: &str,
    ) -> SourceResult<T> {
        let path = format!("/{}/{}", collection, id);
        self.lookups.lock().unwrap().push(path.clone());
        if self.failing.contains(id) {
            return Err(upstream_failure(&path));
        }
        map.get(id).cloned().ok_or_else(|| SourceError::NotFound {
            kind,
            id: id.to_string(),
        })
    }
}

#[async_trait]
impl LaunchSource for ScriptedSource {
    async fn list_launches(&self, page: u32, page_size: u32) -> SourceResult<PageResult> {
        self.page_calls.lock().unwrap().push((page, page_size));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(upstream_failure("/launches/query")))
    }

    async fn get_launch(&self, id: &str) -> SourceResult<LaunchRecord> {
        self.lookup("launches", "launch", &self.launches, id)
    }

    async fn get_all_launches(&self, cap: u32) -> SourceResult<Vec<LaunchRecord>> {
        let mut records = self.all.lock().unwrap().take().unwrap_or(Ok(Vec::new()))?;
        records.truncate(cap as usize);
        Ok(records)
    }

    async fn get_rocket(&self, id: &str) -> SourceResult<RocketRecord> {
        self.lookup("rockets", "rocket", &self.rockets, id)
    }

    async fn get_launchpad(&self, id: &str) -> SourceResult<LaunchpadRecord> {
        self.lookup("launchpads", "launchpad", &self.launchpads, id)
    }
}
