/// External API clients module
use crate::domain::{LaunchRecord, LaunchpadRecord, PageResult, RocketRecord};
use crate::errors::{SourceError, SourceResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Default number of records fetched for analytics
pub const DEFAULT_ANALYTICS_CAP: u32 = 200;

/// Read access to launch, rocket and launchpad records.
///
/// Every call goes to the remote source: no caching, no retries and no
/// sharing of identical in-flight requests.
#[async_trait]
pub trait LaunchSource: Send + Sync {
    /// One page of launches, newest first. `page` starts at 1.
    async fn list_launches(&self, page: u32, page_size: u32) -> SourceResult<PageResult>;

    async fn get_launch(&self, id: &str) -> SourceResult<LaunchRecord>;

    /// Up to `cap` launches, newest first. A payload without a record list
    /// yields an empty vector.
    async fn get_all_launches(&self, cap: u32) -> SourceResult<Vec<LaunchRecord>>;

    async fn get_rocket(&self, id: &str) -> SourceResult<RocketRecord>;

    async fn get_launchpad(&self, id: &str) -> SourceResult<LaunchpadRecord>;
}

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent("rust-launches-service/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Response of the paginated launches query
#[derive(Debug, Deserialize)]
struct QueryPage {
    #[serde(default)]
    docs: Option<Vec<LaunchRecord>>,
    #[serde(rename = "hasNextPage", default)]
    has_next_page: bool,
}

/// SpaceX v4 API client
pub struct SpaceXClient {
    http_client: HttpClient,
    base_url: Url,
}

impl SpaceXClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        let raw = base_url.into();
        let invalid = |reason: String| SourceError::InvalidBaseUrl {
            url: raw.clone(),
            reason,
        };
        let base_url = Url::parse(raw.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".to_string()));
        }

        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended by `segments`, each percent-encoded as a single
    /// path segment (`/`, `?` and `%` never leak into the path structure).
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Run the launches query endpoint with the given options
    async fn query_launches(&self, options: Value) -> SourceResult<QueryPage> {
        let url = self.endpoint(&["launches", "query"]);
        let body = json!({ "query": {}, "options": options });
        let req = self.http_client.get_client().post(url.clone()).json(&body);
        send_json(req, url.as_str(), "launches").await
    }

    async fn get_by_id<T: DeserializeOwned>(
        &self,
        collection: &str,
        kind: &'static str,
        id: &str,
    ) -> SourceResult<T> {
        let not_found = || SourceError::NotFound {
            kind,
            id: id.to_string(),
        };
        // dot segments are dropped by the URL builder and would address the collection itself
        if id.trim().is_empty() || id == "." || id == ".." {
            return Err(not_found());
        }

        let url = self.endpoint(&[collection, id]);
        let req = self.http_client.get_client().get(url.clone());
        match send_json(req, url.as_str(), kind).await {
            Err(SourceError::UpstreamStatus { status: 404, .. }) => Err(not_found()),
            other => other,
        }
    }
}

/// Send a request and decode its JSON body, classifying failures
async fn send_json<T: DeserializeOwned>(
    req: RequestBuilder,
    url: &str,
    what: &str,
) -> SourceResult<T> {
    let resp = req.send().await?;
    let status = resp.status();
    debug!("{} request to {} returned {}", what, url, status);

    if !status.is_success() {
        return Err(SourceError::UpstreamStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let bytes = resp.bytes().await?;
    if status == StatusCode::NO_CONTENT || bytes.is_empty() {
        return Err(SourceError::MalformedData(format!(
            "empty {} payload from {}",
            what, url
        )));
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| SourceError::MalformedData(format!("{} payload from {}: {}", what, url, e)))
}

#[async_trait]
impl LaunchSource for SpaceXClient {
    async fn list_launches(&self, page: u32, page_size: u32) -> SourceResult<PageResult> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let data = self
            .query_launches(json!({
                "page": page,
                "limit": page_size,
                "sort": { "date_utc": -1 },
            }))
            .await?;

        let launches = data.docs.ok_or_else(|| {
            SourceError::MalformedData(format!("launch page {} has no docs list", page))
        })?;
        debug!(
            "Fetched launch page {} ({} records, more: {})",
            page,
            launches.len(),
            data.has_next_page
        );

        Ok(PageResult {
            launches,
            has_next_page: data.has_next_page,
        })
    }

    async fn get_launch(&self, id: &str) -> SourceResult<LaunchRecord> {
        self.get_by_id("launches", "launch", id).await
    }

    async fn get_all_launches(&self, cap: u32) -> SourceResult<Vec<LaunchRecord>> {
        let data = self
            .query_launches(json!({
                "limit": cap.max(1),
                "sort": { "date_utc": -1 },
            }))
            .await?;
        Ok(data.docs.unwrap_or_default())
    }

    async fn get_rocket(&self, id: &str) -> SourceResult<RocketRecord> {
        self.get_by_id("rockets", "rocket", id).await
    }

    async fn get_launchpad(&self, id: &str) -> SourceResult<LaunchpadRecord> {
        self.get_by_id("launchpads", "launchpad", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SpaceXClient {
        SpaceXClient::new("https://api.spacexdata.com/v4/", Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client();
        assert_eq!(client.base_url(), "https://api.spacexdata.com/v4");
        assert_eq!(
            client.endpoint(&["rockets", "abc"]).as_str(),
            "https://api.spacexdata.com/v4/rockets/abc"
        );
    }

    #[test]
    fn test_id_is_a_single_path_segment() {
        let client = client();
        assert_eq!(
            client.endpoint(&["launches", "../rockets/rocket1"]).as_str(),
            "https://api.spacexdata.com/v4/launches/..%2Frockets%2Frocket1"
        );
        let url = client.endpoint(&["launches", "1?x=1"]);
        assert!(url.query().is_none());
        assert_eq!(url.path(), "/v4/launches/1%3Fx=1");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = SpaceXClient::new("not a url", Duration::from_secs(10))
            .err()
            .unwrap();
        assert!(matches!(err, SourceError::InvalidBaseUrl { .. }));
        assert_eq!(err.code(), "INVALID_CONFIG");
    }

    #[tokio::test]
    async fn test_dot_ids_are_not_found_without_request() {
        let client = client();
        for id in ["", "  ", ".", ".."] {
            let err = client.get_launch(id).await.unwrap_err();
            assert!(matches!(err, SourceError::NotFound { kind: "launch", .. }), "{:?}", id);
        }
    }

    #[test]
    fn test_query_page_defaults() {
        let page: QueryPage = serde_json::from_value(json!({"totalDocs": 0})).unwrap();
        assert!(page.docs.is_none());
        assert!(!page.has_next_page);

        let page: QueryPage = serde_json::from_value(json!({
            "docs": [{"id": "a"}],
            "hasNextPage": true,
            "page": 1
        }))
        .unwrap();
        assert_eq!(page.docs.map(|d| d.len()), Some(1));
        assert!(page.has_next_page);
    }
}
