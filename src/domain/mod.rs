/// Domain models for the application
use crate::utils::{format_launch_date, or_placeholder, year_of, NOT_AVAILABLE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Tri-state launch result.
///
/// On the wire this is the nullable `success` field: `true`, `false` or
/// `null`. A missing field or any other JSON value decodes as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    Succeeded,
    Failed,
    #[default]
    Pending,
}

impl Outcome {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Bool(true) => Outcome::Succeeded,
            Value::Bool(false) => Outcome::Failed,
            _ => Outcome::Pending,
        }
    }

    /// Status badge text
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "SUCCESS",
            Outcome::Failed => "FAILED",
            Outcome::Pending => "PENDING",
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Succeeded => serializer.serialize_bool(true),
            Outcome::Failed => serializer.serialize_bool(false),
            Outcome::Pending => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(deserializer)?;
        Ok(Outcome::from_json(&v))
    }
}

/// External links attached to a launch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchLinks {
    #[serde(default)]
    pub presskit: Option<String>,
    #[serde(default)]
    pub webcast: Option<String>,
    #[serde(default)]
    pub article: Option<String>,
    #[serde(default)]
    pub wikipedia: Option<String>,
}

impl LaunchLinks {
    pub fn is_empty(&self) -> bool {
        self.presskit.is_none()
            && self.webcast.is_none()
            && self.article.is_none()
            && self.wikipedia.is_none()
    }
}

/// One launch as returned by the launches endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub flight_number: Option<i64>,
    #[serde(default)]
    pub date_utc: Option<String>,
    #[serde(rename = "success", default)]
    pub outcome: Outcome,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub rocket: Option<String>,
    #[serde(default)]
    pub launchpad: Option<String>,
    #[serde(default, deserialize_with = "links_or_default")]
    pub links: LaunchLinks,
}

impl LaunchRecord {
    /// Launch timestamp, `None` when absent or unparseable
    pub fn launched_at(&self) -> Option<DateTime<Utc>> {
        self.date_utc
            .as_deref()
            .and_then(crate::utils::parse_timestamp)
    }

    /// Calendar year of the launch, `None` when absent or unparseable
    pub fn year(&self) -> Option<i32> {
        self.date_utc.as_deref().and_then(year_of)
    }

    pub fn display_name(&self) -> String {
        or_placeholder(self.name.as_deref(), "Unknown Mission")
    }

    pub fn display_flight_number(&self) -> String {
        self.flight_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn display_date(&self) -> String {
        format_launch_date(self.date_utc.as_deref())
    }
}

fn links_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LaunchLinks, D::Error> {
    Ok(Option::<LaunchLinks>::deserialize(deserializer)?.unwrap_or_default())
}

/// Rocket referenced by a launch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RocketRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Launch site referenced by a launch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchpadRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl LaunchpadRecord {
    /// "Locality, Region" with a placeholder for each missing part
    pub fn location(&self) -> String {
        format!(
            "{}, {}",
            or_placeholder(self.locality.as_deref(), NOT_AVAILABLE),
            or_placeholder(self.region.as_deref(), NOT_AVAILABLE)
        )
    }
}

/// One page of the launch listing
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub launches: Vec<LaunchRecord>,
    pub has_next_page: bool,
}

/// A launch with its related rocket and launchpad, when those resolved
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchDetail {
    pub launch: LaunchRecord,
    pub rocket: Option<RocketRecord>,
    pub launchpad: Option<LaunchpadRecord>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}

/// Launch as shown in the list view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchCard {
    pub id: String,
    pub mission: String,
    pub flight_number: String,
    pub date: String,
    pub status: &'static str,
    pub rocket: Option<String>,
}

impl From<&LaunchRecord> for LaunchCard {
    fn from(r: &LaunchRecord) -> Self {
        Self {
            id: r.id.clone(),
            mission: r.display_name(),
            flight_number: r.display_flight_number(),
            date: r.display_date(),
            status: r.outcome.label(),
            rocket: r.rocket.clone(),
        }
    }
}

/// Launch section of the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchView {
    pub id: String,
    pub name: String,
    pub flight_number: String,
    pub date: String,
    pub date_utc: Option<String>,
    pub status: &'static str,
    pub success: Outcome,
    pub details: Option<String>,
    pub links: LaunchLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocketPanel {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchpadPanel {
    pub name: String,
    pub location: String,
    pub details: Option<String>,
}

/// Detail view; related panels are omitted when their lookup failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchDetailView {
    pub launch: LaunchView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rocket: Option<RocketPanel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launchpad: Option<LaunchpadPanel>,
}

impl From<&LaunchDetail> for LaunchDetailView {
    fn from(d: &LaunchDetail) -> Self {
        let l = &d.launch;
        Self {
            launch: LaunchView {
                id: l.id.clone(),
                name: l.display_name(),
                flight_number: l.display_flight_number(),
                date: l.display_date(),
                date_utc: l.date_utc.clone(),
                status: l.outcome.label(),
                success: l.outcome,
                details: l.details.clone(),
                links: l.links.clone(),
            },
            rocket: d.rocket.as_ref().map(|r| RocketPanel {
                name: or_placeholder(r.name.as_deref(), NOT_AVAILABLE),
                kind: or_placeholder(r.kind.as_deref(), NOT_AVAILABLE),
                description: r.description.clone(),
            }),
            launchpad: d.launchpad.as_ref().map(|p| LaunchpadPanel {
                name: or_placeholder(p.name.as_deref(), NOT_AVAILABLE),
                location: p.location(),
                details: p.details.clone(),
            }),
        }
    }
}
