// Job Domain Model
//
// Read-only payload returned by the listing endpoint. Decoding is lenient:
// only presence matters for rendering decisions, so odd optional fields
// degrade to `None` instead of failing the whole page.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Job ID (numeric or string on the wire, kept as text)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => JobId(n.to_string()),
            RawId::Text(s) => JobId(s),
        })
    }
}

/// Work arrangement of a posting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Remote,
    Hybrid,
    #[serde(alias = "on-site", alias = "on_site")]
    Onsite,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl LocationType {
    /// Wire value, as sent in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Remote => "remote",
            LocationType::Hybrid => "hybrid",
            LocationType::Onsite => "onsite",
            LocationType::Unspecified => "unspecified",
        }
    }

    /// Human label
    pub fn label(&self) -> &'static str {
        match self {
            LocationType::Remote => "Remote",
            LocationType::Hybrid => "Hybrid",
            LocationType::Onsite => "On-site",
            LocationType::Unspecified => "Unspecified",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(LocationType::Remote),
            "hybrid" => Ok(LocationType::Hybrid),
            "onsite" | "on-site" | "on_site" => Ok(LocationType::Onsite),
            other => Err(DomainError::UnknownLocationType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Server-computed match quality (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub total_score: f64,
}

/// Job Entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: Company,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_type: LocationType,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub salary_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub salary_max: Option<f64>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub posted_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,

    /// Outbound application link, passed through untouched
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_url: String,

    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<MatchScore>,
}

impl Job {
    /// Create a job with only identity and title set
    pub fn new(id: impl Into<JobId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: Company::default(),
            location: String::new(),
            location_type: LocationType::Unspecified,
            salary_min: None,
            salary_max: None,
            posted_date: None,
            description: None,
            required_skills: None,
            source_url: String::new(),
            score: None,
        }
    }

    pub fn with_score(mut self, total_score: f64) -> Self {
        self.score = Some(MatchScore { total_score });
        self
    }

    pub fn with_company(mut self, name: impl Into<String>) -> Self {
        self.company.name = name.into();
        self
    }

    /// Required skills, empty when the endpoint sent none
    pub fn skills(&self) -> &[String] {
        self.required_skills.as_deref().unwrap_or(&[])
    }

    pub fn total_score(&self) -> Option<f64> {
        self.score.map(|s| s.total_score)
    }
}

// Salaries arrive as numbers or decimal strings ("120000.00")
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Number(n)) => Some(n),
        Some(RawAmount::Text(s)) => s.trim().parse().ok(),
        Some(RawAmount::Other(_)) | None => None,
    })
}

// `null` reads as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Scores arrive as numbers or decimal strings; anything else means no score
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<MatchScore>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct RawScore {
        #[serde(default, deserialize_with = "lenient_amount")]
        total_score: Option<f64>,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawField {
        Score(RawScore),
        Other(serde_json::Value),
    }

    Ok(match Option::<RawField>::deserialize(deserializer)? {
        Some(RawField::Score(raw)) => raw.total_score.map(|total_score| MatchScore { total_score }),
        Some(RawField::Other(_)) | None => None,
    })
}

// RFC 3339 timestamps or bare dates
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::String(s)) = raw else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&s) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    Ok(NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc()))
}
