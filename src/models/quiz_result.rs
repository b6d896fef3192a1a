// src/models/quiz_result.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::PASSING_SCORE;

/// One stored grading of a free-text answer (`GET /quiz-results`).
///
/// The service stores the point lists as JSON-encoded strings;
/// use [`QuizResultItem::weak_points`] and [`QuizResultItem::correct_points`] to decode them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResultItem {
    pub id: i64,
    pub chapter_title: String,
    pub score: i64,
    #[serde(rename = "weak_points")]
    pub weak_points_raw: String,
    #[serde(rename = "correct_points", default)]
    pub correct_points_raw: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResultListResponse {
    pub results: Vec<QuizResultItem>,
}

impl QuizResultItem {
    pub fn weak_points(&self) -> Vec<String> {
        decode_points(&self.weak_points_raw)
    }

    pub fn correct_points(&self) -> Vec<String> {
        self.correct_points_raw
            .as_deref()
            .map(decode_points)
            .unwrap_or_default()
    }

    pub fn passed(&self) -> bool {
        self.score >= PASSING_SCORE
    }
}

/// Malformed lists decode to empty rather than failing the whole listing.
fn decode_points(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!("Failed to decode stored point list {:?}: {}", raw, e);
        Vec::new()
    })
}

/// Accepts RFC 3339 timestamps and naive ones (which the service writes in UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}
