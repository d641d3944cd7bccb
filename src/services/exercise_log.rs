use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{Exercise, User};
use crate::types::{parse_date, parse_leading_int, render_date, serialize_number};

/// Raw `from` / `to` / `limit` query parameters of the logs endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Inclusive date window plus an optional cap on the number of entries
#[derive(Debug, Clone, PartialEq)]
pub struct LogFilter {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub limit: Option<usize>,
}

impl LogFilter {
    /// Resolve query parameters against the request time.
    ///
    /// Missing or empty bounds default to the Unix epoch and `now`. A bound
    /// that does not parse produces a window nothing falls into.
    pub fn from_query(query: &LogQuery, now: DateTime<Utc>) -> Self {
        let from = bound(query.from.as_deref(), DateTime::<Utc>::UNIX_EPOCH);
        let to = bound(query.to.as_deref(), now);

        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            _ => (DateTime::<Utc>::MAX_UTC, DateTime::<Utc>::MIN_UTC),
        };

        let limit = query
            .limit
            .as_deref()
            .map(parse_leading_int)
            .filter(|n| *n > 0)
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX));

        Self { from, to, limit }
    }

    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        *date >= self.from && *date <= self.to
    }

    /// Filter in stored order, then keep the first `limit` entries
    pub fn apply<'a>(&self, exercises: &'a [Exercise]) -> Vec<&'a Exercise> {
        let matching = exercises.iter().filter(|e| self.contains(&e.date));
        match self.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }
}

fn bound(raw: Option<&str>, default: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(value) => parse_date(value),
    }
}

/// One entry of a log response, date rendered without time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub description: Option<String>,
    #[serde(serialize_with = "serialize_number")]
    pub duration: Option<f64>,
    pub date: String,
}

impl From<&Exercise> for LogEntry {
    fn from(exercise: &Exercise) -> Self {
        Self {
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: render_date(&exercise.date),
        }
    }
}

/// Body of `GET /api/users/:id/logs`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseLog {
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl ExerciseLog {
    pub fn build(user: &User, filter: &LogFilter) -> Self {
        let log: Vec<LogEntry> = filter
            .apply(&user.exercises)
            .into_iter()
            .map(LogEntry::from)
            .collect();

        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            count: log.len(),
            log,
        }
    }
}
