//! Where the task page gets its records from.
//!
//! The view only ever sees a `TaskSource`; it fetches the ordered list once at
//! construction and never writes back.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::task::{TaskRecord, UNASSIGNED};

/// Provider of the ordered task list shown on the page.
pub trait TaskSource {
    /// Short human-readable name, used in logs.
    fn describe(&self) -> String;

    /// Fetch the ordered task list.
    fn fetch_tasks(&self) -> Result<Vec<TaskRecord>>;
}

/// The built-in pair of sample cases.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleSource;

impl TaskSource for SampleSource {
    fn describe(&self) -> String {
        "built-in sample".to_string()
    }

    fn fetch_tasks(&self) -> Result<Vec<TaskRecord>> {
        Ok(vec![
            TaskRecord::new("case-777", "work fast", UNASSIGNED, date(2024, 11, 25), date(2024, 11, 25)),
            TaskRecord::new("case-123", "complete soon", "Admin", date(2024, 11, 20), date(2024, 11, 30)),
        ])
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal dates above are all valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Object layout of a task file: `{ "tasks": [...] }`.
#[derive(Deserialize)]
struct WrappedTasks {
    tasks: Vec<TaskRecord>,
}

/// Parse a task file, either a bare array or an object with a `tasks` array.
/// The layout is picked from the first token so serde_json's error keeps its
/// line and column.
fn parse_tasks(buf: &str) -> serde_json::Result<Vec<TaskRecord>> {
    if buf.trim_start().starts_with('{') {
        serde_json::from_str::<WrappedTasks>(buf).map(|file| file.tasks)
    } else {
        serde_json::from_str(buf)
    }
}

/// Tasks read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }
}

impl TaskSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_tasks(&self) -> Result<Vec<TaskRecord>> {
        let buf = fs::read_to_string(&self.path).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_tasks(&buf).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Pick the source for an optional `--data` path.
pub fn source_for(data: Option<&Path>) -> Box<dyn TaskSource> {
    match data {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(SampleSource),
    }
}
