//! Date-keyed observation diary backing the snow webtags.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowEntry {
    pub falling: bool,
    pub lying: bool,
    pub depth: f64,
}

/// Diary entries keyed by date, loaded once at startup. Lookups for missing
/// dates read as zeros.
#[derive(Debug, Clone, Default)]
pub struct SnowDiary {
    entries: HashMap<NaiveDate, SnowEntry>,
}

impl SnowDiary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("cannot open snow diary {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);
        let entries: HashMap<NaiveDate, SnowEntry> = serde_json::from_reader(reader)
            .with_context(|| format!("cannot parse snow diary {}", path.as_ref().display()))?;
        Ok(Self { entries })
    }

    pub fn insert(&mut self, date: NaiveDate, entry: SnowEntry) {
        self.entries.insert(date, entry);
    }

    pub fn entry_for(&self, date: NaiveDate) -> SnowEntry {
        self.entries.get(&date).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
