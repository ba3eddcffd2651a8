//! Mood history
//!
//! The backend has no history endpoint yet; the view renders a fixed list.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DISPLAY_FORMAT: &str = "%b %d, %Y %H:%M";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: NaiveDateTime,
    pub label: String,
    pub note: String,
}

impl HistoryEntry {
    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, label: &str, note: &str) -> Option<Self> {
        let timestamp = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(hh, mm, 0)?;
        Some(Self {
            timestamp,
            label: label.to_string(),
            note: note.to_string(),
        })
    }

    /// e.g. `Nov 17, 2025 09:30`
    pub fn display_time(&self) -> String {
        self.timestamp.format(DISPLAY_FORMAT).to_string()
    }
}

/// Static entries shown until history is backend-sourced, newest first.
pub fn placeholder_entries() -> Vec<HistoryEntry> {
    [
        HistoryEntry::at(2025, 11, 17, 9, 30, "happy", "Woke up good"),
        HistoryEntry::at(2025, 11, 16, 21, 15, "sad", "Tough day"),
        HistoryEntry::at(2025, 11, 15, 18, 2, "neutral", "Normal"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_entries() {
        let entries = placeholder_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label, "happy");
        assert_eq!(entries[1].note, "Tough day");
        assert_eq!(entries[2].label, "neutral");
    }

    #[test]
    fn test_display_time_format() {
        let entries = placeholder_entries();
        assert_eq!(entries[0].display_time(), "Nov 17, 2025 09:30");
        assert_eq!(entries[2].display_time(), "Nov 15, 2025 18:02");
    }

    #[test]
    fn test_entries_newest_first() {
        let entries = placeholder_entries();
        assert!(entries.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }
}
