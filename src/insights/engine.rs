use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::clock;
use crate::entries::repo::Entry;
use crate::insights::format::format_hours;

/// Tags that count a session as productive or mindful.
pub const PRODUCTIVE_TAGS: [&str; 2] = ["✅ Productive", "🧘 Mindful Use"];

/// Aggregates derived from one user's entry list for the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    /// Most recent entry whose journal-local date is today, if any.
    pub today_entry: Option<Entry>,
    /// App name to cumulative screen-time minutes.
    pub per_app_minutes: BTreeMap<String, i64>,
    /// App name to number of entries mentioning it.
    pub per_app_counts: BTreeMap<String, i64>,
    /// Tag to occurrence count across all entries.
    pub per_tag_counts: BTreeMap<String, i64>,
    /// Percentage of entries carrying a productive tag, in [0, 100].
    pub productivity_ratio: i64,
    /// Highest-count tag; ties go to whichever was encountered first.
    /// Empty when no entry has tags.
    pub most_used_tag: String,
    pub average_screen_time: i64,
    pub average_screen_time_display: String,
    pub total_screen_time: i64,
    pub total_screen_time_display: String,
    pub total_entries: usize,
}

/// Fold the entry list (as delivered by the entry store, newest first) into
/// the dashboard summary. `today` is the caller's journal-local date.
pub fn summarize(entries: &[Entry], today: Date) -> InsightSummary {
    let today_entry = entries
        .iter()
        .find(|e| clock::to_local(e.created_at).date() == today)
        .cloned();

    let mut per_app_minutes: BTreeMap<String, i64> = BTreeMap::new();
    let mut per_app_counts: BTreeMap<String, i64> = BTreeMap::new();
    let mut per_tag_counts: BTreeMap<String, i64> = BTreeMap::new();
    // First-encounter order of tags, for the deterministic tie-break.
    let mut tag_order: Vec<String> = Vec::new();
    let mut productive_entries = 0i64;
    let mut total_screen_time = 0i64;

    for entry in entries {
        total_screen_time += entry.screen_time;

        for app in &entry.apps {
            *per_app_minutes.entry(app.clone()).or_default() += entry.screen_time;
            *per_app_counts.entry(app.clone()).or_default() += 1;
        }

        for tag in &entry.tags {
            if !per_tag_counts.contains_key(tag) {
                tag_order.push(tag.clone());
            }
            *per_tag_counts.entry(tag.clone()).or_default() += 1;
        }

        if entry
            .tags
            .iter()
            .any(|t| PRODUCTIVE_TAGS.contains(&t.as_str()))
        {
            productive_entries += 1;
        }
    }

    let total_entries = entries.len();

    let mut most_used_tag = String::new();
    let mut best_count = 0i64;
    for tag in &tag_order {
        let count = per_tag_counts[tag];
        if count > best_count {
            best_count = count;
            most_used_tag = tag.clone();
        }
    }

    let productivity_ratio = if total_entries == 0 {
        0
    } else {
        (100.0 * productive_entries as f64 / total_entries as f64).round() as i64
    };

    let average_screen_time = if total_entries == 0 {
        0
    } else {
        (total_screen_time as f64 / total_entries as f64).round() as i64
    };

    InsightSummary {
        today_entry,
        per_app_minutes,
        per_app_counts,
        per_tag_counts,
        productivity_ratio,
        most_used_tag,
        average_screen_time,
        average_screen_time_display: format_hours(average_screen_time),
        total_screen_time,
        total_screen_time_display: format_hours(total_screen_time),
        total_entries,
    }
}
