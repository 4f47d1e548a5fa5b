//! Compliance export
//!
//! Renders the full event log as CSV for audit hand-off. The header is the
//! event field set in declaration order; every cell is JSON-encoded so
//! prompts containing commas or quotes survive the round trip. An empty log
//! produces the literal body `No events found.` instead of a CSV.

use super::types::GuardEvent;

/// Body returned when the event log is empty.
pub const EMPTY_EXPORT_BODY: &str = "No events found.";

/// Render events as CSV, one row per event in append order.
pub fn render_csv(events: &[GuardEvent]) -> String {
    if events.is_empty() {
        return EMPTY_EXPORT_BODY.to_string();
    }

    let header = GuardEvent::FIELDS.join(",");
    let mut lines = vec![header];

    for event in events {
        // Serializing the whole event and indexing by field keeps cell
        // encoding consistent with the persisted wire format.
        let value = serde_json::to_value(event).unwrap_or_default();
        let cells: Vec<String> = GuardEvent::FIELDS
            .iter()
            .map(|field| {
                let cell = value
                    .get(field)
                    .cloned()
                    .unwrap_or(serde_json::Value::String(String::new()));
                serde_json::to_string(&cell).unwrap_or_default()
            })
            .collect();
        lines.push(cells.join(","));
    }

    lines.join("\n")
}
