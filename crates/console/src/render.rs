//! Read-only text rendering of the view state.
//!
//! Everything here is a pure function of [`ViewState`] and the lookup
//! directory; no function mutates anything. The table shows the filtered
//! projection; whatever modal is open renders beneath it.

use paddock_core::filter::TIMESTAMP_FORMAT;
use paddock_core::geometry::FeatureCollection;
use paddock_core::lookup::{LookupDirectory, UNKNOWN_LABEL};
use paddock_core::record::LogRecord;
use paddock_core::types::Timestamp;

use crate::state::{Modal, ViewState};

/// Track preview dimensions, in character cells.
const MAP_WIDTH: usize = 48;
const MAP_HEIGHT: usize = 14;

const TABLE_HEADERS: [&str; 9] = [
    "ID", "CAPTURED AT", "DURATION", "CH", "RECOVERY", "PARSE", "CAR", "DRIVER", "EVENT",
];

/// Render the whole console screen.
pub fn render(state: &ViewState, lookups: &LookupDirectory) -> String {
    let mut lines = Vec::new();

    if let Some(error) = &state.error {
        lines.push(format!("!! {error}"));
    }
    let active = state.busy.active();
    if !active.is_empty() {
        lines.push(format!(".. {}", active.join(", ")));
    }

    render_table(&mut lines, state, lookups);

    if let Some(summary) = &state.summary {
        lines.push(String::new());
        lines.push("Parse summary:".into());
        let rendered =
            serde_json::to_string_pretty(summary).unwrap_or_else(|_| summary.to_string());
        lines.extend(rendered.lines().map(|l| format!("  {l}")));
    }

    render_modal(&mut lines, state, lookups);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

fn render_table(lines: &mut Vec<String>, state: &ViewState, lookups: &LookupDirectory) {
    if state.logs.is_empty() {
        lines.push("No logs found. Upload a file to get started.".into());
        return;
    }

    let visible = state.visible_logs(lookups);
    let query = state.query.trim();
    if !query.is_empty() {
        lines.push(format!(
            "{} of {} logs match \"{query}\"",
            visible.len(),
            state.logs.len()
        ));
    }

    let rows: Vec<[String; 9]> = visible
        .iter()
        .map(|log| table_row(log, lookups))
        .collect();

    let mut widths: [usize; 9] = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    lines.push(format_row(&TABLE_HEADERS.map(String::from), &widths));
    lines.push(widths.map(|w| "-".repeat(w)).join("-+-"));
    for row in &rows {
        lines.push(format_row(row, &widths));
    }
}

fn table_row(log: &LogRecord, lookups: &LookupDirectory) -> [String; 9] {
    [
        log.id.to_string(),
        format_timestamp(log.captured_at.as_ref()),
        log.duration_seconds
            .map(|d| format!("{d:.1}s"))
            .unwrap_or_else(|| UNKNOWN_LABEL.into()),
        log.channel_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| UNKNOWN_LABEL.into()),
        log.recovery_status
            .clone()
            .unwrap_or_else(|| UNKNOWN_LABEL.into()),
        log.parse_status
            .clone()
            .unwrap_or_else(|| UNKNOWN_LABEL.into()),
        lookups.resolve_name(log.car.as_ref()),
        lookups.resolve_name(log.driver.as_ref()),
        lookups.resolve_name(log.event_type.as_ref()),
    ]
}

fn format_row(cells: &[String; 9], widths: &[usize; 9]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn format_timestamp(value: Option<&Timestamp>) -> String {
    value
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN_LABEL.into())
}

// ---------------------------------------------------------------------------
// Modals
// ---------------------------------------------------------------------------

fn render_modal(lines: &mut Vec<String>, state: &ViewState, lookups: &LookupDirectory) {
    match &state.modal {
        Modal::None => {}
        Modal::Viewing(id) => {
            lines.push(String::new());
            lines.push(format!("Log details - ID: {id}"));
            match &state.selected {
                Some(record) => render_details(lines, record, lookups),
                None => lines.push("  (record not loaded)".into()),
            }
            lines.push("(close to dismiss)".into());
        }
        Modal::Editing(id) => {
            lines.push(String::new());
            lines.push(format!("Editing log {id}"));
            if let Some(draft) = &state.draft {
                lines.push(format!("  car:        {}", draft_field(&draft.car)));
                lines.push(format!("  driver:     {}", draft_field(&draft.driver)));
                lines.push(format!("  event type: {}", draft_field(&draft.event_type)));
                lines.push(format!("  notes:      {}", draft_field(&draft.notes)));
            }
            lines.push("(set <field> <value>, then save [put]; cancel to discard)".into());
        }
        Modal::ConfirmingDelete(id) => {
            lines.push(String::new());
            lines.push(format!(
                "Delete log {id}? This action cannot be undone. (confirm / cancel)"
            ));
        }
        Modal::ShowingMap { log_id, geometry } => {
            lines.push(String::new());
            lines.push(format!("Track preview - log {log_id}"));
            match geometry {
                Some(collection) if !collection.track_points().is_empty() => {
                    lines.extend(render_track(collection));
                }
                _ => lines.push(format!("No track data available for log {log_id}.")),
            }
            lines.push("(close to dismiss)".into());
        }
    }
}

fn render_details(lines: &mut Vec<String>, record: &LogRecord, lookups: &LookupDirectory) {
    let labelled = [
        ("recovery status", record.recovery_status.clone()),
        ("parse status", record.parse_status.clone()),
        (
            "captured at",
            record
                .captured_at
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
        ),
        (
            "duration",
            record.duration_seconds.map(|d| format!("{d:.1}s")),
        ),
        ("channel count", record.channel_count.map(|c| c.to_string())),
        ("rough point", record.rough_point.clone()),
        ("car", Some(lookups.resolve_name(record.car.as_ref()))),
        ("driver", Some(lookups.resolve_name(record.driver.as_ref()))),
        (
            "event type",
            Some(lookups.resolve_name(record.event_type.as_ref())),
        ),
        (
            "created at",
            record
                .created_at
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
        ),
        (
            "updated at",
            record
                .updated_at
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
        ),
    ];
    for (label, value) in labelled {
        lines.push(format!(
            "  {label:<16} {}",
            value.unwrap_or_else(|| UNKNOWN_LABEL.into())
        ));
    }
    if let Some(channels) = &record.channels_summary {
        if !channels.is_empty() {
            lines.push(format!("  {:<16} {}", "channels", channels.join(", ")));
        }
    }
    if let Some(notes) = &record.notes {
        lines.push(format!("  {:<16} {notes}", "notes"));
    }
}

fn draft_field(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Track preview
// ---------------------------------------------------------------------------

/// Plot the track into a bordered character grid, longitude on the x
/// axis, latitude on the y axis (north up).
fn render_track(collection: &FeatureCollection) -> Vec<String> {
    let points = collection.track_points();
    let Some(bounds) = collection.bounding_box() else {
        return vec!["(empty track)".into()];
    };

    let mut grid = vec![vec![' '; MAP_WIDTH]; MAP_HEIGHT];
    for [lon, lat] in points {
        let x = scale(lon, bounds.min_lon, bounds.max_lon, MAP_WIDTH);
        let y = scale(lat, bounds.min_lat, bounds.max_lat, MAP_HEIGHT);
        grid[MAP_HEIGHT - 1 - y][x] = '*';
    }

    let border = format!("+{}+", "-".repeat(MAP_WIDTH));
    let mut lines = vec![border.clone()];
    for row in grid {
        lines.push(format!("|{}|", row.into_iter().collect::<String>()));
    }
    lines.push(border);
    lines
}

/// Map a coordinate into `0..cells`, centering degenerate extents.
fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if max <= min {
        return cells / 2;
    }
    let t = (value - min) / (max - min);
    ((t * (cells - 1) as f64).round() as usize).min(cells - 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
