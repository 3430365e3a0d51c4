//! WASM bindings for schedule-engine.
//!
//! Exposes schedule generation and recurrence expansion to JavaScript via
//! `wasm-bindgen`, so a browser client can generate its timeline locally with
//! the same algorithm a server would run. All complex types cross the
//! boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p schedule-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/schedule-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/schedule_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime};
use schedule_engine::{Event, GeneratorConfig, Task};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Input document for [`generate_schedule`]. `now` is required: the browser
/// host reads its own clock and passes the value in.
#[derive(Deserialize)]
struct GenerateInput {
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    tasks: Vec<Task>,
    now: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a wall-clock datetime.
///
/// Accepts naive local time (e.g., "2026-03-16T08:00:00") and RFC 3339
/// (e.g., "2026-03-16T08:00:00+01:00"), keeping the local wall-clock part.
fn parse_datetime(s: &str) -> Result<NaiveDateTime, JsValue> {
    if let Ok(naive) = s.parse::<NaiveDateTime>() {
        return Ok(naive);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

/// Parse an optional JSON config object; missing or empty means defaults.
fn parse_config(config_json: Option<String>) -> Result<GeneratorConfig, JsValue> {
    match config_json.as_deref().map(str::trim) {
        None | Some("") => Ok(GeneratorConfig::default()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {}", e))),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate a timeline.
///
/// `input_json` is `{"events": [...], "tasks": [...], "now": "..."}`.
/// `config_json` is an optional object with any of `work_window_start`,
/// `work_window_end`, `slot_granularity_minutes`, `recurrence_horizon_days`.
///
/// Returns the JSON-encoded `{items, unplaced}` result.
#[wasm_bindgen(js_name = "generateSchedule")]
pub fn generate_schedule(input_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    let input: GenerateInput = serde_json::from_str(input_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid input JSON: {}", e)))?;
    let now = parse_datetime(&input.now)?;
    let config = parse_config(config_json)?;

    let result = schedule_engine::generate(&input.events, &input.tasks, now, &config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&result)
}

/// Expand events into concrete occurrences.
///
/// `events_json` is a JSON array of events. Recurring events are expanded
/// from `now`'s date over `horizon_days` further days; the horizon is
/// validated like the generator's `recurrence_horizon_days`. Returns a JSON
/// array of `{event_id, name, start, end}` objects.
#[wasm_bindgen(js_name = "expandEvents")]
pub fn expand_events(events_json: &str, now: &str, horizon_days: u32) -> Result<String, JsValue> {
    let events: Vec<Event> = serde_json::from_str(events_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))?;
    let now = parse_datetime(now)?;
    let config = GeneratorConfig::default()
        .with_recurrence_horizon_days(horizon_days)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    for event in &events {
        event.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
    }

    to_json(&schedule_engine::expand_all(&events, now.date(), config.recurrence_horizon_days()))
}
