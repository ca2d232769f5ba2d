//! Recording adapters that capture interactions to cassettes.

pub mod tracker;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use tracker::RecordingIssueSearch;

/// Record a `Result<T, E>` interaction using the ok/err JSON convention.
///
/// Mirror of `replaying::replay_result`:
/// - `Ok(v)` is stored as `{"ok": v}`
/// - `Err(e)` is stored as `{"err": e.to_string()}`
///
/// Values that fail to serialize are recorded as `null` with a warning so a
/// recording problem never changes the outcome of the wrapped call.
pub(crate) fn record_result<T, E, I>(
    recorder: &Mutex<CassetteRecorder>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = to_json(input);
    let output_json = match result {
        Ok(v) => serde_json::json!({ "ok": to_json(v) }),
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };

    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input_json, output_json),
        Err(_) => tracing::warn!(port, method, "Recorder lock poisoned; interaction dropped"),
    }
}

fn to_json<V: Serialize>(value: &V) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!("Failed to serialize recorded value: {e}");
        serde_json::Value::Null
    })
}

/// Shared handle to a recorder.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;
