//! Replaying adapters that serve recorded interactions.

pub mod tracker;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use tracker::ReplayingIssueSearch;

/// Pull the next recorded output for `port::method`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, String> {
    let mut guard = replayer.lock().map_err(|_| "replayer lock poisoned".to_string())?;
    guard.next_interaction(port, method).map(|i| i.output.clone())
}

/// Decode an output stored with the `{"ok": v}` / `{"err": "msg"}` convention.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().map_or_else(|| err.to_string(), ToString::to_string);
        return Err(msg.into());
    }
    let Some(ok) = output.get("ok") else {
        return Err(format!("Recorded output has neither ok nor err: {output}").into());
    };
    serde_json::from_value(ok.clone())
        .map_err(|e| format!("Failed to decode recorded output: {e}").into())
}
