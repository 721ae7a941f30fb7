//! Result sink: serializes retained scored messages for the caller.

use mw_domain::error::Result;
use mw_domain::message::ScoredMessage;

/// Serialize scored messages as a JSON array to any writer.
pub fn write_json<W: std::io::Write>(scored: &[ScoredMessage], writer: W) -> Result<()> {
    serde_json::to_writer(writer, scored)?;
    Ok(())
}

/// Scored messages as an in-memory JSON value (used by the HTTP surface).
pub fn to_json(scored: &[ScoredMessage]) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(scored)?)
}
