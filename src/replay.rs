//! Message script replay
//!
//! Parses a CSV script of controller messages and feeds it through a
//! registry, collecting the feedback for each line.
//!
//! ```text
//! address,id,mode,value,ts
//! /ch1/fader,1,direct,0.5,10
//! /ch1/encoder,2,,12,11
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::controller::{ControllerMode, UpdateOutcome};
use crate::registry::{ControllerRegistry, Feedback};

/// One scripted message
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReplayMessage {
    pub address: String,
    pub id: i32,
    #[serde(default, deserialize_with = "empty_as_default")]
    pub mode: ControllerMode,
    pub value: f32,
    pub ts: u32,
}

/// Outcome of a replay run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    /// Per-message feedback, `None` for dropped messages
    pub results: Vec<Option<Feedback>>,
    pub applied: usize,
    pub out_of_range: usize,
    pub stale: usize,
    pub dropped: usize,
}

impl ReplayReport {
    fn record(&mut self, feedback: Option<Feedback>) {
        match feedback.as_ref().map(|f| f.outcome) {
            Some(UpdateOutcome::Applied) => self.applied += 1,
            Some(UpdateOutcome::AppliedOutOfRange) => self.out_of_range += 1,
            Some(UpdateOutcome::Stale) => self.stale += 1,
            None => self.dropped += 1,
        }
        self.results.push(feedback);
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }
}

/// Parse a CSV script
pub fn parse_script(csv_content: &str) -> Result<Vec<ReplayMessage>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(csv_content.as_bytes());

    let mut messages = Vec::new();
    for (idx, result) in reader.deserialize().enumerate() {
        let message: ReplayMessage =
            result.with_context(|| format!("Failed to parse script row {}", idx + 1))?;
        messages.push(message);
    }

    debug!("Parsed {} scripted messages", messages.len());
    Ok(messages)
}

/// Load a CSV script from disk
pub async fn load_script(path: impl AsRef<Path>) -> Result<Vec<ReplayMessage>> {
    let path = path.as_ref();
    let csv_content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read script file: {}", path.display()))?;

    parse_script(&csv_content)
}

/// Feed `messages` through `registry` in order
pub fn replay(registry: &mut ControllerRegistry, messages: &[ReplayMessage]) -> ReplayReport {
    let mut report = ReplayReport::default();

    for message in messages {
        let feedback = registry.handle(
            &message.address,
            message.id,
            message.mode,
            message.value,
            message.ts,
        );
        if feedback.is_none() {
            warn!("Dropped message for {}", message.address);
        }
        report.record(feedback);
    }

    info!(
        "Replayed {} messages: {} applied, {} out of range, {} stale, {} dropped",
        report.total(),
        report.applied,
        report.out_of_range,
        report.stale,
        report.dropped
    );
    report
}

/// Treat an empty CSV cell as the default mode
fn empty_as_default<'de, D>(deserializer: D) -> std::result::Result<ControllerMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(ControllerMode::default()),
        Some(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCRIPT: &str = "\
address,id,mode,value,ts
/ch1/fader,1,direct,0.5,10
/ch1/fader,1,direct,0.9,9
# relative ticks
/ch1/encoder,2,,0.5,1
/ch1/encoder,2,,25,2
/ch1/button,3,toggle,7,0
/ch1/knob,4,direct,0.1,1
";

    #[test]
    fn test_parse_script() {
        let messages = parse_script(SCRIPT).unwrap();

        assert_eq!(messages.len(), 6);
        assert_eq!(messages[0].address, "/ch1/fader");
        assert_eq!(messages[2].mode, ControllerMode::Direct);
        assert_eq!(messages[4].mode, ControllerMode::Toggle);
        assert_eq!(messages[4].ts, 0);
    }

    #[test]
    fn test_parse_rejects_bad_mode() {
        let err = parse_script("address,id,mode,value,ts\n/a/fader,1,latch,0.1,1\n").unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_replay_counts() {
        let messages = parse_script(SCRIPT).unwrap();
        let mut registry = ControllerRegistry::default();

        let report = replay(&mut registry, &messages);

        assert_eq!(report.total(), 6);
        assert_eq!(report.applied, 3);
        assert_eq!(report.out_of_range, 1);
        assert_eq!(report.stale, 1);
        assert_eq!(report.dropped, 1);

        assert_eq!(registry.get("/ch1/fader").unwrap().value(), 0.5);
        assert_eq!(registry.get("/ch1/encoder").unwrap().value(), 0.75);
        assert_eq!(registry.get("/ch1/button").unwrap().value(), 7.0);
        assert!(report.results[5].is_none());
    }

    #[tokio::test]
    async fn test_load_script_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();

        let messages = load_script(file.path()).await.unwrap();
        assert_eq!(messages.len(), 6);
    }
}
