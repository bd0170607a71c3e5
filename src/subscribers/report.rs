//! # ReportWriter — user-facing result lines
//!
//! Prints the pipeline's output contract on stdout:
//!
//! ```text
//! Count for notes.txt: 3
//! Count for https://example.com: 0
//! Total: 3
//! ```
//!
//! Per-subscriber FIFO delivery plus `PipelineFinished` being the last event of a
//! run guarantee the `Total` line comes after every `Count for` line.

use std::io::Write;

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Report line printer.
#[derive(Default)]
pub struct ReportWriter;

impl ReportWriter {
    /// Construct a new [`ReportWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders the report line for an event, if it has one.
    pub fn render(event: &Event) -> Option<String> {
        match event.kind {
            EventKind::SourceCounted => Some(format!(
                "Count for {}: {}",
                event.source.as_deref().unwrap_or(""),
                event.count.unwrap_or(0)
            )),
            EventKind::PipelineFinished => Some(format!("Total: {}", event.count.unwrap_or(0))),
            _ => None,
        }
    }
}

#[async_trait]
impl Subscribe for ReportWriter {
    async fn on_event(&self, e: &Event) {
        if let Some(line) = Self::render(e) {
            let mut out = std::io::stdout().lock();
            if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
                tracing::error!(error = %err, "failed to write report line");
            }
        }
    }

    fn name(&self) -> &'static str {
        "ReportWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_count_line() {
        let ev = Event::new(EventKind::SourceCounted)
            .with_source("notes.txt")
            .with_count(3);
        assert_eq!(
            ReportWriter::render(&ev).as_deref(),
            Some("Count for notes.txt: 3")
        );
    }

    #[test]
    fn test_render_total_line() {
        let ev = Event::new(EventKind::PipelineFinished).with_count(42);
        assert_eq!(ReportWriter::render(&ev).as_deref(), Some("Total: 42"));
    }

    #[test]
    fn test_other_events_are_silent() {
        let ev = Event::new(EventKind::OpenFailed).with_source("missing");
        assert!(ReportWriter::render(&ev).is_none());
    }
}
