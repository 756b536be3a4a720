//! Log sink that captures driver output for assertions.

use routesync_common::{Level, LogRecord, LogSink};
use std::sync::Mutex;

/// Stores every record it receives.
///
/// Wrap it in an `Arc` and hand the driver a boxed clone to keep a handle
/// for assertions.
#[derive(Debug, Default)]
pub struct CapturingSink {
    records: Mutex<Vec<LogRecord>>,
}

impl CapturingSink {
    /// All records, in emission order.
    pub fn records(&self) -> Vec<LogRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages only, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    /// Records carrying a structured diff.
    pub fn diffs(&self) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.diff.is_some())
            .collect()
    }

    /// Records at `level`.
    pub fn at_level(&self, level: Level) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

impl LogSink for CapturingSink {
    fn log(&self, record: &LogRecord) {
        match self.records.lock() {
            Ok(mut records) => records.push(record.clone()),
            Err(poisoned) => poisoned.into_inner().push(record.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use routesync_common::RouteDiff;

    #[test]
    fn test_captures_in_order() {
        let sink = CapturingSink::default();
        assert!(sink.is_empty());

        sink.log(&LogRecord::info("first"));
        sink.log(&LogRecord::warn("second").with_diff(RouteDiff::default()));

        assert_eq!(sink.messages(), vec!["first", "second"]);
        assert_eq!(sink.diffs().len(), 1);
        assert_eq!(sink.at_level(Level::Warn)[0].message, "second");
    }
}
