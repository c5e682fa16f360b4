//! Warning channel.
//!
//! Unmet requirements are reported, not raised. The verifier hands each
//! warning to a [`WarningSink`]; what happens next is up to the sink.

use serde::Serialize;

/// Category attached to every dependency warning.
pub const DEPENDENCY_CATEGORY: &str = "dependency";

/// A warning as emitted by the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Warning category, always [`DEPENDENCY_CATEGORY`] for verifier output.
    pub category: String,
    /// Human-readable message.
    pub message: String,
}

/// Receives warnings. Fire-and-forget.
pub trait WarningSink {
    /// Emit one warning.
    fn emit(&mut self, category: &str, message: &str);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn emit(&mut self, category: &str, message: &str) {
        tracing::warn!(category, "{}", message);
    }
}

/// Keeps every warning in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    warnings: Vec<Warning>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings received so far, in emission order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Messages received so far, in emission order.
    pub fn messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }

    /// Consume the sink, returning its warnings.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    /// Number of warnings received.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Whether nothing was received.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl WarningSink for CollectingSink {
    fn emit(&mut self, category: &str, message: &str) {
        self.warnings.push(Warning {
            category: category.to_string(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_records_in_order() {
        let mut sink = CollectingSink::new();
        assert!(sink.is_empty());

        sink.emit(DEPENDENCY_CATEGORY, "first");
        sink.emit("other", "second");

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.messages(), ["first", "second"]);
        assert_eq!(sink.warnings()[0].category, "dependency");
        assert_eq!(sink.warnings()[1].category, "other");
    }

    #[test]
    fn into_warnings_returns_everything() {
        let mut sink = CollectingSink::new();
        sink.emit(DEPENDENCY_CATEGORY, "only");
        let warnings = sink.into_warnings();
        assert_eq!(
            warnings,
            vec![Warning {
                category: "dependency".to_string(),
                message: "only".to_string(),
            }]
        );
    }

    #[test]
    fn tracing_sink_does_not_panic_without_subscriber() {
        let mut sink = TracingSink;
        sink.emit(DEPENDENCY_CATEGORY, "no subscriber installed");
    }
}
