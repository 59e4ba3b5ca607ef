//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints every payload it receives to stdout in a
//! human-readable format. Register it on any subscription list to watch
//! dispatch traffic during development.
//!
//! ## Output format
//! ```text
//! [orders] dispatched extras={"clock", "logger"}
//! [orders] dispatched extras={}
//! ```

use std::any::Any;

use super::extras::Extras;
use super::subscriber::{Subscribe, SubscriberError, Value};

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints one line per dispatch with the
/// configured label and the extras' names, for debugging and demonstration
/// purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
pub struct LogWriter {
    label: &'static str,
}

impl LogWriter {
    /// Creates a writer that prefixes every line with `label`.
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new("herald")
    }
}

impl Subscribe for LogWriter {
    fn call(&self, _payload: &dyn Any, extras: &Extras) -> Result<Value, SubscriberError> {
        println!("[{}] dispatched extras={:?}", self.label, extras);
        Ok(Box::new(()) as Value)
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_writer_accepts_any_payload() {
        let writer = LogWriter::new("test");
        assert_eq!(writer.name(), "log-writer");
        writer
            .call(&42u32, &Extras::new().with("label", "x"))
            .unwrap();
    }
}

