//! Notification sinks.
//!
//! [`TracingNotificationSink`] turns events into structured log lines, which
//! is what the demo binary uses in place of toasts.
//! [`RecordingNotificationSink`] keeps events in memory for inspection.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::GenerationEvent;
use crate::domain::ports::NotificationSink;

/// Sink that logs every event at `info` (failures at `warn`).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn notify(&self, event: GenerationEvent) {
        let account_id = event.account_id().to_string();
        let request_id = event.request_id().to_string();
        match &event {
            GenerationEvent::Failed(failed) => warn!(
                %account_id,
                %request_id,
                kind = event.kind(),
                cause = %failed.cause,
                title = event.title(),
                description = event.description(),
                "generation notification"
            ),
            GenerationEvent::Succeeded(succeeded) => info!(
                %account_id,
                %request_id,
                kind = event.kind(),
                site = %succeeded.site.name,
                remaining = %succeeded.remaining_credits.remaining_label(),
                title = event.title(),
                description = event.description(),
                "generation notification"
            ),
            GenerationEvent::Started(_) => info!(
                %account_id,
                %request_id,
                kind = event.kind(),
                title = event.title(),
                description = event.description(),
                "generation notification"
            ),
        }
    }
}

/// Sink that stores events in delivery order.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    events: Mutex<Vec<GenerationEvent>>,
}

impl RecordingNotificationSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    pub fn events(&self) -> Vec<GenerationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Event kinds in delivery order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(GenerationEvent::kind)
            .collect()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn notify(&self, event: GenerationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::Value;

    use super::*;
    use crate::domain::{
        Account, AccountId, GenerationOutcome, GenerationRequest, GenerationRequestId, Identity,
        PromptText,
    };

    #[fixture]
    fn account() -> Account {
        Account::new(
            AccountId::random(),
            Identity::new("Ada", "ada@example.com").expect("valid identity"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn recorder_keeps_delivery_order(account: Account) {
        let request = GenerationRequest::pending(
            GenerationRequestId::random(),
            *account.id(),
            PromptText::new("A bakery site").expect("valid prompt"),
            Utc::now(),
        );
        let outcome = GenerationOutcome::Failed {
            request_id: request.id(),
            cause: "boom".to_owned(),
        };
        let sink = RecordingNotificationSink::new();

        sink.notify(GenerationEvent::started(&account, &request)).await;
        sink.notify(GenerationEvent::resolved(&account, &outcome)).await;

        assert_eq!(sink.kinds(), vec!["started", "failed"]);
        assert!(sink.events().iter().all(|e| e.request_id() == request.id()));
    }

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn lines(&self) -> Vec<Value> {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&bytes)
                .lines()
                .map(|line| serde_json::from_str(line).expect("json log line"))
                .collect()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[rstest]
    #[tokio::test]
    async fn tracing_sink_logs_failures_at_warn(account: Account) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        let request_id = GenerationRequestId::random();
        let outcome = GenerationOutcome::Failed {
            request_id,
            cause: "boom".to_owned(),
        };

        TracingNotificationSink
            .notify(GenerationEvent::resolved(&account, &outcome))
            .await;

        let lines = buffer.lines();
        let [line] = lines.as_slice() else {
            panic!("expected one log line, got {lines:?}");
        };
        assert_eq!(line["level"], "WARN");
        let fields = &line["fields"];
        assert_eq!(fields["message"], "generation notification");
        assert_eq!(fields["kind"], "failed");
        assert_eq!(fields["cause"], "boom");
        assert_eq!(fields["title"], "Generation failed");
        assert_eq!(fields["request_id"], request_id.to_string());
        assert_eq!(fields["account_id"], account.id().to_string());
    }
}
