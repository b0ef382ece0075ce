//! Driven port that receives lifecycle notifications for the view layer.

use async_trait::async_trait;

use crate::domain::GenerationEvent;

/// Delivers [`GenerationEvent`]s to whoever renders them.
///
/// Delivery is infallible from the lifecycle's point of view; a sink that
/// can fail handles and logs its own errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one event.
    async fn notify(&self, event: GenerationEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotificationSink;

#[async_trait]
impl NotificationSink for NoOpNotificationSink {
    async fn notify(&self, _event: GenerationEvent) {}
}
