//! Notification Webhook Port
//!
//! Abstract interface for delivering the post-call report to the
//! downstream automation endpoint.

use async_trait::async_trait;

use crate::domain::entities::NotificationPayload;
use crate::domain::errors::DomainError;

/// Webhook delivery interface
///
/// Implementations perform exactly one HTTP request per call to
/// `deliver`; there is no deduplication, so the same payload delivered
/// twice produces two requests.
///
/// # Example
///
/// ```rust,ignore
/// use callrelay::ports::NotificationSink;
///
/// struct HttpNotifier { /* reqwest client */ }
///
/// #[async_trait]
/// impl NotificationSink for HttpNotifier {
///     async fn deliver(&self, payload: &NotificationPayload) -> Result<(), DomainError> {
///         // POST the JSON body, map non-2xx to an error
///     }
/// }
/// ```
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a payload
    ///
    /// Any non-2xx answer is reported as `DomainError::ExternalService`.
    async fn deliver(&self, payload: &NotificationPayload) -> Result<(), DomainError>;
}
