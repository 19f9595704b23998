//! Call Orchestrator
//!
//! Drives a call from creation to its post-call report:
//! `Created -> Bridged -> (Ringing | Answered)* -> Completed`.
//! Only creation and completion are acted upon; everything in between
//! is logged.

use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;

use callrelay::{
    CallRequest, Carrier, DomainError, NotificationSink, PlaceCallRequest, RegistryEntry,
    SessionRequest, StatusEvent, VoiceProvider,
};

use super::dispatcher::NotificationDispatcher;
use super::prompt::render_instructions;
use super::registry::CallRegistry;

/// Per-deployment call parameters
#[derive(Debug, Clone)]
pub struct CallSettings {
    /// Caller id to dial from
    pub origin: String,
    pub status_callback_url: String,
    /// Agent instructions with `{placeholders}`
    pub prompt_template: String,
    /// Session knobs; the prompt is filled in per call
    pub session: SessionRequest,
}

/// What the status callback handler gets back
///
/// The handler acknowledges immediately; `dispatch` is the detached
/// report task, if one was started.
#[derive(Debug)]
pub struct CallbackReceipt {
    pub registered: bool,
    /// The carrier will send nothing further for this call
    pub call_ended: bool,
    pub dispatch: Option<JoinHandle<bool>>,
}

pub struct CallOrchestrator<V, C, N>
where
    V: VoiceProvider + 'static,
    C: Carrier,
    N: NotificationSink + 'static,
{
    provider: Arc<V>,
    carrier: Arc<C>,
    registry: CallRegistry,
    dispatcher: Arc<NotificationDispatcher<V, N>>,
    settings: CallSettings,
}

impl<V, C, N> CallOrchestrator<V, C, N>
where
    V: VoiceProvider + 'static,
    C: Carrier,
    N: NotificationSink + 'static,
{
    pub fn new(
        provider: Arc<V>,
        carrier: Arc<C>,
        registry: CallRegistry,
        dispatcher: Arc<NotificationDispatcher<V, N>>,
        settings: CallSettings,
    ) -> Self {
        Self {
            provider,
            carrier,
            registry,
            dispatcher,
            settings,
        }
    }

    pub fn registry(&self) -> &CallRegistry {
        &self.registry
    }

    /// Create the voice session, have the carrier dial, then register
    ///
    /// Returns the carrier's call id. Nothing is registered unless both
    /// the session and the carrier call succeed.
    pub async fn initiate_call(&self, request: CallRequest) -> Result<String, DomainError> {
        tracing::info!(
            to = %request.destination,
            variables = request.variables.len(),
            "Initiating outbound call"
        );

        let session_request = SessionRequest {
            system_prompt: render_instructions(
                &self.settings.prompt_template,
                &request,
                Utc::now(),
            ),
            ..self.settings.session.clone()
        };

        let session = self
            .provider
            .create_session(&session_request)
            .await
            .inspect_err(|e| tracing::error!("Voice session creation failed: {}", e))?;

        tracing::info!(ultravox_call_id = %session.provider_call_id, "Voice session created");

        let place = PlaceCallRequest {
            destination: request.destination.clone(),
            origin: self.settings.origin.clone(),
            bridge_target: session.join_target.clone(),
            status_callback_url: self.settings.status_callback_url.clone(),
            events_to_report: PlaceCallRequest::default_events(),
        };

        let call_sid = self
            .carrier
            .place_call(&place)
            .await
            .inspect_err(|e| tracing::error!("Carrier call creation failed: {}", e))?;

        tracing::info!(
            call_sid = %call_sid,
            ultravox_call_id = %session.provider_call_id,
            "Call bridged"
        );

        // The carrier is already dialling; report it as an upstream failure
        self.registry
            .put(&call_sid, RegistryEntry::new(request, session))
            .map_err(|e| {
                tracing::error!(
                    call_sid = %call_sid,
                    "Call placed but could not be registered: {}",
                    e
                );
                DomainError::external("Registry", e)
            })?;

        Ok(call_sid)
    }

    /// Handle one carrier status callback
    ///
    /// Never fails and never waits for the report: on completion the
    /// dispatch runs on its own task.
    pub fn on_status_callback(&self, event: StatusEvent) -> CallbackReceipt {
        let entry = self.registry.get(&event.carrier_call_id);
        let registered = entry.is_some();
        let call_ended = event.status.is_final();

        tracing::info!(
            call_sid = %event.carrier_call_id,
            status = %event.status,
            duration = ?event.duration_seconds,
            registered,
            "Call status update"
        );

        if !event.status.is_completed() {
            if call_ended {
                tracing::warn!(
                    call_sid = %event.carrier_call_id,
                    status = %event.status,
                    "Call ended without completing, no report will be sent"
                );
            }
            return CallbackReceipt {
                registered,
                call_ended,
                dispatch: None,
            };
        }

        if !registered {
            tracing::warn!(
                call_sid = %event.carrier_call_id,
                "Completed call has no registry entry, sending report without call data"
            );
        }

        let dispatcher = Arc::clone(&self.dispatcher);
        let handle = tokio::spawn(async move {
            let delivered = dispatcher.dispatch(entry.as_ref(), &event).await;
            tracing::info!(
                call_sid = %event.carrier_call_id,
                delivered,
                "Call report dispatch finished"
            );
            delivered
        });

        CallbackReceipt {
            registered,
            call_ended,
            dispatch: Some(handle),
        }
    }
}
