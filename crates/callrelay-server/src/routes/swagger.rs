//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{OutboundCallRequest, OutboundCallResponse, StatusCallbackForm};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::call::outbound_call,
        super::status::call_status,
    ),
    info(
        title = "Callrelay API",
        version = "0.1.0",
        description = "Outbound voice calls with post-call recording and transcript reports",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Call", description = "Call - Outbound call initiation"),
        (name = "Status", description = "Status - Carrier lifecycle callbacks"),
    ),
    components(
        schemas(
            OutboundCallRequest,
            OutboundCallResponse,
            StatusCallbackForm,
        )
    ),
)]
pub struct ApiDoc;
