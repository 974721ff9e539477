//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8000/docs`
//! - OpenAPI JSON: `http://localhost:8000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::handlers::{TokenRequest, TokenResponse};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{CalculateRequest, CalculationData};

/// Bearer JWT security scheme (tokens come from `POST /token`)
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "OAuth2 password flow: POST /token with form fields \
                             `username` and `password`, then send \
                             `Authorization: Bearer <access_token>`",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SciCalc Gateway API",
        version = "0.1.0",
        description = "Scientific calculator over HTTP with bearer-token auth and audio streaming.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Development"),
    ),
    paths(
        crate::auth::handlers::issue_token,
        crate::gateway::handlers::calc::calculate,
        crate::gateway::handlers::calc::calculate_query,
        crate::gateway::handlers::media::stream_track,
        crate::gateway::handlers::media::stream_track_query,
        crate::gateway::handlers::health::health_check,
    ),
    components(
        schemas(
            TokenRequest,
            TokenResponse,
            CalculateRequest,
            CalculationData,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "OAuth2 password-grant token issuance"),
        (name = "Calculator", description = "Scientific calculations (auth required)"),
        (name = "Media", description = "Audio file streaming"),
        (name = "System", description = "Health checks and build info")
    )
)]
pub struct ApiDoc;
