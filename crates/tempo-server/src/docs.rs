//! OpenAPI description of the public surface
//!
//! The bearer scheme is declared as metadata only; no route enforces
//! it. Operational routes (`/health`, the document itself) are not
//! listed.

use tempo_config::Config;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::openapi::server::ServerBuilder;
use utoipa::{Modify, OpenApi};

/// OpenAPI document for the public routes
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tempo API",
        version = "1.0",
        description = "Auto-generated OpenAPI documentation for the Tempo demo service",
    ),
    paths(
        crate::handlers::time,
        crate::handlers::test_small,
        crate::handlers::test_large,
        crate::handlers::test_sse,
    ),
    components(schemas(crate::models::TimeDto)),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

/// Registers the HTTP bearer (JWT) scheme and requires it globally.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.security = Some(vec![SecurityRequirement::new(
            "bearerAuth",
            Vec::<String>::new(),
        )]);
    }
}

/// Build the API document with the advertised server URL taken from
/// configuration.
pub fn openapi(config: &Config) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![ServerBuilder::new()
        .url(config.server.public_url())
        .description(Some("Generated server url"))
        .build()]);
    doc
}
