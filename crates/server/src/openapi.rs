use std::collections::HashMap;

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: Option<String>,
    /// 0 = not started, 1 = in progress, 2 = done; defaults to 0
    pub status: Option<i32>,
}

#[derive(ToSchema)]
pub struct UpdateTodoRequest {
    pub title: String,
    /// Omit to keep, `null` to clear
    pub description: Option<String>,
    pub status: i32,
}

#[derive(ToSchema)]
pub struct ValidationErrorBody {
    pub message: String,
    pub errors: HashMap<String, Vec<String>>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::auth::logout,
        crate::routes::todos::index,
        crate::routes::todos::show,
        crate::routes::todos::store,
        crate::routes::todos::update,
        crate::routes::todos::destroy,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            CreateTodoRequest,
            UpdateTodoRequest,
            ValidationErrorBody,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "todos")
    )
)]
pub struct ApiDoc;
