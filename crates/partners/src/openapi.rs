// OpenAPI documentation for the partners API

use utoipa::OpenApi;

use crate::api::{ErrorResponse, SuccessResponse};
use crate::auth::routes::{self as auth_routes, SessionUserResponse};
use crate::partners::{routes as partners_routes, SubmitApplicationRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_routes::discord_login,
        auth_routes::discord_callback,
        auth_routes::current_user,
        auth_routes::logout,
        partners_routes::submit_application,
    ),
    components(
        schemas(
            ErrorResponse,
            SuccessResponse,
            SessionUserResponse,
            SubmitApplicationRequest,
        )
    ),
    tags(
        (name = "auth", description = "Discord login and session endpoints"),
        (name = "partners", description = "Partner application endpoints")
    ),
    info(
        title = "Bloxion Partners API",
        version = "0.1.0",
        description = "Discord-authenticated partner applications",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;
