// Authentication module
// Decision: Discord OAuth is the only way in
// Decision: Signed JWT in an HTTP-only cookie is the whole session (stateless, no revocation)

pub mod config;
pub mod cookie;
pub mod discord;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use config::AuthConfig;
pub use jwt::{IdentityClaims, SessionTokenService, TokenError};
pub use middleware::{AuthState, AuthUser};
pub use routes::routes;
