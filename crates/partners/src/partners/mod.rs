// Partner applications

pub mod application;
pub mod routes;
pub mod webhook;

pub use application::{PartnerApplication, SubmitApplicationRequest};
pub use routes::{routes, PartnersState};
pub use webhook::{RelayError, WebhookRelay};
