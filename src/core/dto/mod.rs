//! Plain data passed between commands and the request services

pub mod messages;
pub mod request;

pub use messages::Messages;
pub use request::{AuthMethod, HttpMethod, Payload, RequestConfiguration};
