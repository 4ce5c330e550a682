//! Talking to the TER REST API
//!
//! - `transport`: HTTP abstraction and the reqwest implementation
//! - `request`: one request from configuration to exit code
//! - `format`: console rendering of responses

pub mod format;
pub mod request;
pub mod transport;
