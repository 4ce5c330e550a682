//! Service construction for commands
//!
//! - `HttpClientFactory`: authenticated HTTP transport for the TER API
//! - `SimpleServices`: lightweight container handing out configuration and command contexts

use std::sync::Arc;

pub mod client_factory;
pub mod simple_container;

pub use client_factory::HttpClientFactory;
pub use simple_container::SimpleServices;

use crate::config::Config;

pub trait ServiceProvider {
    fn config(&self) -> Arc<Config>;
    fn client_factory(&self) -> HttpClientFactory {
        HttpClientFactory::new(self.config())
    }
}
