use std::io;
use std::sync::Arc;

use crate::config::Config;
use crate::core::command::{CommandContext, TerminalConfirm};
use crate::error::Result;
use crate::services::ServiceProvider;

pub struct SimpleServices {
    config: Arc<Config>,
}

impl SimpleServices {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Console and network access for one command run
    pub fn create_context(&self) -> Result<CommandContext> {
        let transport = self.client_factory().create_transport()?;
        Ok(CommandContext {
            output: Box::new(io::stdout()),
            confirm: Box::new(TerminalConfirm),
            transport: Arc::new(transport),
        })
    }
}

impl ServiceProvider for SimpleServices {
    fn config(&self) -> Arc<Config> {
        self.config.clone()
    }
}
