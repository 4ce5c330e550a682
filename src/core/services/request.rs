use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::dto::RequestConfiguration;
use crate::core::services::format::FormatService;
use crate::core::services::transport::HttpTransport;
use crate::error::NetworkError;
use crate::utils::progress::ProgressUtils;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Executes one TER API call and reports the outcome
pub struct RequestService {
    configuration: RequestConfiguration,
    format_service: FormatService,
    transport: Arc<dyn HttpTransport>,
}

impl RequestService {
    pub fn new(
        configuration: RequestConfiguration,
        format_service: FormatService,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            configuration,
            format_service,
            transport,
        }
    }

    /// Perform the request; the returned value is the process exit code
    pub async fn run(mut self) -> i32 {
        let configuration = &self.configuration;
        info!(
            "{} {} ({} auth)",
            configuration.method().as_str(),
            configuration.endpoint(),
            configuration.auth_method().as_str()
        );

        let spinner = (!configuration.is_raw())
            .then(|| ProgressUtils::create_request_spinner(configuration.endpoint()));

        let result = self.transport.send(configuration).await;

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let outcome = result.and_then(|response| response.into_result(configuration));
        let raw = configuration.is_raw();

        let (code, written) = match outcome {
            Ok(body) => {
                debug!("Request succeeded");
                let written = if raw {
                    self.format_service.format_raw(&body)
                } else {
                    self.format_service.format_result(&body)
                };
                (EXIT_SUCCESS, written)
            }
            Err(NetworkError::Rejected { status, body }) => {
                warn!("Request rejected with status {}", status);
                let written = if raw {
                    self.format_service.format_raw(&body)
                } else {
                    self.format_service.format_error(status, &body)
                };
                (EXIT_FAILURE, written)
            }
            Err(e) => {
                warn!("Request failed: {}", e);
                (EXIT_FAILURE, self.format_service.format_transport_error(&e))
            }
        };

        if let Err(e) = written {
            warn!("Failed to write result: {}", e);
            return EXIT_FAILURE;
        }

        code
    }
}
