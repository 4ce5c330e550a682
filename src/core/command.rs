//! Shared execution skeleton for commands that call the TER API.
//!
//! A command describes itself through [`ClientRequestCommand`]; [`execute`]
//! runs the same sequence for all of them: optional confirmation, request
//! configuration, request, formatted result.

use clap::Args;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::dto::{AuthMethod, Messages, RequestConfiguration};
use crate::core::services::format::{FormatService, ResultFormat};
use crate::core::services::request::{RequestService, EXIT_FAILURE, EXIT_SUCCESS};
use crate::core::services::transport::HttpTransport;
use crate::error::Result;

/// Options every request command accepts.
///
/// Both take an optional value: `-r`, `--raw` and `--raw=json` all request
/// raw output, `--force=0` does not force.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonOptions {
    /// Return result as raw object (e.g. json)
    #[arg(short, long, require_equals = true, value_name = "FORMAT")]
    pub raw: Option<Option<String>>,

    /// Force execution, skipping confirmation questions
    #[arg(short, long, require_equals = true, value_name = "FORCE")]
    pub force: Option<Option<String>>,
}

impl CommonOptions {
    /// Present with or without a value
    pub fn is_raw(&self) -> bool {
        self.raw.is_some()
    }

    /// A bare flag forces, a value forces unless it is empty or `0`
    pub fn is_forced(&self) -> bool {
        match &self.force {
            None => false,
            Some(None) => true,
            Some(Some(value)) => !(value.is_empty() || value == "0"),
        }
    }
}

/// How a command talks to the API, fixed when the command is set up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSettings {
    pub auth_method: AuthMethod,
    pub result_format: ResultFormat,
    pub confirmation_required: bool,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            auth_method: AuthMethod::All,
            result_format: ResultFormat::KeyValue,
            confirmation_required: false,
        }
    }
}

pub trait ClientRequestCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings::default()
    }

    /// The request this command performs; input validation happens here
    fn request_configuration(&self) -> Result<RequestConfiguration>;

    fn messages(&self) -> Messages;
}

/// Yes/no question to the user
pub trait Confirm: Send {
    /// Fails when no answer can be read
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Asks on stderr and reads the answer from stdin; Enter accepts
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut stderr = io::stderr();
        write!(stderr, "{} (yes/no) [yes]: ", question)?;
        stderr.flush()?;

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "No answer to the confirmation question",
            ));
        }
        Ok(is_affirmative(&answer))
    }
}

/// Empty answers and anything starting with `y` confirm
fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.starts_with(['y', 'Y'])
}

/// Side effects a command run is allowed to have
pub struct CommandContext {
    pub output: Box<dyn Write + Send>,
    pub confirm: Box<dyn Confirm>,
    pub transport: Arc<dyn HttpTransport>,
}

/// Run a request command; the returned value is the process exit code
pub async fn execute<C: ClientRequestCommand + ?Sized>(
    command: &C,
    options: &CommonOptions,
    mut context: CommandContext,
) -> i32 {
    let settings = command.settings();
    let messages = command.messages();

    let confirmed = if !settings.confirmation_required {
        Ok(true)
    } else if options.is_forced() {
        debug!("Confirmation skipped by --force");
        Ok(true)
    } else {
        context.confirm.confirm(&messages.confirmation)
    };

    let mut format_service = FormatService::new(context.output, messages, settings.result_format);

    match confirmed {
        Ok(true) => {}
        Ok(false) => {
            info!("Execution aborted by user");
            // Nothing useful to do if stdout is gone
            let _ = format_service.writeln("Execution aborted.");
            return EXIT_SUCCESS;
        }
        Err(e) => {
            warn!("Confirmation failed: {}", e);
            let _ = format_service.format_transport_error(&e);
            return EXIT_FAILURE;
        }
    }

    let configuration = match command.request_configuration() {
        Ok(configuration) => configuration
            .with_raw(options.is_raw())
            .with_auth_method(settings.auth_method),
        Err(e) => {
            let _ = format_service.format_transport_error(&e);
            return EXIT_FAILURE;
        }
    };

    RequestService::new(configuration, format_service, context.transport)
        .run()
        .await
}
