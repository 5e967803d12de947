//! Request/response boundary.
//!
//! [`CommandDispatcher`] is the only place a [`BridgeError`] is turned into
//! a wire response. Every request outcome produces exactly one response.

use std::io::{self, Read, Write};

use pegasus_analyzers::Toolkit;
use pegasus_protocol::{BridgeError, BridgeResponse};
use tracing::{debug, info, warn};

use crate::dispatcher;
use crate::encoder::write_response;
use crate::reader::read_request;
use crate::telemetry::DISPATCH_TARGET;

/// Dispatches single requests against a toolkit of collaborators.
#[derive(Debug, Clone, Default)]
pub struct CommandDispatcher<T> {
    toolkit: T,
}

impl<T: Toolkit> CommandDispatcher<T> {
    pub fn new(toolkit: T) -> Self {
        Self { toolkit }
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// Produce the response for one invocation.
    ///
    /// `argument` is the first process argument; `stdin` is only read when
    /// the argument is `-`.
    pub fn respond<R: Read>(&self, argument: Option<&str>, stdin: &mut R) -> BridgeResponse {
        let Some(argument) = argument else {
            debug!(target: DISPATCH_TARGET, "no request argument");
            return BridgeResponse::no_input();
        };

        let response = match self.handle(argument, stdin) {
            Ok(response) => response,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "request failed");
                BridgeResponse::execution_error(error)
            }
        };

        match response.code() {
            Some(code) => info!(target: DISPATCH_TARGET, outcome = %code, "request complete"),
            None => info!(target: DISPATCH_TARGET, outcome = "OK", "request complete"),
        }
        response
    }

    /// Produce the response and write it as one line to `writer`.
    pub fn run_with_io<R: Read, W: Write>(
        &self,
        argument: Option<&str>,
        stdin: &mut R,
        writer: &mut W,
    ) -> io::Result<BridgeResponse> {
        let response = self.respond(argument, stdin);
        write_response(writer, &response)?;
        Ok(response)
    }

    fn handle<R: Read>(&self, argument: &str, stdin: &mut R) -> Result<BridgeResponse, BridgeError> {
        let request = read_request(argument, stdin)?;
        let span = tracing::debug_span!(
            target: DISPATCH_TARGET,
            "request",
            command = request.command_label(),
            subject = request.subject().as_deref().unwrap_or("")
        );
        let _enter = span.enter();
        dispatcher::dispatch(&request, &self.toolkit)
    }
}
