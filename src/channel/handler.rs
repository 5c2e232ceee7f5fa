//! Dispatch of method calls onto the session manager.

use super::method::Method;
use super::wire::{MethodCall, Reply, Response};
use crate::session::{LockdownSessionManager, TransitionFailure, TransitionResult};
use thiserror::Error;
use tracing::{debug, info_span};

/// Why a dispatched call did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The method ran and the platform facility reported a failure.
    #[error(transparent)]
    Transition(#[from] TransitionFailure),

    /// The method name is not one this channel implements.
    #[error("unrecognized operation '{0}'")]
    UnrecognizedOperation(String),
}

/// A named method channel backed by one lockdown session.
#[derive(Debug)]
pub struct KioskChannel {
    name: String,
    manager: LockdownSessionManager,
}

impl KioskChannel {
    pub fn new(name: impl Into<String>, manager: LockdownSessionManager) -> Self {
        Self {
            name: name.into(),
            manager,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manager(&self) -> &LockdownSessionManager {
        &self.manager
    }

    /// Run a known method.
    pub fn invoke(&self, method: Method) -> TransitionResult {
        match method {
            Method::StartKiosk => self.manager.enter(),
            Method::StopKiosk => self.manager.exit(),
        }
    }

    /// Look up a method by wire name and run it.
    pub fn dispatch(&self, method_name: &str) -> Result<(), ChannelError> {
        let method: Method = method_name.parse()?;
        self.invoke(method)?;
        Ok(())
    }

    /// Answer one call. Never fails: every outcome becomes a [`Reply`].
    pub fn handle(&self, call: &MethodCall) -> Response {
        let _span = info_span!("method_call", method = %call.method).entered();

        if let Some(channel) = &call.channel
            && channel != &self.name
        {
            debug!(%channel, expected = %self.name, "call addressed to another channel");
            return Response::new(call.id.clone(), Reply::not_implemented());
        }

        let reply = match self.dispatch(&call.method) {
            Ok(()) => Reply::success(),
            Err(ChannelError::Transition(failure)) => Reply::kiosk_error(&failure),
            Err(ChannelError::UnrecognizedOperation(name)) => {
                debug!(method = %name, "unrecognized operation");
                Reply::not_implemented()
            }
        };

        Response::new(call.id.clone(), reply)
    }
}
