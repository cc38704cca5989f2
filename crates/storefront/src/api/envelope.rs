//! Response envelope shared by every endpoint.
//!
//! The service signals success three different ways: a `success` boolean, a
//! literal `message`, or (for the seller check) `loggedIn: "loggedin"`. Each
//! client method names the signal it expects and gets back a plain `Result`.

use serde::Deserialize;

use super::ApiError;

/// Fallback text when a rejection carries no message.
const DEFAULT_REJECTION: &str = "request was not accepted";

/// Value of `loggedIn` for a verified seller.
const LOGGED_IN: &str = "loggedin";

/// How an endpoint reports success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessSignal {
    /// `success` must be `true`.
    Flag,
    /// `message` must equal the literal.
    Message(&'static str),
    /// `success` must be `true` and `message` must equal the literal.
    FlagAndMessage(&'static str),
    /// `loggedIn` must be `"loggedin"`.
    LoggedIn,
    /// Any parseable 2xx body counts as success.
    Body,
}

/// Raw response: the status fields plus the endpoint-specific body.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "loggedIn")]
    pub logged_in: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Envelope<T> {
    /// Check the envelope against the endpoint's success signal.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the service's message (or a
    /// generic one) when the signal is not satisfied.
    pub fn into_result(self, signal: SuccessSignal) -> Result<T, ApiError> {
        let flag_ok = self.success == Some(true);
        let message_is = |expected: &str| self.message.as_deref() == Some(expected);

        let accepted = match signal {
            SuccessSignal::Flag => flag_ok,
            SuccessSignal::Message(expected) => message_is(expected),
            SuccessSignal::FlagAndMessage(expected) => flag_ok && message_is(expected),
            SuccessSignal::LoggedIn => self.logged_in.as_deref() == Some(LOGGED_IN),
            SuccessSignal::Body => true,
        };

        if accepted {
            Ok(self.body)
        } else {
            Err(ApiError::Rejected(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            ))
        }
    }
}

/// Body for endpoints that return nothing beyond the status fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {}
