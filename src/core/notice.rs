//! # Notices
//!
//! User-visible notifications (the toast). Failures never enter the
//! transcript; they are classified here and shown out-of-band.

use std::time::Instant;

use crate::inference::ProviderError;

/// What went wrong with a turn, as far as the user needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No API key configured. Detected before any request.
    ConfigurationMissing,
    /// The API rejected the key.
    AuthenticationFailed,
    /// The account is out of quota or billing limits.
    QuotaExceeded,
    /// Anything else: network, server, unparseable response.
    Generic,
}

impl ErrorKind {
    /// Classifies a provider error. Config errors map by variant; everything
    /// else is matched on the error text the way the API phrases it.
    pub fn classify(err: &ProviderError) -> Self {
        if matches!(err, ProviderError::Config(_)) {
            return ErrorKind::ConfigurationMissing;
        }

        let text = err.to_string().to_lowercase();
        if text.contains("api key") {
            ErrorKind::AuthenticationFailed
        } else if text.contains("quota") {
            ErrorKind::QuotaExceeded
        } else {
            ErrorKind::Generic
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ErrorKind::ConfigurationMissing => "Configuration Required",
            _ => "Error",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::ConfigurationMissing => {
                "Please add your OpenAI API key to the environment variables (OPENAI_API_KEY)."
            }
            ErrorKind::AuthenticationFailed => {
                "Invalid API key. Please check your OpenAI API key configuration."
            }
            ErrorKind::QuotaExceeded => "API quota exceeded. Please check your OpenAI account.",
            ErrorKind::Generic => "Failed to send message. Please try again.",
        }
    }
}

/// A toast: `{title, description}` plus when it was raised. Every notice
/// reports a failure, so all of them render as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub raised_at: Instant,
}

impl Notice {
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self {
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            raised_at: Instant::now(),
        }
    }

    pub fn from_error(err: &ProviderError) -> Self {
        Self::from_kind(ErrorKind::classify(err))
    }
}
