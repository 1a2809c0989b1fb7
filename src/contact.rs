//! Contact form: field state, validation, and best-effort submission to a remote endpoint.
//!
//! Submissions run on a worker thread so the event loop keeps drawing while the request is in
//! flight. The session clears its `submitting` flag when the result arrives, whatever it is, and
//! any status message disappears a fixed time after it was shown. There is one attempt per
//! submission and no retry.

use edtui::{EditorState, Lines};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shown when a successful response carries no message of its own.
pub const SUCCESS_FALLBACK: &str = "Thank you for your message! I will get back to you soon.";

/// Shown for every transport or server failure.
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again later.";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Payload posted to the contact endpoint.
pub struct ContactMessage {
    /// Sender's name.
    pub name: String,
    /// Sender's reply address.
    pub email: String,
    /// Message subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
struct EndpointReply {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
/// Reasons a contact submission did not go through.
pub enum ContactError {
    /// A required field is blank.
    #[error("All fields are required.")]
    MissingField {
        /// Label of the first blank field.
        field: &'static str,
    },
    /// The email address is not plausibly deliverable.
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    /// The request could not be sent or the response not read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("endpoint returned {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, if any.
        message: String,
    },
    /// The worker thread died before reporting a result.
    #[error("submission worker stopped unexpectedly")]
    Disconnected,
}

impl ContactError {
    #[must_use]
    /// Text shown to the user: validation problems verbatim, everything else generic.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField { .. } | Self::InvalidEmail => self.to_string(),
            _ => FAILURE_MESSAGE.to_string(),
        }
    }
}

#[must_use]
/// Accepts `local@domain.tld`-shaped addresses: something, `@`, something, a dot, something.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, rest)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    let domain = rest.split('@').next().unwrap_or_default();
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

impl ContactMessage {
    /// Checks that every field is filled and the email looks deliverable.
    ///
    /// # Errors
    ///
    /// Returns the first validation problem found.
    pub fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Subject", &self.subject),
            ("Message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField { field });
            }
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

/// Remote collaborator accepting contact messages.
pub trait ContactEndpoint: Send + Sync {
    /// Delivers `message`, returning the confirmation text to show.
    ///
    /// # Errors
    ///
    /// Returns an error if the message was not accepted.
    fn submit(&self, message: &ContactMessage) -> Result<String, ContactError>;
}

/// Posts messages as JSON over HTTP.
pub struct HttpEndpoint {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpEndpoint {
    /// Builds a client for `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(url: impl Into<String>) -> Result<Self, ContactError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl ContactEndpoint for HttpEndpoint {
    fn submit(&self, message: &ContactMessage) -> Result<String, ContactError> {
        let response = self.client.post(&self.url).json(message).send()?;
        let status = response.status();
        let reply = response.json::<EndpointReply>().unwrap_or_default();
        if status.is_success() {
            Ok(reply
                .message
                .unwrap_or_else(|| SUCCESS_FALLBACK.to_string()))
        } else {
            Err(ContactError::Rejected {
                status: status.as_u16(),
                message: reply.message.unwrap_or_default(),
            })
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Form input receiving keystrokes.
pub enum Field {
    /// Sender's name.
    Name,
    /// Sender's email.
    Email,
    /// Subject line.
    Subject,
    /// Multi-line message body.
    Message,
}

impl Field {
    #[must_use]
    /// Following field, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Subject,
            Self::Subject => Self::Message,
            Self::Message => Self::Name,
        }
    }

    #[must_use]
    /// Preceding field, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Subject => Self::Email,
            Self::Message => Self::Subject,
        }
    }

    #[must_use]
    /// Label rendered next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

/// Editable contents of the contact form.
pub struct ContactForm {
    /// Name input.
    pub name: String,
    /// Email input.
    pub email: String,
    /// Subject input.
    pub subject: String,
    /// Vim-style editor for the message body.
    pub message: EditorState,
    /// Field receiving input.
    pub focus: Field,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            subject: String::new(),
            message: EditorState::new(Lines::from("")),
            focus: Field::Name,
        }
    }
}

impl ContactForm {
    #[must_use]
    /// Message body as plain text.
    pub fn message_text(&self) -> String {
        self.message
            .lines
            .iter_row()
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    /// Snapshot of the form as a submission payload.
    pub fn to_message(&self) -> ContactMessage {
        ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message_text().trim().to_string(),
        }
    }

    /// Single-line input for the focused field, `None` for the message editor.
    pub fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Subject => Some(&mut self.subject),
            Field::Message => None,
        }
    }

    /// Empties every field and returns focus to the first one.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Tone of a status message.
pub enum StatusKind {
    /// The message was delivered.
    Success,
    /// Validation or delivery failed.
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Feedback shown after a submission attempt.
pub struct StatusMessage {
    /// Tone.
    pub kind: StatusKind,
    /// Text shown to the user.
    pub text: String,
    /// When the message appeared; it is hidden a fixed time later.
    pub shown_at: Instant,
}

/// Tracks in-flight submissions and the resulting status message.
pub struct ContactSession {
    endpoint: Arc<dyn ContactEndpoint>,
    pending: Option<Receiver<Result<String, ContactError>>>,
    dismiss_after: Duration,
    /// A request is in flight.
    pub submitting: bool,
    /// Feedback from the last attempt, until it expires.
    pub status: Option<StatusMessage>,
}

impl ContactSession {
    #[must_use]
    /// Creates a session posting to `endpoint`, hiding statuses after `dismiss_after`.
    pub fn new(endpoint: Arc<dyn ContactEndpoint>, dismiss_after: Duration) -> Self {
        Self {
            endpoint,
            pending: None,
            dismiss_after,
            submitting: false,
            status: None,
        }
    }

    fn show(&mut self, kind: StatusKind, text: String, now: Instant) {
        self.status = Some(StatusMessage {
            kind,
            text,
            shown_at: now,
        });
    }

    /// Validates `form` and sends it in the background.
    ///
    /// Returns whether a request was started. Invalid forms get an error status instead, and
    /// a second submission while one is in flight is ignored.
    pub fn submit(&mut self, form: &ContactForm, now: Instant) -> bool {
        if self.submitting {
            return false;
        }
        let message = form.to_message();
        if let Err(e) = message.validate() {
            self.show(StatusKind::Error, e.user_message(), now);
            return false;
        }

        self.submitting = true;
        let endpoint = Arc::clone(&self.endpoint);
        // One channel per request: the worker holds the only sender, so a worker that dies
        // without sending shows up as a disconnect.
        let (results, pending) = mpsc::channel();
        self.pending = Some(pending);
        tracing::info!(subject = %message.subject, "submitting contact form");
        std::thread::spawn(move || {
            let result = endpoint.submit(&message);
            // The session may be gone by the time we finish; nothing to report to then.
            let _ = results.send(result);
        });
        true
    }

    /// Collects a finished submission, if any, and updates the status.
    ///
    /// Returns `Some(true)` when a message was delivered, so the caller can clear the form.
    pub fn poll(&mut self, now: Instant) -> Option<bool> {
        let result = match self.pending.as_ref()?.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(ContactError::Disconnected),
        };
        self.pending = None;
        self.submitting = false;
        match result {
            Ok(text) => {
                tracing::info!("contact form delivered");
                self.show(StatusKind::Success, text, now);
                Some(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "contact form failed");
                self.show(StatusKind::Error, e.user_message(), now);
                Some(false)
            }
        }
    }

    /// Hides the status message once it has been visible long enough.
    pub fn expire(&mut self, now: Instant) {
        if self
            .status
            .as_ref()
            .is_some_and(|s| now.saturating_duration_since(s.shown_at) >= self.dismiss_after)
        {
            self.status = None;
        }
    }
}

#[cfg(test)]
#[path = "tests/contact.rs"]
mod tests;
