//! Flash messages carried across a redirect in the cookie session.
//!
//! Handlers push one message before redirecting; the next page render takes
//! it out again, so a message is shown exactly once.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

pub(crate) const FLASH_KEY: &str = "flash";

/// Flash severity, rendered as a CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// One-shot message shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }
}

/// Session wrapper exposing flash operations to the HTML handlers.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `message`, replacing any unread one.
    pub fn flash(&self, message: &FlashMessage) -> Result<(), Error> {
        self.0
            .insert(FLASH_KEY, message)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Remove and return the pending flash message.
    ///
    /// A cookie that no longer decodes is discarded with a warning rather than
    /// failing the page.
    pub fn take_flash(&self) -> Option<FlashMessage> {
        match self.0.remove_as::<FlashMessage>(FLASH_KEY)? {
            Ok(message) => Some(message),
            Err(raw) => {
                tracing::warn!(%raw, "discarding undecodable flash message");
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
