use thiserror::Error;

/// Failure outcomes of a relay request.
///
/// The `Display` text of every variant is the message shown to the caller in
/// the `{ "error": ... }` body, so the wording here is user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("❌ أضف GROQ_API_KEY إلى متغيرات البيئة")]
    MissingCredential,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("طلب غير صالح: {0}")]
    InvalidRequest(String),

    #[error("❌ مفتاح GROQ_API_KEY غير صالح. تحقق منه.")]
    UpstreamUnauthorized,

    #[error("⏳ تجاوزت الحد اليومي المجاني. حاول غداً أو حسّن حسابك.")]
    UpstreamRateLimited,

    #[error("{}", .message.as_deref().unwrap_or(UPSTREAM_FALLBACK_MESSAGE))]
    Upstream { status: u16, message: Option<String> },

    #[error("❌ خطأ في السيرفر: {0}")]
    Unexpected(String),
}

/// Shown when the upstream rejects a request without saying why.
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "خطأ في خدمة Groq";

impl RelayError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Classify a non-success upstream status.
    ///
    /// 401 and 429 get fixed messages whatever the upstream said; anything
    /// else keeps the upstream status and (non-empty) message.
    pub fn from_upstream(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Self::UpstreamUnauthorized,
            429 => Self::UpstreamRateLimited,
            _ => Self::Upstream {
                status,
                message: message.filter(|m| !m.is_empty()),
            },
        }
    }

    /// HTTP status code reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingCredential | Self::Unexpected(_) => 500,
            Self::MethodNotAllowed => 405,
            Self::InvalidRequest(_) => 400,
            Self::UpstreamUnauthorized => 401,
            Self::UpstreamRateLimited => 429,
            Self::Upstream { status, .. } => *status,
        }
    }
}
