//! One-shot flash notices, carried in an HMAC-signed cookie.
//!
//! A notice is queued by a redirecting handler and displayed exactly once by
//! the next rendered page, which clears the cookie. The cookie value is
//! `base64url(kind \t message) . hex(hmac_sha256(secret, payload))`; anything
//! that fails verification is discarded silently.

use axum::http::HeaderMap;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Cookie holding the pending notice.
pub const FLASH_COOKIE: &str = "tutorlog_flash";

/// Visual category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Confirmation of a completed action.
    Success,
    /// Validation feedback after a rejected submission.
    Error,
}

impl NoticeKind {
    fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(NoticeKind::Success),
            "error" => Some(NoticeKind::Error),
            _ => None,
        }
    }
}

/// A transient one-time user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

fn sign(secret: &[u8], payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn verify(secret: &[u8], payload: &str, tag_hex: &str) -> bool {
    let Ok(tag) = hex::decode(tag_hex) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    mac.verify_slice(&tag).is_ok()
}

/// Encode and sign a notice into a cookie value.
pub fn encode(secret: &[u8], notice: &Notice) -> String {
    let payload =
        URL_SAFE_NO_PAD.encode(format!("{}\t{}", notice.kind.as_str(), notice.message));
    let tag = sign(secret, &payload);
    format!("{}.{}", payload, tag)
}

/// Decode a cookie value back into a notice, rejecting bad signatures.
pub fn decode(secret: &[u8], value: &str) -> Option<Notice> {
    let (payload, tag) = value.split_once('.')?;
    if !verify(secret, payload, tag) {
        return None;
    }
    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (kind, message) = decoded.split_once('\t')?;
    Some(Notice {
        kind: NoticeKind::parse(kind)?,
        message: message.to_string(),
    })
}

/// `Set-Cookie` value queuing a notice for the next page render.
pub fn set_cookie(secret: &[u8], notice: &Notice) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        FLASH_COOKIE,
        encode(secret, notice)
    )
}

/// `Set-Cookie` value clearing a consumed notice.
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", FLASH_COOKIE)
}

/// Whether the request carries a flash cookie at all, valid or not.
///
/// Pages clear the cookie whenever one is present, so a stale or tampered
/// value that fails to decode does not ride along on later requests.
pub fn present(headers: &HeaderMap) -> bool {
    let Some(cookies) = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, _)| name == FLASH_COOKIE)
}

/// Extract the pending notice from the request's `Cookie` header, if any.
///
/// Returns the notice for display; the caller is responsible for emitting
/// [`clear_cookie`] so the notice is shown only once.
pub fn take(headers: &HeaderMap, secret: &[u8]) -> Option<Notice> {
    let cookies = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if name == FLASH_COOKIE {
            return decode(secret, value);
        }
    }
    None
}
