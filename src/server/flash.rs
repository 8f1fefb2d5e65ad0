//! One-shot notifications carried across a redirect in a private cookie.

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use tracing::warn;

const FLASH_COOKIE: &str = "bookshelf_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Queues `message` for the next rendered page.
pub fn push(jar: PrivateCookieJar, message: FlashMessage, secure: bool) -> PrivateCookieJar {
    let mut pending = pending(&jar);
    pending.push(message);

    match serde_json::to_string(&pending) {
        Ok(value) => jar.add(build_cookie(value, secure)),
        Err(e) => {
            warn!(error = %e, "Failed to encode flash messages; dropping them");
            jar
        }
    }
}

/// Returns the queued messages and clears the cookie.
pub fn take(jar: PrivateCookieJar) -> (PrivateCookieJar, Vec<FlashMessage>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }
    let messages = pending(&jar);
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, messages)
}

fn pending(jar: &PrivateCookieJar) -> Vec<FlashMessage> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| serde_json::from_str(c.value()).ok())
        .unwrap_or_default()
}

fn build_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    #[test]
    fn pushed_messages_are_taken_once_in_order() {
        let jar = PrivateCookieJar::new(Key::generate());
        let jar = push(jar, FlashMessage::success("first"), false);
        let jar = push(jar, FlashMessage::error("second"), false);

        let (jar, messages) = take(jar);
        assert_eq!(
            messages,
            vec![FlashMessage::success("first"), FlashMessage::error("second")]
        );

        let (_jar, messages) = take(jar);
        assert!(messages.is_empty());
    }

    #[test]
    fn kinds_serialize_lowercase() {
        let json = serde_json::to_string(&FlashMessage::error("x")).expect("serialize");
        assert_eq!(json, r#"{"kind":"error","message":"x"}"#);
    }
}
