use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use serde::{Deserialize, Serialize};

const FLASH_COOKIE: &str = "flash";

/// One-shot notice carried across a redirect in a signed cookie. The cookie
/// is signed with the configured `SECRET_KEY`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FlashLevel {
    Error,
    Warning,
}

pub fn set(jar: SignedCookieJar, level: FlashLevel, message: impl Into<String>) -> SignedCookieJar {
    let flash = Flash { level, message: message.into() };
    let value = serde_json::to_string(&flash).unwrap_or_default();

    let mut cookie = Cookie::new(FLASH_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_max_age(time::Duration::minutes(5));
    jar.add(cookie)
}

/// Read and clear the pending flash, if any. The returned jar must go back
/// into the response for the removal to stick.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<Flash>) {
    let flash =
        jar.get(FLASH_COOKIE).and_then(|c| serde_json::from_str(c.value()).ok());
    let mut removal = Cookie::from(FLASH_COOKIE);
    removal.set_path("/");
    let jar = jar.remove(removal);
    (jar, flash)
}
