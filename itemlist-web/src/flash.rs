/// One-shot flash messages
///
/// A flash survives exactly one redirect. The `flash` cookie carries only a
/// stable key such as `item_added`; the text shown to the user is looked up
/// from that key when the next page renders, so a client cannot inject
/// arbitrary messages.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

/// Name of the flash cookie
pub const FLASH_COOKIE: &str = "flash";

/// Visual category, used as a CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Danger,
    Info,
    Warning,
}

/// Every message the app can flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Registered,
    LoggedIn,
    LoggedOut,
    LoginRequired,
    ItemAdded,
    ItemUpdated,
    ItemDeleted,
    ItemNotFound,
    NameRequired,
    GenericError,
}

const ALL: [Flash; 10] = [
    Flash::Registered,
    Flash::LoggedIn,
    Flash::LoggedOut,
    Flash::LoginRequired,
    Flash::ItemAdded,
    Flash::ItemUpdated,
    Flash::ItemDeleted,
    Flash::ItemNotFound,
    Flash::NameRequired,
    Flash::GenericError,
];

impl Flash {
    /// Cookie value for this message
    pub fn key(self) -> &'static str {
        match self {
            Flash::Registered => "registered",
            Flash::LoggedIn => "logged_in",
            Flash::LoggedOut => "logged_out",
            Flash::LoginRequired => "login_required",
            Flash::ItemAdded => "item_added",
            Flash::ItemUpdated => "item_updated",
            Flash::ItemDeleted => "item_deleted",
            Flash::ItemNotFound => "item_not_found",
            Flash::NameRequired => "name_required",
            Flash::GenericError => "error",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL.into_iter().find(|flash| flash.key() == key)
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::Registered => "Registration successful! Please log in.",
            Flash::LoggedIn => "Logged in successfully.",
            Flash::LoggedOut => "You have been logged out.",
            Flash::LoginRequired => "Please log in to access this page.",
            Flash::ItemAdded => "Item added successfully!",
            Flash::ItemUpdated => "Item updated successfully!",
            Flash::ItemDeleted => "Item deleted successfully!",
            Flash::ItemNotFound => "Item not found",
            Flash::NameRequired => "Name is required",
            Flash::GenericError => "An error occurred. Please try again.",
        }
    }

    pub fn category(self) -> FlashCategory {
        match self {
            Flash::Registered
            | Flash::LoggedIn
            | Flash::ItemAdded
            | Flash::ItemUpdated
            | Flash::ItemDeleted => FlashCategory::Success,
            Flash::LoggedOut => FlashCategory::Info,
            Flash::LoginRequired => FlashCategory::Warning,
            Flash::ItemNotFound
            | Flash::NameRequired
            | Flash::GenericError => FlashCategory::Danger,
        }
    }

    /// Template-facing form of this message
    pub fn view(self) -> FlashView {
        FlashView {
            category: self.category(),
            message: self.message(),
        }
    }
}

/// Flash as handed to templates
#[derive(Debug, Clone, Serialize)]
pub struct FlashView {
    pub category: FlashCategory,
    pub message: &'static str,
}

/// Queues a flash for the next page
pub fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.key()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Takes the pending flash, clearing the cookie
///
/// Unknown keys are dropped silently.
pub fn take(jar: CookieJar) -> (CookieJar, Option<FlashView>) {
    let Some(key) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, Flash::from_key(&key).map(Flash::view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    #[test]
    fn test_keys_are_unique_and_reversible() {
        for flash in ALL {
            assert_eq!(Flash::from_key(flash.key()), Some(flash));
        }
        assert_eq!(Flash::from_key("<script>"), None);
    }

    #[test]
    fn test_set_stores_key_only() {
        let jar = set(CookieJar::new(), Flash::ItemAdded);
        assert_eq!(jar.get(FLASH_COOKIE).unwrap().value(), "item_added");
    }

    #[test]
    fn test_take_consumes_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("flash=item_not_found"));
        let jar = CookieJar::from_headers(&headers);

        let (jar, flash) = take(jar);
        let flash = flash.unwrap();
        assert_eq!(flash.message, "Item not found");
        assert_eq!(flash.category, FlashCategory::Danger);
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_take_without_cookie() {
        let (_, flash) = take(CookieJar::new());
        assert!(flash.is_none());
    }

    #[test]
    fn test_take_ignores_forged_key() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("flash=hacked"));

        let (_, flash) = take(CookieJar::from_headers(&headers));
        assert!(flash.is_none());
    }
}
