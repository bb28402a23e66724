/// Common test utilities for integration tests
///
/// `Browser` keeps a cookie jar across requests the way a real browser
/// would, so tests can walk through register → login → pages → logout.

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use itemlist_web::app::{build_router, AppState};
use itemlist_web::config::{Config, DatabaseConfig, WebConfig};
use itemlist_web::templates;
use itemlist_shared::db;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        let db = db::connect_in_memory().await?;

        let config = Config {
            web: WebConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                session_ttl_hours: 24,
                remember_me_days: 30,
                cookie_secure: false,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
        };

        let state = AppState::new(db.clone(), config, templates::load()?);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    pub fn browser(&self) -> Browser<'_> {
        Browser {
            ctx: self,
            cookies: BTreeMap::new(),
        }
    }

    pub async fn session_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.db)
            .await
            .unwrap()
    }
}

/// A response as seen by the browser
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Page {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn set_cookies(&self) -> Vec<&str> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }
}

/// Cookie-keeping client for the app router
pub struct Browser<'a> {
    ctx: &'a TestContext,
    pub cookies: BTreeMap<String, String>,
}

impl Browser<'_> {
    pub async fn get(&mut self, uri: &str) -> Page {
        let request = self
            .request("GET", uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Page {
        let body = form
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, NON_ALPHANUMERIC),
                    utf8_percent_encode(v, NON_ALPHANUMERIC)
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Follows a redirect with a GET
    pub async fn follow(&mut self, page: &Page) -> Page {
        let location = page.location().expect("response is not a redirect").to_string();
        self.get(&location).await
    }

    pub async fn register(&mut self, username: &str, password: &str) -> Page {
        self.post(
            "/register",
            &[
                ("username", username),
                ("email", &format!("{}@example.com", username)),
                ("password", password),
                ("confirm_password", password),
            ],
        )
        .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Page {
        self.post("/login", &[("username", username), ("password", password)])
            .await
    }

    /// Registers and logs in, landing on the item list
    pub async fn sign_up(&mut self, username: &str) -> Page {
        let page = self.register(username, "pw123").await;
        assert_eq!(page.status, StatusCode::SEE_OTHER);
        let page = self.login(username, "pw123").await;
        assert_eq!(page.status, StatusCode::SEE_OTHER);
        self.follow(&page).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> Page {
        let response = self.ctx.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let page = Page {
            status,
            headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        };
        self.absorb(&page);
        page
    }

    fn absorb(&mut self, page: &Page) {
        for raw in page.set_cookies() {
            let mut parts = raw.split(';').map(str::trim);
            let Some((name, value)) = parts.next().and_then(|p| p.split_once('=')) else {
                continue;
            };
            let expired = parts.any(|attr| attr.eq_ignore_ascii_case("Max-Age=0"));

            if expired || value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
    }
}
