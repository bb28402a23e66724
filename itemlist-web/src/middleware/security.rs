/// Security headers middleware
///
/// Adds browser hardening headers to every HTML response.
///
/// # Headers Applied
///
/// - `X-Content-Type-Options: nosniff`
/// - `X-Frame-Options: DENY`
/// - `Referrer-Policy: same-origin` (keeps `next` paths out of third-party logs)
/// - `Content-Security-Policy`: no scripts, same-origin forms only
/// - `Cache-Control: no-store` (pages contain per-user data)
/// - `Strict-Transport-Security` when cookies are marked `Secure`
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use itemlist_web::middleware::security::SecurityHeadersLayer;
///
/// let app: Router = Router::new()
///     .layer(SecurityHeadersLayer::new(true));
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    response::Response,
};
use std::task::{Context, Poll};
use tower::{Layer, Service};

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'none'; \
style-src 'self' 'unsafe-inline'; img-src 'self' data:; form-action 'self'; frame-ancestors 'none'";

const HSTS: &str = "max-age=31536000; includeSubDomains";

/// Security headers middleware layer
#[derive(Clone)]
pub struct SecurityHeadersLayer {
    /// Send HSTS; only meaningful behind HTTPS
    enable_hsts: bool,
}

impl SecurityHeadersLayer {
    pub fn new(enable_hsts: bool) -> Self {
        Self { enable_hsts }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersMiddleware {
            inner,
            enable_hsts: self.enable_hsts,
        }
    }
}

/// Security headers middleware service
#[derive(Clone)]
pub struct SecurityHeadersMiddleware<S> {
    inner: S,
    enable_hsts: bool,
}

impl<S> Service<Request> for SecurityHeadersMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let future = self.inner.call(request);
        let enable_hsts = self.enable_hsts;

        Box::pin(async move {
            let mut response = future.await?;
            let headers = response.headers_mut();

            headers.insert(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            );
            headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
            headers.insert(
                header::REFERRER_POLICY,
                HeaderValue::from_static("same-origin"),
            );
            headers.insert(
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(CONTENT_SECURITY_POLICY),
            );
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

            if enable_hsts {
                headers.insert(
                    header::STRICT_TRANSPORT_SECURITY,
                    HeaderValue::from_static(HSTS),
                );
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    async fn call(enable_hsts: bool) -> Response {
        let app = Router::new()
            .route("/test", get(|| async { "test" }))
            .layer(SecurityHeadersLayer::new(enable_hsts));

        app.oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_security_headers_applied() {
        let response = call(false).await;
        let headers = response.headers();

        assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
        assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
        assert_eq!(headers.get("Referrer-Policy").unwrap(), "same-origin");
        assert_eq!(headers.get("Cache-Control").unwrap(), "no-store");
        assert!(headers
            .get("Content-Security-Policy")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("form-action 'self'"));
    }

    #[tokio::test]
    async fn test_hsts_follows_secure_cookies() {
        assert!(call(true)
            .await
            .headers()
            .get("Strict-Transport-Security")
            .is_some());
        assert!(call(false)
            .await
            .headers()
            .get("Strict-Transport-Security")
            .is_none());
    }
}
