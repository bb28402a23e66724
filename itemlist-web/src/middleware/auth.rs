/// Login guard
///
/// Resolves the `session` cookie to a user on every guarded request and
/// injects an [`AuthContext`] into the request extensions. Anonymous callers
/// are sent to `/login?next=<path>` with a flash asking them to log in.

use crate::{
    app::AppState,
    error::WebResult,
    flash::{self, Flash},
    session::{login_location, SESSION_COOKIE},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use itemlist_shared::{
    auth::session::{hash_session_token, is_well_formed_token},
    models::session::Session,
};
use sqlx::SqlitePool;

/// Identity of the logged-in caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,

    /// Hash of the presented session token, needed to log out
    pub token_hash: String,
}

/// Looks up the caller behind the session cookie, if any
///
/// Malformed, unknown and expired tokens all resolve to None.
pub async fn current_user(db: &SqlitePool, jar: &CookieJar) -> WebResult<Option<AuthContext>> {
    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value()) else {
        return Ok(None);
    };
    if !is_well_formed_token(token) {
        return Ok(None);
    }

    let token_hash = hash_session_token(token);
    let user = Session::resolve(db, &token_hash).await?;

    Ok(user.map(|user| AuthContext {
        user_id: user.user_id,
        username: user.username,
        token_hash,
    }))
}

/// Middleware requiring a live session
pub async fn require_login(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> WebResult<Response> {
    match current_user(&state.db, &jar).await? {
        Some(auth) => {
            req.extensions_mut().insert(auth);
            Ok(next.run(req).await)
        }
        None => {
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            tracing::debug!(path = %target, "Anonymous request to guarded route");

            let jar = flash::set(jar, Flash::LoginRequired);
            Ok((jar, Redirect::to(&login_location(target))).into_response())
        }
    }
}
