/// Registration, login and logout
///
/// # Endpoints
///
/// - `GET|POST /register` - Create an account, then go to `/login`
/// - `GET|POST /login` - Open a session
/// - `GET /logout` - Close the session (guarded)
///
/// Unknown usernames and wrong passwords produce the same 401 page, and
/// both pay for one Argon2 verification.

use crate::{
    app::AppState,
    error::WebResult,
    flash::{self, Flash},
    middleware::auth::{current_user, AuthContext},
    session::{clear_session_cookie, is_safe_redirect, session_cookie},
    templates::{self, LoginContent, Page, RegisterContent},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::CookieJar;
use itemlist_shared::{
    auth::{
        password::{check_credentials, hash_password},
        session::generate_session_token,
    },
    models::{
        session::{CreateSession, Session},
        user::{is_unique_violation, CreateUser, User},
    },
};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// Shown for every failed login
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Shown when registration hits an existing username
pub const USERNAME_TAKEN: &str = "Username already taken";

/// Registration form
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 3, max = 64, message = "Username must be between 3 and 64 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 4, max = 128, message = "Password must be between 4 and 128 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,
}

/// Login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Checkbox; present only when ticked
    pub remember: Option<String>,

    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// Form errors in field order
fn form_messages(errors: &ValidationErrors) -> Vec<String> {
    let fields = errors.field_errors();
    ["username", "email", "password", "confirm_password"]
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errs| errs.iter())
        .map(|err| {
            err.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string())
        })
        .collect()
}

fn render_register(
    state: &AppState,
    status: StatusCode,
    errors: Vec<String>,
    form: &RegisterForm,
) -> WebResult<Response> {
    let html = templates::render(
        &state.templates,
        "register",
        &Page {
            title: "Register",
            flash: None,
            username: None,
            content: RegisterContent {
                errors,
                form_username: form.username.clone(),
                form_email: form.email.clone(),
            },
        },
    )?;
    Ok((status, Html(html)).into_response())
}

/// GET /register
pub async fn register_page(State(state): State<AppState>, jar: CookieJar) -> WebResult<Response> {
    if current_user(&state.db, &jar).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let (jar, flash) = flash::take(jar);
    let html = templates::render(
        &state.templates,
        "register",
        &Page {
            title: "Register",
            flash,
            username: None,
            content: RegisterContent {
                errors: Vec::new(),
                form_username: String::new(),
                form_email: String::new(),
            },
        },
    )?;

    Ok((jar, Html(html)).into_response())
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> WebResult<Response> {
    if current_user(&state.db, &jar).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    if let Err(errors) = form.validate() {
        return render_register(&state, StatusCode::BAD_REQUEST, form_messages(&errors), &form);
    }

    let password = form.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let created = User::create(
        &state.db,
        CreateUser {
            username: form.username.clone(),
            email: form.email.clone(),
            password_hash,
        },
    )
    .await;

    match created {
        Ok(user) => {
            tracing::info!(user_id = user.id, "User registered");
            let jar = flash::set(jar, Flash::Registered);
            Ok((jar, Redirect::to("/login")).into_response())
        }
        Err(e) if is_unique_violation(&e) => render_register(
            &state,
            StatusCode::BAD_REQUEST,
            vec![USERNAME_TAKEN.to_string()],
            &form,
        ),
        Err(e) => Err(e.into()),
    }
}

fn render_login(
    state: &AppState,
    flash: Option<crate::flash::FlashView>,
    error: Option<&'static str>,
    next: Option<String>,
) -> WebResult<String> {
    templates::render(
        &state.templates,
        "login",
        &Page {
            title: "Log in",
            flash,
            username: None,
            content: LoginContent { error, next },
        },
    )
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> WebResult<Response> {
    if current_user(&state.db, &jar).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let (jar, flash) = flash::take(jar);
    let html = render_login(&state, flash, None, query.next)?;
    Ok((jar, Html(html)).into_response())
}

/// POST /login
///
/// On success sets the `session` cookie and redirects to `next` when it is
/// a safe local path, else to `/`.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    if current_user(&state.db, &jar).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let user = User::find_by_username(&state.db, &form.username).await?;
    let password = form.password;
    let (user, verified) = tokio::task::spawn_blocking(move || {
        let verified = check_credentials(user.as_ref(), &password);
        (user, verified)
    })
    .await?;

    let user = match (user, verified?) {
        (Some(user), true) => user,
        _ => {
            tracing::debug!("Rejected login attempt");
            let html = render_login(&state, None, Some(INVALID_CREDENTIALS), form.next)?;
            return Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response());
        }
    };

    let remember = form.remember.is_some();
    let ttl_seconds = state.config.session_ttl_seconds(remember);
    let (token, token_hash) = generate_session_token();

    Session::create(
        &state.db,
        CreateSession {
            token_hash,
            user_id: user.id,
            remember,
            ttl_seconds,
        },
    )
    .await?;

    let cookie = session_cookie(
        &token,
        remember.then_some(ttl_seconds),
        state.config.web.cookie_secure,
    )?;
    tracing::info!(user_id = user.id, remember, "User logged in");

    let target = form
        .next
        .filter(|next| is_safe_redirect(next))
        .unwrap_or_else(|| "/".to_string());

    let jar = flash::set(jar.add(cookie), Flash::LoggedIn);
    Ok((jar, Redirect::to(&target)).into_response())
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    jar: CookieJar,
) -> WebResult<Response> {
    Session::delete(&state.db, &auth.token_hash).await?;
    tracing::info!(user_id = auth.user_id, "User logged out");

    let jar = flash::set(clear_session_cookie(jar), Flash::LoggedOut);
    Ok((jar, Redirect::to("/login")).into_response())
}
