/// Embedded page templates
///
/// Every page is rendered inside the `layout` partial, which shows the
/// navigation bar and the pending flash message. Handlebars escapes all
/// interpolated values, so user-supplied names and descriptions are safe to
/// render as is.

use crate::{error::WebResult, flash::FlashView};
use handlebars::Handlebars;
use serde::Serialize;

const LAYOUT: &str = include_str!("../templates/layout.hbs");
const LOGIN: &str = include_str!("../templates/login.hbs");
const REGISTER: &str = include_str!("../templates/register.hbs");
const INDEX: &str = include_str!("../templates/index.hbs");

/// Builds the template registry
///
/// # Errors
///
/// Returns an error if an embedded template fails to parse.
pub fn load() -> Result<Handlebars<'static>, handlebars::TemplateError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_partial("layout", LAYOUT)?;
    registry.register_template_string("login", LOGIN)?;
    registry.register_template_string("register", REGISTER)?;
    registry.register_template_string("index", INDEX)?;
    Ok(registry)
}

/// Data shared by every page
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub title: &'static str,
    pub flash: Option<FlashView>,

    /// Logged-in user, if any
    pub username: Option<String>,

    #[serde(flatten)]
    pub content: T,
}

#[derive(Debug, Serialize)]
pub struct LoginContent {
    pub error: Option<&'static str>,
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterContent {
    pub errors: Vec<String>,
    pub form_username: String,
    pub form_email: String,
}

#[derive(Debug, Serialize)]
pub struct IndexContent {
    pub items: Vec<ItemView>,
}

#[derive(Debug, Serialize)]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

/// Renders a named template
pub fn render<T: Serialize>(
    registry: &Handlebars<'static>,
    name: &str,
    page: &Page<T>,
) -> WebResult<String> {
    Ok(registry.render(name, page)?)
}
