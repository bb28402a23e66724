/// Embedded HTML templates
///
/// Templates are compiled into the binary and registered once at startup.

use handlebars::Handlebars;

const INDEX: &str = include_str!("../templates/index.hbs");

/// Builds the template registry
///
/// # Errors
///
/// Returns an error if an embedded template fails to parse.
pub fn load() -> Result<Handlebars<'static>, handlebars::TemplateError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_template_string("index", INDEX)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_renders() {
        let registry = load().unwrap();
        let html = registry.render("index", &json!({ "version": "1.2.3" })).unwrap();
        assert!(html.contains("/api/items"));
        assert!(html.contains("1.2.3"));
    }

    #[test]
    fn test_strict_mode_rejects_missing_fields() {
        let registry = load().unwrap();
        assert!(registry.render("index", &json!({})).is_err());
    }
}
