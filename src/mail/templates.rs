use lazy_static::lazy_static;
use minijinja::{AutoEscape, Environment};

use super::{MailData, MailKind};
use crate::error::AppError;

lazy_static! {
    // Templates are compiled into the binary; a syntax error is a build defect.
    static ref TEMPLATES: Environment<'static> = {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template("verification", include_str!("../../templates/verification.html"))
            .expect("verification template");
        env.add_template(
            "forgot-password",
            include_str!("../../templates/forgot-password.html"),
        )
        .expect("forgot-password template");
        env
    };
}

/// Renders the HTML body for `kind`.
pub fn render(kind: MailKind, data: &MailData) -> Result<String, AppError> {
    TEMPLATES
        .get_template(kind.template_name())
        .and_then(|template| template.render(data))
        .map_err(|e| AppError::MailError(format!("Failed to render template: {}", e)))
}
