use minijinja::Environment;
use serde::Serialize;
use std::path::Path;

use super::helpers;
use super::receipt::{RECEIPT_TEMPLATE, RECEIPT_TEMPLATE_ID};
use crate::core::ExportResult;

/// Renders Typst markup from minijinja templates.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> ExportResult<Self> {
        let mut env = Environment::new();

        env.add_filter("typst", helpers::typst_filter);
        env.add_filter("money", helpers::money_filter);

        env.add_template(RECEIPT_TEMPLATE_ID, RECEIPT_TEMPLATE)?;

        Ok(TemplateEngine { env })
    }

    /// Built-in templates, with the receipt template replaced by the file at
    /// `receipt_template` when one is configured.
    pub fn with_receipt_override(receipt_template: Option<&Path>) -> ExportResult<Self> {
        let mut engine = Self::new()?;

        if let Some(path) = receipt_template {
            let content = std::fs::read_to_string(path)?;
            engine.load_template(RECEIPT_TEMPLATE_ID, content)?;
            tracing::info!(path = %path.display(), "Loaded custom receipt template");
        }

        Ok(engine)
    }

    pub fn load_template(&mut self, template_id: &str, content: String) -> ExportResult<()> {
        self.env.add_template_owned(template_id.to_string(), content)?;
        Ok(())
    }

    pub fn render<S: Serialize>(&self, template_id: &str, context: S) -> ExportResult<String> {
        let template = self.env.get_template(template_id)?;
        Ok(template.render(context)?)
    }

    pub fn template_exists(&self, template_id: &str) -> bool {
        self.env.get_template(template_id).is_ok()
    }
}
