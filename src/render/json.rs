//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the help page model directly.

use crate::help::HelpPage;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, page: &HelpPage) -> String {
        // A page holds only strings and plain enums.
        let mut out = serde_json::to_string_pretty(page).unwrap_or_default();
        out.push('\n');
        out
    }
}
