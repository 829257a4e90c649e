//! Renderer module — trait-based format dispatch for help pages.

pub mod html;
pub mod json;
pub mod markdown;

use crate::error::{Error, Result};
use crate::help::HelpPage;

/// Trait for rendering a help page into a specific output format.
pub trait Renderer {
    fn render(&self, page: &HelpPage) -> String;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Kind;

    fn page() -> HelpPage {
        HelpPage {
            title: "Cache > get".into(),
            label: "get".into(),
            kind: Kind::Method,
            entries: Vec::new(),
            snippet: None,
        }
    }

    #[test]
    fn known_formats() {
        assert!(create_renderer("md").unwrap().render(&page()).starts_with("### Cache > get"));
        assert!(create_renderer("markdown").unwrap().render(&page()).starts_with("### "));
        assert!(create_renderer("html").unwrap().render(&page()).starts_with("<font"));
        assert!(create_renderer("json").unwrap().render(&page()).starts_with('{'));
    }

    #[test]
    fn unknown_format_lists_accepted_ones() {
        let err = create_renderer("pdf").err().unwrap();
        assert_eq!(err.to_string(), "unknown format: pdf. Use markdown, html, or json");
    }
}
