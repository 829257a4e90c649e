//! HTML renderer — the rich-text fragment of the documentation pane.
//!
//! Lines are joined with `<br />`; docstring text is inserted as-is, the
//! pane renders whatever markup the library authors wrote.

use crate::docstring::DocEntry;
use crate::help::HelpPage;
use crate::render::Renderer;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, page: &HelpPage) -> String {
        let mut lines = vec![
            format!("<font color=\"grey\"><u><b>{}</b></u></font>", html_escape(&page.title)),
            String::new(),
        ];

        for entry in &page.entries {
            lines.push(match entry {
                DocEntry::ArgumentsHeading => "<u>Arguments:</u>".to_string(),
                DocEntry::Argument { name, ty, text } => {
                    format!(" - <b>{}</b> (<i>{}</i>): {}", name, ty, text)
                }
                DocEntry::ReturnHeading => "<u>On exit:</u>".to_string(),
                DocEntry::Return { ty, text } => format!(" - <b>return</b> (<i>{}</i>): {}", ty, text),
                DocEntry::Text(line) => line.clone(),
            });
        }

        lines.join("<br />")
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
