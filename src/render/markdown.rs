//! Markdown renderer — help page with fenced snippet blocks.

use crate::docstring::DocEntry;
use crate::help::HelpPage;
use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, page: &HelpPage) -> String {
        let mut out = String::new();
        out.push_str(&format!("### {}\n\n", page.title));
        out.push_str(&format!("*{}* `{}`\n\n", page.kind, page.label));

        let mut text = String::new();
        for entry in &page.entries {
            match entry {
                DocEntry::Text(line) => {
                    text.push_str(line);
                    text.push('\n');
                }
                DocEntry::ArgumentsHeading => {
                    flush_text(&mut out, &mut text);
                    out.push_str("#### Arguments\n\n");
                }
                DocEntry::Argument { name, ty, text: desc } => {
                    flush_text(&mut out, &mut text);
                    out.push_str(&format!("* **{}** (*{}*): {}\n", name, ty, desc.trim()));
                }
                DocEntry::ReturnHeading => {
                    flush_text(&mut out, &mut text);
                    blank_line(&mut out);
                    out.push_str("#### On exit\n\n");
                }
                DocEntry::Return { ty, text: desc } => {
                    out.push_str(&format!("* **return** (*{}*): {}\n", ty, desc.trim()));
                }
            }
        }
        flush_text(&mut out, &mut text);

        if let Some(ref snippet) = page.snippet {
            blank_line(&mut out);
            out.push_str("#### Definition\n\n");
            push_code(&mut out, &snippet.definition);
            if !snippet.execution.is_empty() {
                out.push_str("\n#### Execution\n\n");
                push_code(&mut out, &snippet.execution);
            }
            if let Some(ref unit) = snippet.unit_definition {
                out.push_str("\n#### Unit definition\n\n");
                push_code(&mut out, unit);
            }
        }

        out
    }
}

/// Emit accumulated plain lines as one paragraph.
fn flush_text(out: &mut String, text: &mut String) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        out.push_str(trimmed);
        out.push_str("\n\n");
    }
    text.clear();
}

/// Separate the next block from whatever precedes it.
fn blank_line(out: &mut String) {
    if !out.ends_with("\n\n") {
        out.push('\n');
    }
}

fn push_code(out: &mut String, code: &str) {
    out.push_str("```python\n");
    out.push_str(code.trim_end());
    out.push_str("\n```\n");
}
