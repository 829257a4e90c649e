//! Argument list rendering shared by classes, methods and functions.

use crate::docstring::DocString;
use crate::model::Descriptor;

/// Declared types whose defaults are quoted.
const STRING_TYPES: &[&str] = &["strconstant", "string"];

/// Render `name=value, ...` for the descriptor's arguments.
///
/// `doc` supplies the declared types; for a class it is the class docstring
/// merged with its constructor's.
pub fn render_args(d: &Descriptor, doc: &DocString) -> String {
    let Some(args) = d.args.as_ref() else {
        tracing::warn!(name = d.name(), "no args detected");
        return String::new();
    };

    args.iter()
        .map(|arg| render_arg(arg, d.default_for(arg), doc.declared_type(arg)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_arg(arg: &str, default: Option<String>, declared: Option<&str>) -> String {
    match (default, declared) {
        (Some(value), Some(ty)) if STRING_TYPES.contains(&ty.to_lowercase().as_str()) => {
            format!("{}='{}'", arg, value)
        }
        (Some(value), _) => format!("{}={}", arg, value),
        (None, Some("testcase")) if arg == "parent" => format!("{}=self", arg),
        (None, Some(ty)) => format!("{}=@{}", arg, ty),
        (None, None) => format!("{}=", arg),
    }
}
