//! Docstring tag parser — `@param` / `@type` / `@return` / `@rtype`.
//!
//! Two readings of the same text: [`DocString`] keeps what snippet rendering
//! needs (declared argument types, whether a value is returned), and
//! [`entries`] keeps everything for the help page.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

static RE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@param (.*?)(?::(.*))?$").unwrap());

static RE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@type [^:]*:(.*)$").unwrap());

static RE_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@return[^:]*(?::(.*))?$").unwrap());

static RE_RTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@rtype[^:]*(?::(.*))?$").unwrap());

/// Argument types and return flag declared by a docstring.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DocString {
    types: HashMap<String, String>,
    pub has_return_value: bool,
}

impl DocString {
    pub fn parse(desc: &str) -> Self {
        let mut doc = DocString::default();
        doc.absorb(desc);
        doc
    }

    /// Parse `desc` on top of what is already known. Later declarations
    /// overwrite earlier ones; the return flag is only ever raised.
    pub fn absorb(&mut self, desc: &str) {
        let mut pending: Option<String> = None;
        for line in desc.trim().lines().map(str::trim) {
            if let Some(caps) = RE_PARAM.captures(line) {
                pending = Some(caps[1].trim().to_string());
            } else if line.starts_with("@type ") {
                // The name on the @type line is not compared with the pending one.
                if let (Some(name), Some(caps)) = (&pending, RE_TYPE.captures(line)) {
                    self.types.insert(name.clone(), caps[1].trim().to_string());
                }
            } else if line.starts_with("@return") || line.starts_with("@rtype") {
                self.has_return_value = true;
            }
        }
    }

    pub fn declared_type(&self, arg: &str) -> Option<&str> {
        self.types.get(arg).map(String::as_str)
    }
}

/// One displayable line of a help page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DocEntry {
    /// Emitted once, before the first argument.
    ArgumentsHeading,
    Argument {
        name: String,
        #[serde(rename = "type")]
        ty: String,
        text: String,
    },
    ReturnHeading,
    Return {
        #[serde(rename = "type")]
        ty: String,
        text: String,
    },
    Text(String),
}

/// Read a docstring into display entries.
///
/// An argument entry is emitted when its `@type` line is seen, a return
/// entry when its `@rtype` line is seen.
pub fn entries(desc: &str) -> Vec<DocEntry> {
    let mut out = Vec::new();
    let mut param: Option<(String, String)> = None;
    let mut return_text = String::new();
    let mut first_argument = true;

    for line in desc.trim().lines().map(str::trim) {
        if let Some(caps) = RE_PARAM.captures(line) {
            let name = caps[1].to_string();
            let text = caps.get(2).map_or("", |m| m.as_str()).to_string();
            param = Some((name, text));
        } else if line.starts_with("@type ") {
            let ty = RE_TYPE
                .captures(line)
                .map(|caps| caps[1].trim().to_string())
                .unwrap_or_default();
            let (name, text) = param.clone().unwrap_or_default();
            if first_argument {
                first_argument = false;
                out.push(DocEntry::ArgumentsHeading);
            }
            out.push(DocEntry::Argument { name, ty, text });
        } else if let Some(caps) = RE_RTYPE.captures(line) {
            let ty = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            out.push(DocEntry::ReturnHeading);
            out.push(DocEntry::Return {
                ty,
                text: return_text.clone(),
            });
        } else if let Some(caps) = RE_RETURN.captures(line) {
            return_text = caps.get(1).map_or("", |m| m.as_str()).to_string();
        } else {
            out.push(DocEntry::Text(line.to_string()));
        }
    }
    out
}
