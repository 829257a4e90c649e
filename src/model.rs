//! Data model for the help listing — the descriptors the remote side sends.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One API element of the listing (package, class, method, ...).
///
/// Every key is optional; the tree builder checks what it needs. Nested
/// sequences stay raw JSON so each child is decoded on its own, and a
/// wrongly typed value only costs that child.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Descriptor {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_args: Vec<(String, Value)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_generic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub libraries: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapters: Option<Vec<Value>>,
}

impl Descriptor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Default literal for `arg`. The last matching pair wins.
    pub fn default_for(&self, arg: &str) -> Option<String> {
        self.default_args
            .iter()
            .rev()
            .find(|(name, _)| name == arg)
            .map(|(_, value)| literal(value))
    }

    /// Drop the nested sequences, leaving the node's own metadata.
    pub(crate) fn without_children(mut self) -> Self {
        self.classes = None;
        self.functions = None;
        self.modules = None;
        self.libraries = None;
        self.adapters = None;
        self
    }
}

/// Render a default value as it appears in source: strings verbatim, anything
/// else in its JSON form.
fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

/// Recognized descriptor types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    Package,
    PackageLibraries,
    PackageAdapters,
    Libraries,
    Adapters,
    Module,
    Class,
    Method,
    Function,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Package => "package",
            Kind::PackageLibraries => "package-libraries",
            Kind::PackageAdapters => "package-adapters",
            Kind::Libraries => "libraries",
            Kind::Adapters => "adapters",
            Kind::Module => "module",
            Kind::Class => "class",
            Kind::Method => "method",
            Kind::Function => "function",
        }
    }

    /// Package-like kinds group other nodes and never render a snippet.
    pub fn is_grouping(self) -> bool {
        !matches!(self, Kind::Class | Kind::Method | Kind::Function)
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "package" => Kind::Package,
            "package-libraries" => Kind::PackageLibraries,
            "package-adapters" => Kind::PackageAdapters,
            "libraries" => Kind::Libraries,
            "adapters" => Kind::Adapters,
            "module" => Kind::Module,
            "class" => Kind::Class,
            "method" => Kind::Method,
            "function" => Kind::Function,
            other => return Err(other.to_string()),
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a listing payload: a JSON array whose entries are decoded into
/// [`Descriptor`]s later, one at a time.
pub fn decode_listing(payload: &[u8]) -> crate::Result<Vec<Value>> {
    Ok(serde_json::from_slice(payload)?)
}
