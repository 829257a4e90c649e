//! Help tree — an arena of nodes built from a descriptor listing.
//!
//! Children are owned top-down by the arena; a node reaches its parent
//! through a [`NodeId`] handle. The tree is rebuilt from scratch on every
//! load, never patched; handles from an earlier build or from before a
//! [`HelpTree::clear`] do not resolve.

use crate::docstring::DocString;
use crate::error::{Error, Result};
use crate::model::{Descriptor, Kind};
use serde::Deserialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// Package shown when building the framework tree.
pub const FRAMEWORK_PACKAGE: &str = "TestLibrary";
/// Package shown when building the interoperability tree.
pub const INTEROP_PACKAGE: &str = "TestInteroperability";
/// Method name marking a class constructor.
pub const CONSTRUCTOR: &str = "__init__";

/// Which parts of the listing to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildMode {
    pub framework: bool,
    pub interops: bool,
    pub adapters: bool,
}

impl Default for BuildMode {
    fn default() -> Self {
        BuildMode {
            framework: true,
            interops: false,
            adapters: false,
        }
    }
}

/// Variant flags threaded down the build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Variant {
    generic: bool,
    default: bool,
}

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a node in the [`HelpTree`] build that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    generation: u64,
    index: usize,
}

#[derive(Debug)]
pub struct Node {
    pub kind: Kind,
    /// Own metadata of the descriptor; nested sequences live in the tree.
    pub data: Descriptor,
    pub doc: DocString,
    pub is_generic: bool,
    pub is_default: bool,
    /// Constructors are kept for lookups but not listed.
    pub hidden: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn name(&self) -> &str {
        self.data.name()
    }

    /// Tree label; `libraries`/`adapters` groups show their variant.
    pub fn label(&self) -> String {
        if matches!(self.kind, Kind::Libraries | Kind::Adapters) {
            if self.is_default {
                return format!("{} (extra)", self.name());
            }
            if self.is_generic {
                return format!("{} (generic)", self.name());
            }
        }
        self.name().to_string()
    }
}

#[derive(Debug)]
pub struct HelpTree {
    generation: u64,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Default for HelpTree {
    fn default() -> Self {
        HelpTree {
            generation: next_generation(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }
}

impl HelpTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from `listing`.
    ///
    /// Descriptors filtered by `mode`, of unknown type, missing a required
    /// key or holding a wrongly typed value are skipped with their subtree;
    /// their siblings are still built.
    pub fn build(listing: Vec<Value>, mode: BuildMode) -> Self {
        let mut tree = HelpTree::new();
        tree.insert_all(listing, None, mode, Variant::default());
        tracing::debug!(nodes = tree.len(), "help tree built");
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node. Handles issued so far stop resolving.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.generation = next_generation();
    }

    /// The node behind `id`, or `None` for a handle of another build.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.generation != self.generation {
            return None;
        }
        self.nodes.get(id.index)
    }

    /// # Panics
    ///
    /// If `id` was not issued by this build; use [`HelpTree::get`] for
    /// handles that may have outlived a reload.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node handle {:?}", id),
        }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.node(id).parent.map(|p| self.node(p))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The `__init__` child of a class, if listed.
    pub fn constructor(&self, id: NodeId) -> Option<&Node> {
        self.children(id)
            .iter()
            .map(|&c| self.node(c))
            .find(|n| n.name() == CONSTRUCTOR)
    }

    /// `Parent > Name`, as shown above the help text.
    pub fn full_name(&self, id: NodeId) -> String {
        let parent = self.parent(id).map(Node::name).unwrap_or_default();
        format!("{} > {}", parent, self.node(id).name())
    }

    /// Resolve a `/`-separated path of names, starting at the top level.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let mut candidates = self.roots.as_slice();
        let mut found = None;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            let id = *candidates.iter().find(|&&c| self.node(c).name() == part)?;
            candidates = self.children(id);
            found = Some(id);
        }
        found
    }

    /// Depth-first walk: `(depth, id)` in display order.
    pub fn walk(&self) -> Vec<(usize, NodeId)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, NodeId)> = self.roots.iter().rev().map(|&r| (0, r)).collect();
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            stack.extend(self.children(id).iter().rev().map(|&c| (depth + 1, c)));
        }
        out
    }

    // -- Building -------------------------------------------------------------

    fn insert_all(
        &mut self,
        listing: Vec<Value>,
        parent: Option<NodeId>,
        mode: BuildMode,
        variant: Variant,
    ) {
        for value in listing {
            if let Err(e) = self.insert(value, parent, mode, variant) {
                tracing::error!("{}", e);
            }
        }
    }

    fn insert(
        &mut self,
        value: Value,
        parent: Option<NodeId>,
        mode: BuildMode,
        variant: Variant,
    ) -> Result<()> {
        let mut d: Descriptor = serde_json::from_value(value).map_err(Error::InvalidDescriptor)?;
        let raw_kind = d
            .kind
            .clone()
            .ok_or_else(|| Error::malformed(d.name.as_deref(), "type"))?;
        let kind: Kind = match raw_kind.parse() {
            Ok(kind) => kind,
            Err(other) => {
                tracing::error!(name = d.name(), "type not supported: {}", other);
                return Ok(());
            }
        };
        let Some(name) = d.name.clone() else {
            return Err(Error::malformed(None, "name"));
        };

        let (children, variant) = match kind {
            Kind::Package | Kind::PackageLibraries | Kind::PackageAdapters => {
                if !keeps_package(kind, &name, mode) {
                    tracing::debug!(name = %name, kind = %kind, "package skipped by build mode");
                    return Ok(());
                }
                let children = d
                    .libraries
                    .take()
                    .or_else(|| d.adapters.take())
                    .or_else(|| d.modules.take())
                    .or_else(|| d.classes.take())
                    .ok_or_else(|| Error::malformed(Some(name.as_str()), "classes"))?;
                (children, variant)
            }
            Kind::Libraries | Kind::Adapters => {
                let own = Variant {
                    generic: d.is_generic.ok_or_else(|| Error::malformed(Some(name.as_str()), "is-generic"))?,
                    default: d.is_default.ok_or_else(|| Error::malformed(Some(name.as_str()), "is-default"))?,
                };
                let children = d
                    .modules
                    .take()
                    .or_else(|| d.classes.take())
                    .ok_or_else(|| Error::malformed(Some(name.as_str()), "classes"))?;
                (children, own)
            }
            Kind::Module => {
                let children = d.classes.take().ok_or_else(|| Error::malformed(Some(name.as_str()), "classes"))?;
                (children, variant)
            }
            Kind::Class => {
                let children = d
                    .functions
                    .take()
                    .ok_or_else(|| Error::malformed(Some(name.as_str()), "functions"))?;
                (children, variant)
            }
            Kind::Method | Kind::Function => (Vec::new(), variant),
        };

        let id = NodeId {
            generation: self.generation,
            index: self.nodes.len(),
        };
        self.nodes.push(Node {
            kind,
            doc: DocString::parse(d.desc.as_deref().unwrap_or_default()),
            is_generic: variant.generic,
            is_default: variant.default,
            hidden: kind == Kind::Method && name == CONSTRUCTOR,
            data: d.without_children(),
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p.index].children.push(id),
            None => self.roots.push(id),
        }

        self.insert_all(children, Some(id), mode, variant);
        Ok(())
    }
}

fn keeps_package(kind: Kind, name: &str, mode: BuildMode) -> bool {
    match kind {
        Kind::Package => {
            (mode.framework || name == INTEROP_PACKAGE) && (mode.interops || name == FRAMEWORK_PACKAGE)
        }
        Kind::PackageAdapters => mode.adapters,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(value: Value) -> Vec<Value> {
        match value {
            Value::Array(entries) => entries,
            other => panic!("listing must be an array: {other}"),
        }
    }

    fn sample() -> Vec<Value> {
        listing(json!([
            {
                "type": "package", "name": "TestLibrary",
                "modules": [
                    {
                        "type": "module", "name": "TestExecutor",
                        "classes": [
                            {
                                "type": "class", "name": "Step",
                                "functions": [
                                    {"type": "method", "name": "__init__", "args": ["self"]},
                                    {"type": "method", "name": "setEnabled", "args": []}
                                ]
                            },
                            {"type": "function", "name": "wait", "args": ["timeout"]}
                        ]
                    }
                ]
            },
            {"type": "package", "name": "TestInteroperability", "modules": []},
            {
                "type": "package-adapters", "name": "SutAdapters",
                "adapters": [
                    {"type": "adapters", "name": "SSH", "is-generic": true, "is-default": false, "modules": []}
                ]
            }
        ]))
    }

    #[test]
    fn framework_mode_keeps_framework_package_only() {
        let tree = HelpTree::build(sample(), BuildMode::default());
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.node(tree.roots()[0]).name(), FRAMEWORK_PACKAGE);
        // package, module, class, 2 methods, function
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn interop_mode_keeps_interop_package_only() {
        let mode = BuildMode {
            framework: false,
            interops: true,
            adapters: false,
        };
        let tree = HelpTree::build(sample(), mode);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.roots()[0]).name(), INTEROP_PACKAGE);
    }

    #[test]
    fn adapters_need_their_flag() {
        let mode = BuildMode {
            adapters: true,
            ..BuildMode::default()
        };
        let tree = HelpTree::build(sample(), mode);
        let ssh = tree.find("SutAdapters/SSH").unwrap();
        assert_eq!(tree.node(ssh).label(), "SSH (generic)");
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn parent_links_and_paths() {
        let tree = HelpTree::build(sample(), BuildMode::default());
        let id = tree.find("TestLibrary/TestExecutor/Step/setEnabled").unwrap();
        assert_eq!(tree.parent(id).unwrap().name(), "Step");
        assert_eq!(tree.full_name(id), "Step > setEnabled");
        let step = tree.find("/TestLibrary/TestExecutor/Step/").unwrap();
        assert_eq!(tree.constructor(step).unwrap().name(), CONSTRUCTOR);
        assert!(tree.constructor(step).unwrap().hidden);
        assert!(tree.find("TestLibrary/Nope").is_none());
        assert!(tree.find("").is_none());
    }

    #[test]
    fn unknown_type_drops_only_that_node() {
        let tree = HelpTree::build(
            listing(json!([
                {"type": "package-libraries", "name": "Libs", "classes": [
                    {"type": "enum", "name": "Color"},
                    {"type": "class", "name": "A", "functions": []},
                    {"type": "class", "name": "B", "functions": []}
                ]}
            ])),
            BuildMode::default(),
        );
        assert_eq!(tree.len(), 3);
        assert!(tree.find("Libs/B").is_some());
    }

    #[test]
    fn malformed_descriptor_skips_its_subtree() {
        let tree = HelpTree::build(
            listing(json!([
                {"type": "package-libraries", "name": "Libs", "classes": [
                    {"type": "module", "name": "Broken"},
                    {"name": "NoType"},
                    {"type": "class", "functions": []},
                    {"type": "class", "name": "Ok", "functions": [
                        {"type": "method", "name": "run", "args": []}
                    ]}
                ]}
            ])),
            BuildMode::default(),
        );
        assert_eq!(tree.len(), 3);
        assert!(tree.find("Libs/Broken").is_none());
        assert!(tree.find("Libs/Ok/run").is_some());
    }

    #[test]
    fn wrongly_typed_values_skip_only_their_descriptor() {
        let tree = HelpTree::build(
            listing(json!([
                {"type": "package-libraries", "name": "Libs", "classes": [
                    {"type": "class", "name": "Good", "functions": [
                        {"type": "method", "name": "run", "args": []}
                    ]},
                    {"type": "class", "name": "Bad", "functions": [
                        {"type": "method", "name": "open", "args": "host"},
                        {"type": "method", "name": "close", "args": []}
                    ]},
                    {"type": "class", "name": "Pairs", "default-args": [["a", 1, 2]], "functions": []}
                ]},
                {"type": "package-adapters", "name": "SutAdapters", "adapters": [
                    {"type": "adapters", "name": "v1", "is-generic": "yes", "is-default": false, "modules": []}
                ]}
            ])),
            BuildMode {
                adapters: true,
                ..BuildMode::default()
            },
        );
        assert!(tree.find("Libs/Good/run").is_some());
        assert!(tree.find("Libs/Bad/open").is_none());
        assert!(tree.find("Libs/Bad/close").is_some());
        assert!(tree.find("Libs/Pairs").is_none());
        assert!(tree.find("SutAdapters/v1").is_none());
        assert!(tree.find("SutAdapters").is_some());
    }

    #[test]
    fn handles_do_not_outlive_their_build() {
        let mut tree = HelpTree::build(sample(), BuildMode::default());
        let id = tree.find("TestLibrary/TestExecutor/Step").unwrap();
        assert_eq!(tree.get(id).map(Node::name), Some("Step"));

        let rebuilt = HelpTree::build(sample(), BuildMode::default());
        assert!(rebuilt.get(id).is_none());

        tree.clear();
        assert!(tree.get(id).is_none());
    }

    #[test]
    fn group_flags_override_ambient_flags() {
        let tree = HelpTree::build(
            listing(json!([
                {"type": "package-libraries", "name": "SutLibraries", "libraries": [
                    {"type": "libraries", "name": "Extra", "is-generic": false, "is-default": true, "classes": [
                        {"type": "class", "name": "Codec", "functions": []}
                    ]}
                ]}
            ])),
            BuildMode::default(),
        );
        let group = tree.find("SutLibraries/Extra").unwrap();
        assert_eq!(tree.node(group).label(), "Extra (extra)");
        let class = tree.node(tree.find("SutLibraries/Extra/Codec").unwrap());
        assert!(class.is_default);
        assert!(!class.is_generic);
    }

    #[test]
    fn empty_listing_builds_empty_tree() {
        let tree = HelpTree::build(Vec::new(), BuildMode::default());
        assert!(tree.is_empty());
        assert!(tree.walk().is_empty());
    }

    #[test]
    fn walk_is_depth_first_in_listing_order() {
        let tree = HelpTree::build(sample(), BuildMode::default());
        let names: Vec<_> = tree
            .walk()
            .into_iter()
            .map(|(depth, id)| (depth, tree.node(id).name().to_string()))
            .collect();
        assert_eq!(
            names,
            vec![
                (0, "TestLibrary".to_string()),
                (1, "TestExecutor".to_string()),
                (2, "Step".to_string()),
                (3, "__init__".to_string()),
                (3, "setEnabled".to_string()),
                (2, "wait".to_string()),
            ]
        );
    }
}
