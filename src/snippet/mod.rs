//! Snippet template engine — what gets inserted when a help node is dropped
//! into the test editor.
//!
//! The rule set is a table keyed by `(kind, parent name, node name)` that
//! selects a [`Strategy`]; each strategy is one rendering form. Snippets are
//! recomputed on every call because the test templates can change at runtime.

pub mod args;

use crate::model::Kind;
use crate::templates::TemplateProvider;
use crate::tree::{HelpTree, Node, NodeId};
use serde::Serialize;

pub use args::render_args;

/// Rendered snippet slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    /// Inserted into the test definition.
    pub definition: String,
    /// Inserted into the test execution; often empty.
    pub execution: String,
    /// Only the executor's `TestCase` class fills this slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_definition: Option<String>,
}

impl Snippet {
    fn new(definition: String, execution: String) -> Self {
        Snippet {
            definition,
            execution,
            unit_definition: None,
        }
    }

    fn both(form: String) -> Self {
        Snippet::new(form.clone(), form)
    }

    fn all(form: String) -> Self {
        Snippet {
            definition: form.clone(),
            execution: form.clone(),
            unit_definition: Some(form),
        }
    }
}

/// Rendering form selected by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Opaque test templates from the [`TemplateProvider`].
    ProvidedTemplates,
    /// `Class(self)` in all three slots.
    BareConstructor,
    /// `@obj = Parent.Class(args)` in both slots.
    ScopedConstructor,
    /// `@obj = <qualified parent realname>.Class(args)`.
    QualifiedConstructor,
    /// `self.m(args)`, definition slot only.
    SelfCall,
    /// Step lifecycle methods on `@obj`, the rest as [`Strategy::SelfCall`].
    StepCall,
    /// `Parent(<ctor_arg>).m(args)`, definition slot only.
    SingletonCall { ctor_arg: &'static str },
    /// `@obj.m(args)` in both slots.
    ObjectCall,
    /// `f(args)` for listed names only.
    AllowedCall(&'static [&'static str]),
    /// `Label.f(args)` with a fixed label.
    LabeledCall(&'static str),
    /// `<parent realname>.f(args)`.
    RealnameCall,
    NoSnippet,
}

/// Step methods always called on the step object.
pub const STEP_METHODS: &[&str] = &[
    "setFailed",
    "setPassed",
    "start",
    "setSummary",
    "setDescription",
    "setExpected",
    "setEnabled",
    "setDisabled",
    "getId",
    "isEnabled",
];

const EXECUTOR_FUNCTIONS: &[&str] = &["wait"];

const PROPERTY_FUNCTIONS: &[&str] = &[
    "get",
    "parameter",
    "description",
    "input",
    "output",
    "inputs",
    // `excel` and `outputs` are not listed on their own
    "exceloutputs",
    "setInput",
    "setOutput",
    "agent",
    "agents",
    "shared",
    "running",
];

/// Namespaces whose classes are re-rooted under `Generic` or `Extra`.
const VARIANT_NAMESPACES: &[&str] = &["SutAdapters", "SutLibraries"];

struct Rule {
    kind: Kind,
    parent: &'static str,
    /// `None` matches any node name.
    name: Option<&'static str>,
    strategy: Strategy,
}

const fn rule(kind: Kind, parent: &'static str, name: Option<&'static str>, strategy: Strategy) -> Rule {
    Rule {
        kind,
        parent,
        name,
        strategy,
    }
}

use Kind::{Class, Function, Method};
use Strategy::*;

/// First match wins, so named rules come before wildcards of the same parent.
static RULES: &[Rule] = &[
    // classes
    rule(Class, "TestExecutor", Some("TestCase"), ProvidedTemplates),
    rule(Class, "TestExecutor", Some("BreakPoint"), BareConstructor),
    rule(Class, "TestExecutor", None, NoSnippet),
    rule(Class, "TestReporting", Some("TestCases"), ScopedConstructor),
    rule(Class, "TestReporting", None, NoSnippet),
    rule(Class, "TestValidators", None, ScopedConstructor),
    rule(Class, "TestOperators", None, ScopedConstructor),
    rule(Class, "TestProperties", None, ScopedConstructor),
    rule(Class, "TestTemplates", None, ScopedConstructor),
    rule(Class, "SutAdapter", None, ScopedConstructor),
    rule(Class, "SutLibrary", None, ScopedConstructor),
    rule(Class, "TestManipulators", None, ScopedConstructor),
    rule(Class, "TestInteroperability", None, ScopedConstructor),
    rule(Class, "TestRepositories", None, ScopedConstructor),
    // methods
    rule(Method, "TestCase", None, SelfCall),
    rule(Method, "Step", None, StepCall),
    rule(Method, "Cache", None, SingletonCall { ctor_arg: "" }),
    rule(Method, "Time", None, SingletonCall { ctor_arg: "self" }),
    rule(Method, "Public", None, SingletonCall { ctor_arg: "self" }),
    rule(Method, "Private", None, SingletonCall { ctor_arg: "self" }),
    rule(Method, "Interact", None, SingletonCall { ctor_arg: "self" }),
    rule(Method, "Trace", None, SingletonCall { ctor_arg: "self" }),
    rule(Method, "Test", None, SingletonCall { ctor_arg: "self" }),
    // functions
    rule(Function, "TestExecutor", None, AllowedCall(EXECUTOR_FUNCTIONS)),
    rule(Function, "TestProperties", None, AllowedCall(PROPERTY_FUNCTIONS)),
    rule(Function, "TestTemplates", None, LabeledCall("TestTemplates")),
    rule(Function, "SutAdapter", None, LabeledCall("SutAdapter")),
    rule(Function, "SutLibrary", None, LabeledCall("SutLibrary")),
    rule(Function, "TestRepositories", None, LabeledCall("TestRepositories")),
];

/// Look up the strategy for a node of `kind` named `name` under `parent`.
pub fn strategy_for(kind: Kind, parent: &str, name: &str) -> Strategy {
    RULES
        .iter()
        .find(|r| r.kind == kind && r.parent == parent && r.name.map_or(true, |n| n == name))
        .map(|r| r.strategy)
        .unwrap_or(match kind {
            Class => QualifiedConstructor,
            Method => ObjectCall,
            Function => RealnameCall,
            _ => NoSnippet,
        })
}

/// Render the snippet of `id`, or `None` when the node has none.
pub fn render(tree: &HelpTree, id: NodeId, templates: &dyn TemplateProvider) -> Option<Snippet> {
    let node = tree.node(id);
    if node.kind.is_grouping() {
        return None;
    }
    let Some(parent) = tree.parent(id) else {
        tracing::warn!(name = node.name(), "detached {} has no snippet", node.kind);
        return None;
    };

    match strategy_for(node.kind, parent.name(), node.name()) {
        NoSnippet => None,
        ProvidedTemplates => Some(Snippet {
            definition: templates.test_definition(),
            execution: templates.test_execution(),
            unit_definition: Some(templates.test_unit_definition()),
        }),
        BareConstructor => Some(Snippet::all(format!("{}(self)", node.name()))),
        ScopedConstructor => {
            let args = constructor_args(tree, id);
            Some(Snippet::both(format!(
                "@obj = {}.{}({})",
                parent.name(),
                node.name(),
                args
            )))
        }
        QualifiedConstructor => qualified_constructor(tree, id, parent),
        strategy => call_snippet(strategy, node, parent),
    }
}

/// Description shown for a node: constructed classes show their
/// constructor's text, empty when there is none.
pub fn description(tree: &HelpTree, id: NodeId) -> String {
    let node = tree.node(id);
    let own = || node.data.desc.clone().unwrap_or_default();
    if node.kind != Class {
        return own();
    }
    let Some(parent) = tree.parent(id) else {
        return own();
    };
    match strategy_for(Class, parent.name(), node.name()) {
        ScopedConstructor | QualifiedConstructor => tree
            .constructor(id)
            .and_then(|ctor| ctor.data.desc.clone())
            .unwrap_or_default(),
        _ => own(),
    }
}

/// Arguments of a class, taken from its constructor.
fn constructor_args(tree: &HelpTree, id: NodeId) -> String {
    let node = tree.node(id);
    match tree.constructor(id) {
        Some(ctor) => {
            let mut doc = node.doc.clone();
            doc.absorb(ctor.data.desc.as_deref().unwrap_or_default());
            render_args(&ctor.data, &doc)
        }
        None => String::new(),
    }
}

fn qualified_constructor(tree: &HelpTree, id: NodeId, parent: &Node) -> Option<Snippet> {
    let node = tree.node(id);
    let Some(realname) = parent.data.realname.as_deref() else {
        tracing::warn!(class = node.name(), parent = parent.name(), "parent has no realname");
        return None;
    };
    let args = constructor_args(tree, id);
    let form = |qualified: &str| format!("@obj = {}.{}({})", qualified, node.name(), args);

    Some(match (node.is_generic, node.is_default) {
        (true, false) => Snippet::both(form(&qualify(realname, "Generic"))),
        (false, true) => Snippet::new(form(&qualify(realname, "Extra")), String::new()),
        _ => Snippet::new(form(realname), String::new()),
    })
}

/// `SutAdapters.SSH` → `SutAdapters.<variant>.SSH`; other names unchanged.
fn qualify(realname: &str, variant: &str) -> String {
    for ns in VARIANT_NAMESPACES {
        if let Some(tail) = realname.strip_prefix(ns).and_then(|r| r.strip_prefix('.')) {
            return format!("{}.{}.{}", ns, variant, tail);
        }
    }
    realname.to_string()
}

fn call(target: &str, name: &str, args: &str, returns: bool) -> String {
    if returns {
        format!("@obj = {}{}({})", target, name, args)
    } else {
        format!("{}{}({})", target, name, args)
    }
}

fn call_snippet(strategy: Strategy, node: &Node, parent: &Node) -> Option<Snippet> {
    let name = node.name();
    let args = render_args(&node.data, &node.doc);
    let returns = node.doc.has_return_value;

    let snippet = match strategy {
        StepCall if STEP_METHODS.contains(&name) => Snippet::both(call("@obj.", name, &args, false)),
        SelfCall | StepCall => Snippet::new(call("self.", name, &args, returns), String::new()),
        SingletonCall { ctor_arg } => {
            let target = format!("{}({}).", parent.name(), ctor_arg);
            Snippet::new(call(&target, name, &args, returns), String::new())
        }
        ObjectCall => Snippet::both(call("@obj.", name, &args, returns)),
        AllowedCall(allowed) if allowed.contains(&name) => Snippet::both(call("", name, &args, false)),
        AllowedCall(_) => return None,
        LabeledCall(label) => Snippet::both(call(&format!("{}.", label), name, &args, returns)),
        RealnameCall => {
            let Some(realname) = parent.data.realname.as_deref() else {
                tracing::warn!(function = name, parent = parent.name(), "parent has no realname");
                return None;
            };
            Snippet::both(call(&format!("{}.", realname), name, &args, returns))
        }
        NoSnippet | ProvidedTemplates | BareConstructor | ScopedConstructor | QualifiedConstructor => {
            return None
        }
    };
    Some(snippet)
}
