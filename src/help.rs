//! Help page model — what the documentation pane shows for a selected node.

use crate::docstring::{self, DocEntry};
use crate::model::Kind;
use crate::snippet::{self, Snippet};
use crate::templates::TemplateProvider;
use crate::tree::{HelpTree, NodeId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelpPage {
    /// `Parent > Name`
    pub title: String,
    pub label: String,
    pub kind: Kind,
    pub entries: Vec<DocEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<Snippet>,
}

impl HelpPage {
    /// Assemble the page for `id`. The snippet is rendered fresh.
    pub fn for_node(tree: &HelpTree, id: NodeId, templates: &dyn TemplateProvider) -> Self {
        let node = tree.node(id);
        HelpPage {
            title: tree.full_name(id),
            label: node.label(),
            kind: node.kind,
            entries: docstring::entries(&snippet::description(tree, id)),
            snippet: snippet::render(tree, id, templates),
        }
    }
}
