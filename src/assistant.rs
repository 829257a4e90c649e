//! Assistant session — owns the help tree for one panel.
//!
//! Created once by its owner and driven through `load` / `refresh` / `reset`
//! as the server connection comes and goes.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::help::HelpPage;
use crate::model::decode_listing;
use crate::snippet::{self, Snippet};
use crate::templates::{DefaultTemplates, TemplateProvider};
use crate::tree::{BuildMode, HelpTree, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Data handed to the editor when a node is dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub mime: String,
    pub snippet: Snippet,
}

pub struct Assistant<T: TemplateProvider = DefaultTemplates> {
    tree: HelpTree,
    state: ConnectionState,
    mode: BuildMode,
    acronym: String,
    templates: T,
}

impl Assistant<DefaultTemplates> {
    pub fn new(config: Config) -> Self {
        Assistant::with_templates(config.templates, config.mode, config.acronym)
    }
}

impl<T: TemplateProvider> Assistant<T> {
    pub fn with_templates(templates: T, mode: BuildMode, acronym: String) -> Self {
        Assistant {
            tree: HelpTree::new(),
            state: ConnectionState::Disconnected,
            mode,
            acronym,
            templates,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn tree(&self) -> &HelpTree {
        &self.tree
    }

    pub fn templates_mut(&mut self) -> &mut T {
        &mut self.templates
    }

    /// Rebuild the tree from a listing payload.
    ///
    /// A payload that does not decode leaves an empty tree and a
    /// disconnected session; no partial tree is built from it.
    pub fn load(&mut self, payload: &[u8]) {
        match decode_listing(payload) {
            Ok(listing) => {
                self.tree = HelpTree::build(listing, self.mode);
                self.state = ConnectionState::Connected;
                tracing::info!(nodes = self.tree.len(), "assistant loaded");
            }
            Err(e) => {
                tracing::error!("unable to load helper data: {}", e);
                self.tree.clear();
                self.state = ConnectionState::Disconnected;
            }
        }
    }

    pub fn refresh(&mut self, payload: &[u8]) {
        self.tree.clear();
        self.load(payload);
    }

    pub fn reset(&mut self) {
        self.tree.clear();
        self.state = ConnectionState::Disconnected;
    }

    pub fn find(&self, path: &str) -> Result<NodeId> {
        self.tree
            .find(path)
            .ok_or_else(|| Error::NodeNotFound(path.to_string()))
    }

    /// Help page for `id`; `None` once a reload has invalidated the handle.
    pub fn help(&self, id: NodeId) -> Option<HelpPage> {
        self.tree.get(id)?;
        Some(HelpPage::for_node(&self.tree, id, &self.templates))
    }

    pub fn snippet(&self, id: NodeId) -> Option<Snippet> {
        self.tree.get(id)?;
        snippet::render(&self.tree, id, &self.templates)
    }

    /// Build the drag payload for `id`; `None` when it has no snippet or
    /// the handle is stale.
    pub fn drag(&self, id: NodeId) -> Option<DragPayload> {
        let snippet = self.snippet(id)?;
        Some(DragPayload {
            mime: format!("application/x-{}-help-item", self.acronym.to_lowercase()),
            snippet,
        })
    }
}
