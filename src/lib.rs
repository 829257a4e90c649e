//! snipdoc — help tree and code-snippet templates for the test assistant.
//!
//! A listing of API descriptors (packages, classes, methods, functions) is
//! built into a [`HelpTree`]. Each node renders a [`Snippet`] that the test
//! editor inserts on drop, and a [`HelpPage`] for the documentation pane.

pub mod assistant;
pub mod config;
pub mod docstring;
pub mod error;
pub mod help;
pub mod model;
pub mod render;
pub mod snippet;
pub mod templates;
pub mod tree;

pub use assistant::{Assistant, ConnectionState, DragPayload};
pub use config::Config;
pub use error::{Error, Result};
pub use help::HelpPage;
pub use model::{Descriptor, Kind};
pub use snippet::Snippet;
pub use templates::{DefaultTemplates, TemplateProvider};
pub use tree::{BuildMode, HelpTree, NodeId};
