//! fOS Bind
//!
//! Binds small behaviors ("components") to elements of a markup tree by id
//! and class name, and keeps a scope-aware index of the bound elements in
//! sync while the tree is built, searched and mutated.
//!
//! # Example
//! ```
//! use fos_bind::{Document, Registry};
//!
//! let mut registry = Registry::new();
//! registry.bind("list").bind("item");
//!
//! let mut doc = Document::parse(registry, r#"<ul class="list"><li class="item">one</li></ul>"#)?;
//! let list = doc.containers()[1];
//! doc.append_markup(list, r#"<li class="item">two</li>"#)?;
//! assert_eq!(doc.collect(list, "item").len(), 2);
//! assert_eq!(doc.collect(doc.root(), "item").len(), 2);
//! # Ok::<(), fos_bind::BindError>(())
//! ```

mod builder;
mod component;
mod config;
mod container;
mod cursor;
mod document;
mod effects;
mod error;
mod generation;
mod moves;
mod names;
mod registry;
mod update;

pub use component::{Behavior, Binding, BindingPropagation, ComponentId, DefaultBehavior, RunContext};
pub use config::Config;
pub use container::ContainerId;
pub use cursor::{Cursor, ScopeIter};
pub use document::Document;
pub use effects::{FadeHandle, Transition};
pub use error::{BindError, BindResult};
pub use generation::Generation;
pub use names::Names;
pub use registry::{Constructor, Registry};
pub use update::Update;

pub use fos_dom as dom;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
