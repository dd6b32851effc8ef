//! Interactive JSON grid viewer: renders any JSON value as a nested,
//! collapsible table with stable per-pass container identities, a path
//! expression on every leaf cell, hover/lock path display, and debounced
//! search with match highlighting.

pub mod app;
pub mod classify;
pub mod config;
pub mod dom;
pub mod editor;
pub mod error;
pub mod grid;
pub mod interact;
pub mod path;
pub mod search;
pub mod state;
pub mod types;

pub use crate::app::GridApp;
pub use crate::config::{Theme, ThemeStore, THEME_KEY};
pub use crate::editor::{BufferEditor, Clipboard, MemoryClipboard, SystemClipboard, TextEditor};
pub use crate::error::{GridError, Result};
pub use crate::grid::RenderSession;
pub use crate::interact::{CellBinding, InteractionController, DEFAULT_PATH_MESSAGE};
pub use crate::path::{PathExpression, PathSegment, ROOT_TOKEN};
pub use crate::search::{perform_search, SearchScheduler, SEARCH_DEBOUNCE};
pub use crate::state::AppState;
pub use crate::types::{
    ContainerKind, ContainerNode, ElementCells, LeafNode, RenderNode, RenderRow,
};
