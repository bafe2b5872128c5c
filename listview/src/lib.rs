//! A headless recycling list engine.
//!
//! For scroll snapping (nearest-item settling, smooth `move_to`), see the `listview-snap` crate.
//!
//! This crate keeps a small pool of reusable item views covering only the visible part of a
//! large (or infinite, wraparound) ordered collection: it scans the visible row range for the
//! current scroll offset, recycles views as the viewport moves, and re-indexes the views that
//! are already on screen when records are inserted or removed, without a full rebuild.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - scroll geometry and physics via [`ScrollPosition`] (or use the plain [`ScrollState`])
//! - view instances via an [`ItemViewFactory`], each implementing [`ItemView`]
//! - a per-frame call to [`ListView::tick`]
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod fold;
mod host;
mod list_view;
mod options;
mod pool;
mod record;
mod state;
mod store;
mod types;


pub use fold::fold_index;
pub use host::{ItemView, ItemViewFactory, ScrollPosition};
pub use list_view::ListView;
pub use options::ListViewOptions;
pub use pool::{ItemViewPool, ViewHandle};
pub use record::Record;
pub use state::ScrollState;
pub use store::DataStore;
pub use types::{Direction, VisibleItem, VisibleWindow};
