//! Action model for mergeable menus and toolbars.
//!
//! An [`ActionGroup`] is the content of one menu or one toolbar. An
//! [`ActionGroupList`] is a full set of them keyed by name. Participants each
//! build their own lists; a host merges one participant's lists into its own
//! and later unmerges them again without disturbing anything else.
//!
//! The model is toolkit agnostic. Rendering produces plain data
//! ([`RenderedMenu`], [`RenderedToolbar`]) for a backend to display.

pub mod element;
pub mod group;
pub mod list;
pub mod render;

pub use element::{Action, ElementId, ElementKind, EmbeddedControl, InteractiveElement, SubMenu};
pub use group::{ActionGroup, GroupId};
pub use list::ActionGroupList;
pub use render::{ActionView, MenuEntry, RenderedMenu, RenderedPopup, RenderedToolbar, ToolbarEntry};
