//! Focus-driven merging of client menus and toolbars into a shared chrome.
//!
//! - [`Client`]: a focusable participant with its own menus and toolbars.
//! - [`Host`]: owns the merged model and renders it into a [`Chrome`].
//! - [`Container`]: owns clients and merges exactly the focused one.
//!
//! Everything here is single-threaded and synchronous. Invalid requests
//! (unknown clients, repeated focus, double unmerge) are absorbed as no-ops.

pub mod chrome;
pub mod client;
pub mod container;
pub mod context_menu;
pub mod host;

pub use chrome::{Chrome, ChromeRenderer, PlacedToolbar, TextRenderer, ToolbarHandle, ToolbarId};
pub use client::{Client, ClientBehavior, ClientId, ContainerId, PassiveBehavior, ShortcutSurface};
pub use container::Container;
pub use context_menu::{ClientMenu, ClientMenuAction};
pub use host::{Host, HostId};
pub use mergebar_actions as actions;

// Dev-dependencies only the integration tests use.
#[cfg(test)]
use {proptest as _, tracing_subscriber as _};
