//! Plain-data projections of action groups.
//!
//! These are what a toolkit backend consumes. They hold snapshots, not
//! handles, so they can be regenerated at any time and compared in tests.

use crate::element::{Action, ElementId, InteractiveElement};

/// Snapshot of a command as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
	pub id: ElementId,
	pub label: String,
	pub command: Option<String>,
	pub shortcut: Option<String>,
	pub enabled: bool,
	pub checked: Option<bool>,
}

impl From<&Action> for ActionView {
	fn from(action: &Action) -> Self {
		Self {
			id: action.id(),
			label: action.label(),
			command: action.command().map(str::to_owned),
			shortcut: action.shortcut().map(str::to_owned),
			enabled: action.is_enabled(),
			checked: action.checked(),
		}
	}
}

/// One line of a rendered menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
	Action(ActionView),
	Separator,
	SubMenu { id: ElementId, title: String },
}

impl MenuEntry {
	/// Projects an element into a menu line; controls have no menu form.
	pub fn from_element(element: &InteractiveElement) -> Option<Self> {
		match element {
			InteractiveElement::Action(action) if action.is_separator() => Some(Self::Separator),
			InteractiveElement::Action(action) => Some(Self::Action(ActionView::from(&**action))),
			InteractiveElement::SubMenu(menu) => Some(Self::SubMenu {
				id: menu.id(),
				title: menu.title().to_owned(),
			}),
			InteractiveElement::Control(_) => None,
		}
	}
}

/// A titled drop-down menu. Never empty when produced by a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMenu {
	pub title: String,
	pub entries: Vec<MenuEntry>,
}

/// A nested popup menu: one sub-menu per non-empty group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPopup {
	pub title: String,
	pub menus: Vec<RenderedMenu>,
}

/// One slot of a rendered toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarEntry {
	Action(ActionView),
	Separator,
	Control { id: ElementId, name: String },
}

impl ToolbarEntry {
	/// Projects an element into a toolbar slot; sub-menus have no toolbar form.
	pub fn from_element(element: &InteractiveElement) -> Option<Self> {
		match element {
			InteractiveElement::Action(action) if action.is_separator() => Some(Self::Separator),
			InteractiveElement::Action(action) => Some(Self::Action(ActionView::from(&**action))),
			InteractiveElement::Control(control) => Some(Self::Control {
				id: control.id(),
				name: control.name().to_owned(),
			}),
			InteractiveElement::SubMenu(_) => None,
		}
	}
}

/// A titled toolbar. Hidden when its group has no items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedToolbar {
	pub title: String,
	pub entries: Vec<ToolbarEntry>,
	pub visible: bool,
	pub break_after: bool,
}
