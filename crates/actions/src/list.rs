//! Named collection of action groups: a whole menu bar or toolbar set.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::element::Action;
use crate::group::ActionGroup;
use crate::render::{RenderedMenu, RenderedPopup, RenderedToolbar};

#[cfg(test)]
mod tests;

/// Groups keyed by name, kept in first-lookup order.
///
/// Lookups through [`get`](Self::get) never fail: a missing group is created
/// empty. Registering the names up front therefore fixes the order in which
/// menus and toolbars are shown.
///
/// ```ignore
/// menus.get("&File");
/// menus.get("&Edit");
/// menus.get("&Help");
/// ```
#[derive(Debug, Default)]
pub struct ActionGroupList {
	groups: IndexMap<String, ActionGroup>,
}

impl ActionGroupList {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the group called `name`, creating it on first use.
	pub fn get(&mut self, name: &str) -> &mut ActionGroup {
		if !self.groups.contains_key(name) {
			self.groups.insert(name.to_owned(), ActionGroup::new(name));
		}
		&mut self.groups[name]
	}

	/// Read-only lookup that does not create the group.
	pub fn find(&self, name: &str) -> Option<&ActionGroup> {
		self.groups.get(name)
	}

	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.groups.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = &ActionGroup> {
		self.groups.values()
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActionGroup> {
		self.groups.values_mut()
	}

	/// Every non-separator action across all groups, in group order.
	pub fn actions(&self) -> impl Iterator<Item = &Rc<Action>> {
		self.groups
			.values()
			.flat_map(|group| group.items())
			.filter_map(|item| item.as_action())
			.filter(|action| !action.is_separator())
	}

	/// Merges each group of `other` into the same-named group here.
	pub fn merge(&mut self, other: &ActionGroupList) {
		for (name, group) in &other.groups {
			self.get(name).merge(group);
		}
	}

	/// Unmerges each group of `other` from the same-named group here.
	///
	/// Groups left empty are kept so their position is preserved.
	pub fn unmerge(&mut self, other: &ActionGroupList) {
		for (name, group) in &other.groups {
			self.get(name).unmerge(group);
		}
	}

	/// One menu per non-empty group.
	pub fn render_menu_bar(&self) -> Vec<RenderedMenu> {
		self.groups.values().filter_map(ActionGroup::render_menu).collect()
	}

	/// A single popup holding one sub-menu per non-empty group.
	pub fn render_popup(&self, title: impl Into<String>) -> RenderedPopup {
		RenderedPopup {
			title: title.into(),
			menus: self.render_menu_bar(),
		}
	}

	/// One toolbar per group; empty groups come back hidden.
	pub fn render_toolbars(&self) -> Vec<RenderedToolbar> {
		self.groups.values().map(ActionGroup::render_toolbar).collect()
	}
}
