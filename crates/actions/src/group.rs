//! A single menu's or toolbar's worth of elements.
//!
//! Groups can absorb other groups ([`ActionGroup::merge`]) and give their
//! elements back ([`ActionGroup::unmerge`]). Where merged elements land is
//! governed by the merge point, see [`ActionGroup::merge_point`].

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::element::{Action, EmbeddedControl, InteractiveElement, SubMenu};
use crate::render::{MenuEntry, RenderedMenu, RenderedToolbar, ToolbarEntry};


static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of an [`ActionGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u64);

impl GroupId {
	fn next() -> Self {
		Self(NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for GroupId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "group#{}", self.0)
	}
}

/// A group's merge point, shared with every group it is merged into so they
/// see later [`ActionGroup::set_merge_point`] calls.
type MergeLocation = Rc<Cell<Option<usize>>>;

/// Bookkeeping for a group currently merged into another one.
///
/// Holds no reference to the source group itself, only its merge point. The
/// break flag is captured at merge time so unmerging undoes exactly that.
#[derive(Debug, Clone)]
struct MergedSource {
	group: GroupId,
	merge_location: MergeLocation,
	break_after: bool,
}

/// Ordered, duplicate-free collection of interactive elements.
pub struct ActionGroup {
	id: GroupId,
	name: String,
	title: String,
	items: Vec<InteractiveElement>,
	merge_location: MergeLocation,
	break_after: bool,
	break_count: Option<u32>,
	merged_sources: Vec<MergedSource>,
}

impl ActionGroup {
	/// Creates an empty group. The title defaults to the name.
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			id: GroupId::next(),
			title: name.clone(),
			name,
			items: Vec::new(),
			merge_location: Rc::new(Cell::new(None)),
			break_after: false,
			break_count: None,
			merged_sources: Vec::new(),
		}
	}

	pub fn id(&self) -> GroupId {
		self.id
	}

	/// Lookup key of this group inside an [`ActionGroupList`](crate::ActionGroupList).
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Text shown on the menu bar entry or toolbar handle.
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Changes the displayed title. The lookup name is unaffected.
	pub fn set_title(&mut self, title: impl Into<String>) {
		self.title = title.into();
	}

	pub fn items(&self) -> &[InteractiveElement] {
		&self.items
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn contains(&self, element: &InteractiveElement) -> bool {
		self.position(element).is_some()
	}

	/// Index of `element`, compared by identity.
	pub fn position(&self, element: &InteractiveElement) -> Option<usize> {
		self.items.iter().position(|item| item == element)
	}

	/// Appends `element`. An element already present is moved to the end.
	pub fn add(&mut self, element: impl Into<InteractiveElement>) {
		let element = element.into();
		self.remove(&element);
		self.items.push(element);
	}

	/// Inserts `element` at `position`, clamped to the current length.
	///
	/// An element already present is removed first, so `position` refers to
	/// the list without it.
	pub fn insert(&mut self, position: usize, element: impl Into<InteractiveElement>) {
		let element = element.into();
		self.remove(&element);
		let at = position.min(self.items.len());
		self.items.insert(at, element);
	}

	/// Appends every element in order.
	pub fn add_all<I>(&mut self, elements: I)
	where
		I: IntoIterator,
		I::Item: Into<InteractiveElement>,
	{
		for element in elements {
			self.add(element);
		}
	}

	/// Inserts the elements contiguously starting at `position`.
	pub fn insert_all<I>(&mut self, position: usize, elements: I)
	where
		I: IntoIterator,
		I::Item: Into<InteractiveElement>,
	{
		let mut at = position;
		for element in elements {
			self.insert(at, element);
			at = (at + 1).min(self.items.len());
		}
	}

	/// Appends a fresh separator and returns it.
	pub fn add_separator(&mut self) -> Rc<Action> {
		let separator = Action::separator().shared();
		self.add(&separator);
		separator
	}

	/// Inserts a fresh separator at `position` and returns it.
	pub fn insert_separator(&mut self, position: usize) -> Rc<Action> {
		let separator = Action::separator().shared();
		self.insert(position, &separator);
		separator
	}

	/// Appends a sub-menu reference.
	pub fn add_submenu(&mut self, menu: &Rc<SubMenu>) {
		self.add(menu);
	}

	/// Appends an embedded control.
	pub fn add_control(&mut self, control: &Rc<EmbeddedControl>) {
		self.add(control);
	}

	/// Removes `element`. Returns whether it was present.
	pub fn remove(&mut self, element: &InteractiveElement) -> bool {
		match self.position(element) {
			Some(index) => {
				self.items.remove(index);
				true
			}
			None => false,
		}
	}

	/// Removes every listed element that is present.
	pub fn remove_all<'a>(&mut self, elements: impl IntoIterator<Item = &'a InteractiveElement>) {
		for element in elements {
			self.remove(element);
		}
	}

	/// Records the current end of the list as the insertion point for
	/// groups merged in later.
	pub fn set_merge_point(&mut self) {
		self.merge_location.set(Some(self.items.len()));
	}

	/// The insertion point this group itself declared, if any.
	pub fn own_merge_point(&self) -> Option<usize> {
		self.merge_location.get()
	}

	/// Effective insertion point for the next merge.
	///
	/// This is the largest of this group's own merge point and the current
	/// merge points of every group merged into it, including points those
	/// groups set after being merged. `None` means merged elements are
	/// appended.
	pub fn merge_point(&self) -> Option<usize> {
		self.merged_sources
			.iter()
			.filter_map(|source| source.merge_location.get())
			.chain(self.merge_location.get())
			.max()
	}

	/// Declares that a toolbar break follows this group.
	pub fn set_break_after(&mut self, break_after: bool) {
		self.break_after = break_after;
	}

	/// True when this group declared a break or any merged group did.
	pub fn breaks_after(&self) -> bool {
		self.break_after || self.break_count.is_some_and(|count| count > 0)
	}

	/// Ids of the groups currently merged into this one, in merge order.
	pub fn merged_groups(&self) -> impl Iterator<Item = GroupId> + '_ {
		self.merged_sources.iter().map(|source| source.group)
	}

	pub fn is_merged(&self, other: GroupId) -> bool {
		self.merged_sources.iter().any(|source| source.group == other)
	}

	/// Merges the elements of `other` into this group.
	///
	/// Elements already present are skipped. The rest are inserted at the
	/// effective merge point, keeping their relative order, or appended when
	/// no merge point exists. Merging a group twice only adds whatever it
	/// gained since the first merge.
	pub fn merge(&mut self, other: &ActionGroup) {
		if other.id == self.id {
			return;
		}

		let point = self.merge_point();
		let mut offset = 0;
		for element in &other.items {
			if self.contains(element) {
				continue;
			}
			match point {
				Some(point) => {
					let at = (point + offset).min(self.items.len());
					self.items.insert(at, element.clone());
				}
				None => self.items.push(element.clone()),
			}
			offset += 1;
		}

		let break_after = other.breaks_after();
		let source = MergedSource {
			group: other.id,
			merge_location: Rc::clone(&other.merge_location),
			break_after,
		};
		let previous = match self.merged_sources.iter_mut().find(|s| s.group == other.id) {
			Some(existing) => Some(std::mem::replace(existing, source).break_after),
			None => {
				self.merged_sources.push(source);
				None
			}
		};
		match (previous, break_after) {
			(None | Some(false), true) => self.increment_breaks(),
			(Some(true), false) => self.decrement_breaks(),
			_ => {}
		}

		tracing::trace!(
			group = %self.name,
			source = %other.id,
			added = offset,
			point = ?point,
			"merged action group"
		);
	}

	/// Removes the elements of `other` from this group.
	///
	/// Elements not present are skipped, so unmerging twice is harmless.
	pub fn unmerge(&mut self, other: &ActionGroup) {
		if other.id == self.id {
			return;
		}

		let before = self.items.len();
		self.items.retain(|item| !other.items.contains(item));

		if let Some(index) = self.merged_sources.iter().position(|s| s.group == other.id) {
			let source = self.merged_sources.remove(index);
			if source.break_after {
				self.decrement_breaks();
			}
		}

		tracing::trace!(
			group = %self.name,
			source = %other.id,
			removed = before - self.items.len(),
			"unmerged action group"
		);
	}

	fn increment_breaks(&mut self) {
		self.break_count = Some(self.break_count.map_or(1, |count| count + 1));
	}

	fn decrement_breaks(&mut self) {
		self.break_count = match self.break_count {
			Some(count) if count > 1 => Some(count - 1),
			_ => None,
		};
	}

	/// Projects the group into a drop-down menu; `None` when empty.
	///
	/// Embedded controls are skipped.
	pub fn render_menu(&self) -> Option<RenderedMenu> {
		if self.items.is_empty() {
			return None;
		}
		Some(RenderedMenu {
			title: self.title.clone(),
			entries: self.items.iter().filter_map(MenuEntry::from_element).collect(),
		})
	}

	/// Projects the group into a toolbar. Sub-menus are skipped and an empty
	/// group yields a hidden toolbar.
	pub fn render_toolbar(&self) -> RenderedToolbar {
		RenderedToolbar {
			title: self.title.clone(),
			entries: self.items.iter().filter_map(ToolbarEntry::from_element).collect(),
			visible: !self.items.is_empty(),
			break_after: self.breaks_after(),
		}
	}
}

impl fmt::Debug for ActionGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActionGroup")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("items", &self.items)
			.field("merge_point", &self.merge_point())
			.field("breaks_after", &self.breaks_after())
			.finish()
	}
}
