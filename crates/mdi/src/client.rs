//! Clients: focusable participants that contribute menus and toolbars.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use mergebar_actions::{Action, ActionGroupList};

use crate::host::HostId;

/// Identifier of a client inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "client#{}", self.0)
	}
}

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a [`Container`](crate::Container).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

impl ContainerId {
	pub(crate) fn next() -> Self {
		Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
	}
}

/// Overridable client behavior.
///
/// Every method has a default, so implementors only write the hooks they need.
pub trait ClientBehavior {
	/// Veto point of the two-phase close. Return false to keep the client,
	/// e.g. while it holds unsaved changes.
	fn can_close(&mut self) -> bool {
		true
	}

	/// Called once each time a host merges this client.
	fn on_merged(&mut self, _host: HostId) {}

	/// Called once each time a host unmerges this client.
	fn on_unmerged(&mut self, _host: HostId) {}
}

/// Behavior used when none is supplied: always closable, no hooks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassiveBehavior;

impl ClientBehavior for PassiveBehavior {}

/// Keyboard-reachable action set of a client's own view.
///
/// While a client is merged its actions are registered here, so shortcuts
/// keep working even when the host suppresses chrome updates.
#[derive(Debug, Default)]
pub struct ShortcutSurface {
	actions: Vec<Rc<Action>>,
}

impl ShortcutSurface {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `action` once. Returns false if it was already registered.
	pub fn register(&mut self, action: &Rc<Action>) -> bool {
		if self.contains(action) {
			return false;
		}
		self.actions.push(Rc::clone(action));
		true
	}

	/// Removes `action`. Returns false if it was not registered.
	pub fn unregister(&mut self, action: &Rc<Action>) -> bool {
		let before = self.actions.len();
		self.actions.retain(|a| !Rc::ptr_eq(a, action));
		before != self.actions.len()
	}

	pub fn contains(&self, action: &Rc<Action>) -> bool {
		self.actions.iter().any(|a| Rc::ptr_eq(a, action))
	}

	pub fn actions(&self) -> &[Rc<Action>] {
		&self.actions
	}

	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}

	/// The enabled action bound to `shortcut`, if any.
	pub fn lookup(&self, shortcut: &str) -> Option<&Rc<Action>> {
		self.actions
			.iter()
			.find(|a| a.is_enabled() && a.shortcut().is_some_and(|s| s.eq_ignore_ascii_case(shortcut)))
	}
}

/// A focusable unit of content, such as a document view.
///
/// Clients own their menu and toolbar contributions. A host merges them into
/// its own lists while the client is focused.
pub struct Client {
	display_name: String,
	file_identity: Option<String>,
	/// Menu contributions, merged into the host's menu bar.
	pub menus: ActionGroupList,
	/// Toolbar contributions, merged into the host's toolbars.
	pub toolbars: ActionGroupList,
	pub(crate) owner: Option<ContainerId>,
	pub(crate) surface: Option<ShortcutSurface>,
	pub(crate) behavior: Box<dyn ClientBehavior>,
}

impl Client {
	/// Creates a client with passive behavior and no shortcut surface.
	pub fn new(display_name: impl Into<String>) -> Self {
		Self {
			display_name: display_name.into(),
			file_identity: None,
			menus: ActionGroupList::new(),
			toolbars: ActionGroupList::new(),
			owner: None,
			surface: None,
			behavior: Box::new(PassiveBehavior),
		}
	}

	/// Builder: the file this client shows.
	pub fn with_file_identity(mut self, file: impl Into<String>) -> Self {
		self.file_identity = Some(file.into());
		self
	}

	/// Builder: replaces the default behavior.
	pub fn with_behavior(mut self, behavior: impl ClientBehavior + 'static) -> Self {
		self.behavior = Box::new(behavior);
		self
	}

	/// Builder: gives the client a shortcut surface.
	pub fn with_surface(mut self) -> Self {
		self.surface = Some(ShortcutSurface::new());
		self
	}

	pub fn display_name(&self) -> &str {
		&self.display_name
	}

	pub fn set_display_name(&mut self, name: impl Into<String>) {
		self.display_name = name.into();
	}

	pub fn file_identity(&self) -> Option<&str> {
		self.file_identity.as_deref()
	}

	pub fn set_file_identity(&mut self, file: Option<String>) {
		self.file_identity = file;
	}

	/// The container holding this client, if it has been inserted.
	pub fn owner(&self) -> Option<ContainerId> {
		self.owner
	}

	pub fn surface(&self) -> Option<&ShortcutSurface> {
		self.surface.as_ref()
	}

	/// First phase of closing: asks [`ClientBehavior::can_close`].
	///
	/// Returns whether the client agreed. Destroying it is up to the owner;
	/// [`Container::request_close`](crate::Container::request_close) drops
	/// the client as soon as this succeeds.
	pub fn request_close(&mut self) -> bool {
		let agreed = self.behavior.can_close();
		if !agreed {
			tracing::debug!(client = %self.display_name, "close vetoed");
		}
		agreed
	}
}

impl fmt::Debug for Client {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Client")
			.field("display_name", &self.display_name)
			.field("file_identity", &self.file_identity)
			.field("owner", &self.owner)
			.field("menus", &self.menus.len())
			.field("toolbars", &self.toolbars.len())
			.finish_non_exhaustive()
	}
}
