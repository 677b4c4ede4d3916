//! The host: owner of the merged, currently displayed chrome model.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use mergebar_actions::{ActionGroup, ActionGroupList};
use mergebar_config::ChromeConfig;

use crate::chrome::{Chrome, ChromeRenderer, PlacedToolbar, ToolbarHandle, ToolbarId};
use crate::client::Client;

static NEXT_HOST_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a [`Host`], passed to client hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostId(pub u64);

impl HostId {
	fn next() -> Self {
		Self(NEXT_HOST_ID.fetch_add(1, Ordering::Relaxed))
	}
}

/// Owns the merged menus and toolbars, usually on behalf of a main window.
///
/// The host's own entries are its base contributions. Clients are merged on
/// top with [`merge_client`](Self::merge_client) and removed again with
/// [`unmerge_client`](Self::unmerge_client). Neither renders; call
/// [`render`](Self::render) once after a batch of changes.
pub struct Host {
	id: HostId,
	menus: ActionGroupList,
	toolbars: ActionGroupList,
	rendering_enabled: bool,
	toolbar_handles: Vec<ToolbarHandle>,
	next_toolbar_id: u64,
	chrome: Chrome,
	renderer: Option<Box<dyn ChromeRenderer>>,
}

impl Host {
	pub fn new() -> Self {
		Self {
			id: HostId::next(),
			menus: ActionGroupList::new(),
			toolbars: ActionGroupList::new(),
			rendering_enabled: true,
			toolbar_handles: Vec::new(),
			next_toolbar_id: 1,
			chrome: Chrome::default(),
			renderer: None,
		}
	}

	/// Creates a host whose base menus and toolbars follow `config`.
	pub fn from_config(config: &ChromeConfig) -> Self {
		let mut host = Self::new();
		for menu in &config.menus {
			host.menus.get(menu);
		}
		for toolbar in &config.toolbars {
			host.toolbars.get(&toolbar.name).set_break_after(toolbar.break_after);
		}
		host.rendering_enabled = config.update_chrome();
		host
	}

	/// Builder: installs the backend that receives every render.
	pub fn with_renderer(mut self, renderer: impl ChromeRenderer + 'static) -> Self {
		self.renderer = Some(Box::new(renderer));
		self
	}

	pub fn set_renderer(&mut self, renderer: Option<Box<dyn ChromeRenderer>>) {
		self.renderer = renderer;
	}

	pub fn id(&self) -> HostId {
		self.id
	}

	/// Merged menus: base contributions plus merged clients.
	pub fn menus(&self) -> &ActionGroupList {
		&self.menus
	}

	/// Merged toolbars: base contributions plus merged clients.
	pub fn toolbars(&self) -> &ActionGroupList {
		&self.toolbars
	}

	/// Mutable access for declaring the host's own base menus.
	pub fn menus_mut(&mut self) -> &mut ActionGroupList {
		&mut self.menus
	}

	/// Mutable access for declaring the host's own base toolbars.
	pub fn toolbars_mut(&mut self) -> &mut ActionGroupList {
		&mut self.toolbars
	}

	pub fn is_rendering_enabled(&self) -> bool {
		self.rendering_enabled
	}

	/// While disabled, merges leave the chrome model alone and renders are
	/// skipped. Client hooks and shortcut registration still happen.
	///
	/// Toggle this only while no client is merged, or the model will keep
	/// entries that are never unmerged.
	pub fn set_rendering_enabled(&mut self, enabled: bool) {
		self.rendering_enabled = enabled;
	}

	/// The chrome produced by the last render.
	pub fn chrome(&self) -> &Chrome {
		&self.chrome
	}

	/// Toolbar handles created so far, in creation order.
	pub fn toolbar_handles(&self) -> &[ToolbarHandle] {
		&self.toolbar_handles
	}

	/// Merges the client's menus and toolbars and announces it to the client.
	pub fn merge_client(&mut self, client: &mut Client) {
		if self.rendering_enabled {
			self.menus.merge(&client.menus);
			self.toolbars.merge(&client.toolbars);
		}
		client.behavior.on_merged(self.id);

		if let Some(surface) = client.surface.as_mut() {
			for action in client.menus.actions().chain(client.toolbars.actions()) {
				surface.register(action);
			}
		}

		tracing::debug!(
			host = self.id.0,
			client = client.display_name(),
			model = self.rendering_enabled,
			"merged client"
		);
	}

	/// Reverses [`merge_client`](Self::merge_client).
	pub fn unmerge_client(&mut self, client: &mut Client) {
		if self.rendering_enabled {
			self.menus.unmerge(&client.menus);
			self.toolbars.unmerge(&client.toolbars);
		}
		client.behavior.on_unmerged(self.id);

		if let Some(surface) = client.surface.as_mut() {
			for action in client.menus.actions().chain(client.toolbars.actions()) {
				surface.unregister(action);
			}
		}

		tracing::debug!(
			host = self.id.0,
			client = client.display_name(),
			model = self.rendering_enabled,
			"unmerged client"
		);
	}

	/// Regenerates the chrome from the merged model and presents it.
	///
	/// Skipped while rendering is disabled; the previous chrome is returned.
	pub fn render(&mut self) -> &Chrome {
		if !self.rendering_enabled {
			tracing::trace!(host = self.id.0, "render skipped, chrome updates disabled");
			return &self.chrome;
		}

		let menu_bar = self.menus.render_menu_bar();
		let mut toolbars = Vec::with_capacity(self.toolbars.len());
		for group in self.toolbars.iter() {
			let handle = handle_for(&mut self.toolbar_handles, &mut self.next_toolbar_id, group);
			toolbars.push(PlacedToolbar {
				handle,
				toolbar: group.render_toolbar(),
			});
		}

		self.chrome = Chrome {
			generation: self.chrome.generation + 1,
			menu_bar,
			toolbars,
		};
		tracing::debug!(
			host = self.id.0,
			generation = self.chrome.generation,
			menus = self.chrome.menu_bar.len(),
			toolbars = self.chrome.visible_toolbars().count(),
			"rendered chrome"
		);

		if let Some(renderer) = self.renderer.as_mut() {
			renderer.present(&self.chrome);
		}
		&self.chrome
	}
}

fn handle_for(handles: &mut Vec<ToolbarHandle>, next_id: &mut u64, group: &ActionGroup) -> ToolbarHandle {
	if let Some(handle) = handles.iter().find(|h| h.name == group.name()) {
		return handle.clone();
	}
	let handle = ToolbarHandle {
		id: ToolbarId(*next_id),
		name: group.name().to_owned(),
		break_after: group.breaks_after(),
	};
	*next_id += 1;
	tracing::trace!(toolbar = %handle.name, id = handle.id.0, "created toolbar handle");
	handles.push(handle.clone());
	handle
}

impl Default for Host {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Host {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Host")
			.field("id", &self.id)
			.field("menus", &self.menus)
			.field("toolbars", &self.toolbars)
			.field("rendering_enabled", &self.rendering_enabled)
			.field("toolbar_handles", &self.toolbar_handles)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	use mergebar_actions::{Action, EmbeddedControl, SubMenu};
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::client::ClientBehavior;

	#[derive(Default)]
	struct Counts {
		merged: Cell<u32>,
		unmerged: Cell<u32>,
	}

	struct Counting(Rc<Counts>);

	impl ClientBehavior for Counting {
		fn on_merged(&mut self, _host: HostId) {
			self.0.merged.set(self.0.merged.get() + 1);
		}

		fn on_unmerged(&mut self, _host: HostId) {
			self.0.unmerged.set(self.0.unmerged.get() + 1);
		}
	}

	struct Recording(Rc<RefCell<Vec<Chrome>>>);

	impl ChromeRenderer for Recording {
		fn present(&mut self, chrome: &Chrome) {
			self.0.borrow_mut().push(chrome.clone());
		}
	}

	fn editor_client(counts: &Rc<Counts>) -> Client {
		let mut client = Client::new("main.rs")
			.with_behavior(Counting(Rc::clone(counts)))
			.with_surface();
		client.menus.get("&Edit").add(Action::new("Undo").with_shortcut("Ctrl+Z"));
		client.toolbars.get("Edit").add(Action::new("Cut"));
		client
	}

	#[test]
	fn merge_then_unmerge_restores_base() {
		let mut host = Host::new();
		host.menus_mut().get("&File").add(Action::new("Quit"));
		let counts = Rc::new(Counts::default());
		let mut client = editor_client(&counts);

		host.merge_client(&mut client);
		assert_eq!(host.render().menu_bar.len(), 2);

		host.unmerge_client(&mut client);
		let chrome = host.render();
		assert_eq!(chrome.menu_bar.len(), 1);
		assert_eq!(chrome.menu_labels("&File"), ["Quit"]);
		assert_eq!((counts.merged.get(), counts.unmerged.get()), (1, 1));
	}

	#[test]
	fn merge_does_not_render() {
		let mut host = Host::new();
		let counts = Rc::new(Counts::default());
		let mut client = editor_client(&counts);

		host.merge_client(&mut client);
		assert_eq!(host.chrome().generation, 0);
		assert!(host.chrome().menu_bar.is_empty());
		assert_eq!(host.render().generation, 1);
	}

	#[test]
	fn disabled_rendering_still_fires_hooks_and_surface() {
		let mut host = Host::new();
		host.set_rendering_enabled(false);
		let counts = Rc::new(Counts::default());
		let mut client = editor_client(&counts);

		host.merge_client(&mut client);
		assert_eq!(counts.merged.get(), 1);
		assert!(host.menus().is_empty());
		assert_eq!(client.surface().map(|s| s.actions().len()), Some(2));
		assert!(client.surface().and_then(|s| s.lookup("Ctrl+Z")).is_some());
		assert_eq!(host.render().generation, 0);

		host.unmerge_client(&mut client);
		assert_eq!(counts.unmerged.get(), 1);
		assert!(client.surface().is_some_and(|s| s.is_empty()));
	}

	#[test]
	fn toolbar_handles_are_created_once_and_reused() {
		let mut host = Host::new();
		host.toolbars_mut().get("File").set_break_after(true);
		host.toolbars_mut().get("File").add(Action::new("New"));
		host.toolbars_mut().get("Search");

		host.render();
		host.render();
		let handles = host.toolbar_handles();
		assert_eq!(handles.len(), 2);
		assert_eq!(handles[0].name, "File");
		assert!(handles[0].break_after);
		assert!(!handles[1].break_after);

		let chrome = host.chrome();
		assert!(chrome.toolbar("File").is_some_and(|t| t.visible));
		assert!(chrome.toolbar("Search").is_some_and(|t| !t.visible));
		assert_eq!(chrome.visible_toolbars().count(), 1);
	}

	#[test]
	fn render_hands_chrome_to_renderer() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let mut host = Host::new().with_renderer(Recording(Rc::clone(&seen)));
		let group = host.menus_mut().get("&View");
		group.add_submenu(&SubMenu::new("Zoom").shared());
		host.toolbars_mut().get("View").add_control(&EmbeddedControl::new("zoom-level").shared());

		host.render();
		host.render();
		let seen = seen.borrow();
		assert_eq!(seen.len(), 2);
		assert_eq!(seen[0].menu_bar, seen[1].menu_bar);
		assert_eq!(seen[1].generation, 2);
		assert_eq!(seen[1].menu_labels("&View"), ["Zoom >"]);
	}

	#[test]
	fn from_config_registers_base_order() {
		let config = ChromeConfig::parse(
			r#"
			update_chrome = false
			menus = ["&File", "&Edit"]
			[[toolbars]]
			name = "Main"
			break_after = true
			"#,
		)
		.unwrap();
		let host = Host::from_config(&config);

		assert_eq!(host.menus().names().collect::<Vec<_>>(), ["&File", "&Edit"]);
		assert!(host.toolbars().find("Main").is_some_and(|g| g.breaks_after()));
		assert!(!host.is_rendering_enabled());
	}
}
