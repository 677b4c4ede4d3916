//! Sample documents and the host chrome they merge into.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use mergebar_config::ChromeConfig;
use mergebar_mdi::actions::{Action, EmbeddedControl, SubMenu};
use mergebar_mdi::{Client, ClientBehavior, Container, Host, HostId};

/// Chrome used when no configuration file is given.
pub const DEFAULT_CONFIG: &str = r#"
menus = ["&File", "&Edit", "&View", "&Help"]

[[toolbars]]
name = "File"

[[toolbars]]
name = "Edit"
break_after = true

[[toolbars]]
name = "View"
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
	Text,
	Image,
}

impl DocumentKind {
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"text" => Some(Self::Text),
			"image" => Some(Self::Image),
			_ => None,
		}
	}
}

impl fmt::Display for DocumentKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Text => "text",
			Self::Image => "image",
		})
	}
}

/// A container whose host follows `config` and carries the base actions.
pub fn container(config: &ChromeConfig) -> Container {
	let mut container = Container::from_config(config);
	install_base_actions(container.host_mut());
	container
}

/// Adds the application-wide actions every document merges around.
pub fn install_base_actions(host: &mut Host) {
	let file = host.menus_mut().get("&File");
	file.add(Action::new("New").with_command("new").with_shortcut("Ctrl+N"));
	file.add(Action::new("Open...").with_command("open").with_shortcut("Ctrl+O"));
	file.set_merge_point();
	file.add_separator();
	file.add(Action::new("Quit").with_command("quit").with_shortcut("Ctrl+Q"));

	host.menus_mut().get("&Help").add(Action::new("About").with_command("about"));

	let toolbar = host.toolbars_mut().get("File");
	toolbar.add(Action::new("New").with_command("new"));
	toolbar.add(Action::new("Open").with_command("open"));
}

/// Document behavior: refuses to close while it has unsaved changes.
struct Document {
	name: String,
	dirty: Rc<Cell<bool>>,
}

impl ClientBehavior for Document {
	fn can_close(&mut self) -> bool {
		!self.dirty.get()
	}

	fn on_merged(&mut self, host: HostId) {
		tracing::trace!(document = %self.name, host = host.0, "document merged");
	}

	fn on_unmerged(&mut self, host: HostId) {
		tracing::trace!(document = %self.name, host = host.0, "document unmerged");
	}
}

/// Builds a client for a document of `kind`. `dirty` is shared with the
/// caller so it can mark the document modified or saved.
pub fn open(kind: DocumentKind, name: &str, dirty: Rc<Cell<bool>>) -> Client {
	let behavior = Document {
		name: name.to_owned(),
		dirty,
	};
	let mut client = Client::new(name)
		.with_file_identity(format!("{name}.{}", extension(kind)))
		.with_behavior(behavior)
		.with_surface();

	match kind {
		DocumentKind::Text => {
			let file = client.menus.get("&File");
			file.add(Action::new("Save").with_command("save").with_shortcut("Ctrl+S"));
			file.add(Action::new("Save As...").with_command("save-as"));

			let edit = client.menus.get("&Edit");
			edit.add(Action::new("Undo").with_command("undo").with_shortcut("Ctrl+Z"));
			edit.add(Action::new("Redo").with_command("redo").with_shortcut("Ctrl+Y"));
			edit.add_separator();
			let cut = Action::new("Cut").with_command("cut").with_shortcut("Ctrl+X").shared();
			let copy = Action::new("Copy").with_command("copy").with_shortcut("Ctrl+C").shared();
			let paste = Action::new("Paste").with_command("paste").with_shortcut("Ctrl+V").shared();
			edit.add_all([&cut, &copy, &paste]);

			client
				.menus
				.get("&View")
				.add(Action::new("Word Wrap").with_command("word-wrap").with_checked(false));
			client.toolbars.get("Edit").add_all([&cut, &copy, &paste]);
		}
		DocumentKind::Image => {
			client
				.menus
				.get("&File")
				.add(Action::new("Export...").with_command("export").with_shortcut("Ctrl+E"));

			let view = client.menus.get("&View");
			view.add(Action::new("Zoom In").with_command("zoom-in").with_shortcut("Ctrl+="));
			view.add(Action::new("Zoom Out").with_command("zoom-out").with_shortcut("Ctrl+-"));
			view.add_submenu(&SubMenu::new("Zoom Presets").shared());

			client.menus.get("&Image").add(Action::new("Rotate").with_command("rotate"));

			let toolbar = client.toolbars.get("View");
			toolbar.add(Action::new("Fit").with_command("zoom-fit"));
			toolbar.add_control(&EmbeddedControl::new("zoom-level").shared());
		}
	}
	client
}

fn extension(kind: DocumentKind) -> &'static str {
	match kind {
		DocumentKind::Text => "txt",
		DocumentKind::Image => "png",
	}
}
