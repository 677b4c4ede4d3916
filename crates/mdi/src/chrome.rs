//! Rendered chrome: the derived, regenerable projection of a host's model.

use std::fmt;
use std::io::Write;

use mergebar_actions::{MenuEntry, RenderedMenu, RenderedToolbar, ToolbarEntry};

/// Stable identifier of a toolbar handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolbarId(pub u64);

/// A toolbar slot owned by the host.
///
/// Created the first time a toolbar group is rendered and reused by name
/// afterwards. The row break is decided at creation, like a toolbar added to
/// a window once and only refilled later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarHandle {
	pub id: ToolbarId,
	pub name: String,
	pub break_after: bool,
}

/// A rendered toolbar together with the handle it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedToolbar {
	pub handle: ToolbarHandle,
	pub toolbar: RenderedToolbar,
}

/// Menu bar and toolbars as of the last render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chrome {
	/// Number of renders that produced this chrome. Zero before the first.
	pub generation: u64,
	pub menu_bar: Vec<RenderedMenu>,
	pub toolbars: Vec<PlacedToolbar>,
}

impl Chrome {
	/// The menu with the given title.
	pub fn menu(&self, title: &str) -> Option<&RenderedMenu> {
		self.menu_bar.iter().find(|menu| menu.title == title)
	}

	/// The toolbar with the given handle name.
	pub fn toolbar(&self, name: &str) -> Option<&RenderedToolbar> {
		self.toolbars
			.iter()
			.find(|placed| placed.handle.name == name)
			.map(|placed| &placed.toolbar)
	}

	pub fn visible_toolbars(&self) -> impl Iterator<Item = &PlacedToolbar> {
		self.toolbars.iter().filter(|placed| placed.toolbar.visible)
	}

	/// Labels of the actions in a menu, separators shown as `-`.
	pub fn menu_labels(&self, title: &str) -> Vec<String> {
		self.menu(title)
			.map(|menu| {
				menu.entries
					.iter()
					.map(|entry| match entry {
						MenuEntry::Action(view) => view.label.clone(),
						MenuEntry::Separator => "-".to_string(),
						MenuEntry::SubMenu { title, .. } => format!("{title} >"),
					})
					.collect()
			})
			.unwrap_or_default()
	}
}

impl fmt::Display for Chrome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "chrome generation {}", self.generation)?;
		for menu in &self.menu_bar {
			write!(f, "  menu {}:", menu.title)?;
			for entry in &menu.entries {
				match entry {
					MenuEntry::Action(view) => {
						write!(f, " [{}", view.label)?;
						if let Some(shortcut) = &view.shortcut {
							write!(f, " {shortcut}")?;
						}
						if !view.enabled {
							write!(f, " (disabled)")?;
						}
						write!(f, "]")?;
					}
					MenuEntry::Separator => write!(f, " |")?,
					MenuEntry::SubMenu { title, .. } => write!(f, " [{title} >]")?,
				}
			}
			writeln!(f)?;
		}
		for placed in &self.toolbars {
			write!(f, "  toolbar {}", placed.toolbar.title)?;
			if !placed.toolbar.visible {
				write!(f, " (hidden)")?;
			} else {
				write!(f, ":")?;
			}
			for entry in &placed.toolbar.entries {
				match entry {
					ToolbarEntry::Action(view) => write!(f, " [{}]", view.label)?,
					ToolbarEntry::Separator => write!(f, " |")?,
					ToolbarEntry::Control { name, .. } => write!(f, " <{name}>")?,
				}
			}
			writeln!(f)?;
			if placed.handle.break_after {
				writeln!(f, "  ----")?;
			}
		}
		Ok(())
	}
}

/// Backend seam: turns a rendered chrome into concrete UI.
pub trait ChromeRenderer {
	fn present(&mut self, chrome: &Chrome);
}

/// Renderer that writes a textual dump of every chrome it is given.
pub struct TextRenderer<W: Write> {
	out: W,
}

impl<W: Write> TextRenderer<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> ChromeRenderer for TextRenderer<W> {
	fn present(&mut self, chrome: &Chrome) {
		if let Err(error) = write!(self.out, "{chrome}").and_then(|()| self.out.flush()) {
			tracing::warn!(%error, "failed to write chrome");
		}
	}
}
