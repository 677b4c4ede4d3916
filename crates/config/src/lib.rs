//! Configuration for mergebar hosts.
//!
//! The configuration describes the host's own chrome: which menus exist and
//! in which order, which toolbars exist and where toolbar rows break, and
//! whether focus changes should update the chrome at all.
//!
//! ```toml
//! update_chrome = true
//! context_menu = true
//! menus = ["&File", "&Edit", "&View", "&Help"]
//!
//! [[toolbars]]
//! name = "File"
//!
//! [[toolbars]]
//! name = "Edit"
//! break_after = true
//! ```
//!
//! Unset flags fall back to their defaults, so layered files only need to
//! mention what they change (see [`ChromeConfig::merge`]).

pub mod error;

use std::collections::HashSet;
use std::path::Path;

pub use error::{ConfigError, Result};
use serde::Deserialize;

/// A toolbar declared by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolbarConfig {
	/// Group name; also the toolbar title.
	pub name: String,
	/// Start a new toolbar row after this toolbar.
	#[serde(default)]
	pub break_after: bool,
}

/// Parsed chrome configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChromeConfig {
	/// Base menus, registered on the host in this order.
	pub menus: Vec<String>,
	/// Base toolbars, registered on the host in this order.
	pub toolbars: Vec<ToolbarConfig>,
	update_chrome: Option<bool>,
	context_menu: Option<bool>,
}

impl ChromeConfig {
	/// Parse a TOML string into a [`ChromeConfig`].
	pub fn parse(input: &str) -> Result<Self> {
		let config: ChromeConfig = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Whether merging a client updates the host's menus and toolbars.
	pub fn update_chrome(&self) -> bool {
		self.update_chrome.unwrap_or(true)
	}

	pub fn set_update_chrome(&mut self, enabled: bool) {
		self.update_chrome = Some(enabled);
	}

	/// Whether containers offer the per-client close menu.
	pub fn context_menu(&self) -> bool {
		self.context_menu.unwrap_or(true)
	}

	pub fn set_context_menu(&mut self, enabled: bool) {
		self.context_menu = Some(enabled);
	}

	/// Merge another config into this one.
	///
	/// Menus and toolbars from `other` that are not declared here are appended;
	/// toolbars declared in both take `other`'s settings. Flags set in `other`
	/// override flags here.
	pub fn merge(&mut self, other: ChromeConfig) {
		for menu in other.menus {
			if !self.menus.contains(&menu) {
				self.menus.push(menu);
			}
		}
		for toolbar in other.toolbars {
			match self.toolbars.iter_mut().find(|t| t.name == toolbar.name) {
				Some(existing) => *existing = toolbar,
				None => self.toolbars.push(toolbar),
			}
		}
		if other.update_chrome.is_some() {
			self.update_chrome = other.update_chrome;
		}
		if other.context_menu.is_some() {
			self.context_menu = other.context_menu;
		}
	}

	fn validate(&self) -> Result<()> {
		if self.menus.iter().any(|m| m.trim().is_empty()) {
			return Err(ConfigError::EmptyName("menu"));
		}
		let mut seen = HashSet::new();
		for toolbar in &self.toolbars {
			if toolbar.name.trim().is_empty() {
				return Err(ConfigError::EmptyName("toolbar"));
			}
			if !seen.insert(toolbar.name.as_str()) {
				return Err(ConfigError::DuplicateToolbar(toolbar.name.clone()));
			}
		}
		Ok(())
	}
}
