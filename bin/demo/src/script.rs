//! Line-oriented scripts that drive a container.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! open text notes        # open a document of kind text or image
//! focus notes            # focus a document; `focus none` clears focus
//! modify notes           # mark unsaved, so closing is refused
//! save notes
//! close notes
//! menu notes 2           # pick entry 2 of the document's tab menu
//! rename notes draft     # rename a document and its file
//! close-others notes
//! close-all
//! chrome off             # stop updating the chrome on focus changes
//! show                   # render the chrome again
//! ```

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use mergebar_mdi::actions::MenuEntry;
use mergebar_mdi::{ClientId, Container};
use thiserror::Error;

use crate::documents::{self, DocumentKind};

#[cfg(test)]
mod tests;

/// Errors raised while parsing or running a script.
#[derive(Debug, Error)]
pub enum ScriptError {
	#[error("line {line}: unknown command `{command}`")]
	UnknownCommand { line: usize, command: String },

	#[error("line {line}: `{command}` expects {expected}")]
	MissingArgument {
		line: usize,
		command: &'static str,
		expected: &'static str,
	},

	#[error("line {line}: unknown document kind `{kind}` (expected text or image)")]
	UnknownKind { line: usize, kind: String },

	#[error("line {line}: expected `on` or `off`, got `{value}`")]
	BadToggle { line: usize, value: String },

	#[error("line {line}: `{value}` is not a menu entry number")]
	BadEntry { line: usize, value: String },

	#[error("line {line}: no open document named `{name}`")]
	UnknownDocument { line: usize, name: String },

	#[error("line {line}: a document named `{name}` is already open")]
	DuplicateDocument { line: usize, name: String },

	#[error("line {line}: tab menus are disabled")]
	MenuDisabled { line: usize },
}

pub type Result<T> = std::result::Result<T, ScriptError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Open { kind: DocumentKind, name: String },
	Focus(Option<String>),
	Modify(String),
	Save(String),
	Close(String),
	CloseOthers(String),
	CloseAll,
	/// Picks a 1-based entry from a document's tab menu.
	Menu { name: String, entry: usize },
	/// Renames a document, keeping its file extension.
	Rename { from: String, to: String },
	Chrome(bool),
	Show,
}

/// A parsed command with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
	pub line: usize,
	pub command: Command,
}

pub fn parse(source: &str) -> Result<Vec<Step>> {
	let mut steps = Vec::new();
	for (index, raw) in source.lines().enumerate() {
		let line = index + 1;
		let text = raw.split_once('#').map_or(raw, |(code, _)| code);
		let mut words = text.split_whitespace();
		let Some(word) = words.next() else {
			continue;
		};

		let command = match word {
			"open" => {
				let kind = words.next().ok_or(ScriptError::MissingArgument {
					line,
					command: "open",
					expected: "a kind and a name",
				})?;
				let kind = DocumentKind::from_name(kind).ok_or_else(|| ScriptError::UnknownKind {
					line,
					kind: kind.to_owned(),
				})?;
				let name = name_arg(&mut words, line, "open")?;
				Command::Open { kind, name }
			}
			"focus" => match name_arg(&mut words, line, "focus")? {
				name if name == "none" => Command::Focus(None),
				name => Command::Focus(Some(name)),
			},
			"modify" => Command::Modify(name_arg(&mut words, line, "modify")?),
			"save" => Command::Save(name_arg(&mut words, line, "save")?),
			"close" => Command::Close(name_arg(&mut words, line, "close")?),
			"close-others" => Command::CloseOthers(name_arg(&mut words, line, "close-others")?),
			"close-all" => Command::CloseAll,
			"menu" => {
				let name = name_arg(&mut words, line, "menu")?;
				let value = words.next().ok_or(ScriptError::MissingArgument {
					line,
					command: "menu",
					expected: "a document name and an entry number",
				})?;
				let entry = value
					.parse::<usize>()
					.ok()
					.filter(|n| *n > 0)
					.ok_or_else(|| ScriptError::BadEntry {
						line,
						value: value.to_owned(),
					})?;
				Command::Menu { name, entry }
			}
			"rename" => {
				let from = name_arg(&mut words, line, "rename")?;
				let to = name_arg(&mut words, line, "rename")?;
				Command::Rename { from, to }
			}
			"chrome" => match words.next() {
				Some("on") => Command::Chrome(true),
				Some("off") => Command::Chrome(false),
				Some(other) => {
					return Err(ScriptError::BadToggle {
						line,
						value: other.to_owned(),
					});
				}
				None => {
					return Err(ScriptError::MissingArgument {
						line,
						command: "chrome",
						expected: "`on` or `off`",
					});
				}
			},
			"show" => Command::Show,
			other => {
				return Err(ScriptError::UnknownCommand {
					line,
					command: other.to_owned(),
				});
			}
		};
		steps.push(Step { line, command });
	}
	Ok(steps)
}

fn name_arg<'a>(words: &mut impl Iterator<Item = &'a str>, line: usize, command: &'static str) -> Result<String> {
	words.next().map(str::to_owned).ok_or(ScriptError::MissingArgument {
		line,
		command,
		expected: "a document name",
	})
}

struct OpenDocument {
	id: ClientId,
	dirty: Rc<Cell<bool>>,
}

/// Runs script steps against a container, tracking documents by name.
pub struct Session {
	container: Container,
	documents: HashMap<String, OpenDocument>,
}

impl Session {
	pub fn new(container: Container) -> Self {
		Self {
			container,
			documents: HashMap::new(),
		}
	}

	pub fn container(&self) -> &Container {
		&self.container
	}

	/// Whether `name` is still open.
	pub fn is_open(&self, name: &str) -> bool {
		self.documents.contains_key(name)
	}

	pub fn run(&mut self, steps: &[Step]) -> Result<()> {
		for step in steps {
			self.execute(step)?;
		}
		Ok(())
	}

	pub fn execute(&mut self, step: &Step) -> Result<()> {
		let line = step.line;
		tracing::debug!(line, command = ?step.command, "executing");

		match &step.command {
			Command::Open { kind, name } => {
				if self.is_open(name) {
					return Err(ScriptError::DuplicateDocument {
						line,
						name: name.clone(),
					});
				}
				let dirty = Rc::new(Cell::new(false));
				let id = self
					.container
					.insert_client(documents::open(*kind, name, Rc::clone(&dirty)));
				tracing::info!(document = %name, %kind, client = %id, "opened");
				self.documents.insert(name.clone(), OpenDocument { id, dirty });
			}
			Command::Focus(target) => {
				let id = target
					.as_deref()
					.map(|name| self.lookup(line, name).map(|doc| doc.id))
					.transpose()?;
				self.container.select_client(id);
			}
			Command::Modify(name) => self.lookup(line, name)?.dirty.set(true),
			Command::Save(name) => self.lookup(line, name)?.dirty.set(false),
			Command::Close(name) => {
				let id = self.lookup(line, name)?.id;
				if !self.container.request_close(id) {
					tracing::info!(document = %name, "close refused, unsaved changes");
				}
			}
			Command::CloseOthers(name) => {
				let id = self.lookup(line, name)?.id;
				let closed = self.container.try_close_all_but(id);
				tracing::info!(kept = %name, closed, "closed other documents");
			}
			Command::CloseAll => {
				let closed = self.container.try_close_all();
				tracing::info!(closed, "closed documents");
			}
			Command::Menu { name, entry } => {
				let id = self.lookup(line, name)?.id;
				let menu = self.container.client_menu().ok_or(ScriptError::MenuDisabled { line })?;
				let chosen = entry
					.checked_sub(1)
					.zip(menu.render())
					.and_then(|(index, rendered)| rendered.entries.into_iter().nth(index))
					.and_then(|picked| match picked {
						MenuEntry::Action(view) => menu.resolve_id(view.id),
						_ => None,
					})
					.ok_or_else(|| ScriptError::BadEntry {
						line,
						value: entry.to_string(),
					})?;
				let closed = self.container.apply_client_menu(id, chosen);
				tracing::info!(document = %name, action = ?chosen, closed, "tab menu");
			}
			Command::Rename { from, to } => {
				if self.is_open(to) {
					return Err(ScriptError::DuplicateDocument {
						line,
						name: to.clone(),
					});
				}
				let id = self.lookup(line, from)?.id;
				if let Some(client) = self.container.client_mut(id) {
					let identity = client
						.file_identity()
						.and_then(|file| file.rsplit_once('.'))
						.map(|(_, extension)| format!("{to}.{extension}"));
					client.set_display_name(to.as_str());
					client.set_file_identity(identity);
				}
				if let Some(document) = self.documents.remove(from) {
					self.documents.insert(to.clone(), document);
				}
				tracing::info!(from = %from, to = %to, "renamed document");
			}
			Command::Chrome(enabled) => {
				if self.container.focused().is_some() {
					tracing::warn!(line, "toggling chrome updates while a document is focused");
				}
				self.container.host_mut().set_rendering_enabled(*enabled);
			}
			Command::Show => {
				self.container.host_mut().render();
			}
		}

		self.documents.retain(|_, doc| self.container.contains(doc.id));
		Ok(())
	}

	fn lookup(&self, line: usize, name: &str) -> Result<&OpenDocument> {
		self.documents.get(name).ok_or_else(|| ScriptError::UnknownDocument {
			line,
			name: name.to_owned(),
		})
	}
}
