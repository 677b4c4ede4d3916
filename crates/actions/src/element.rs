//! Interactive elements: the things a menu or toolbar is made of.
//!
//! Every element is shared through an [`Rc`] and compared by pointer identity,
//! so the same [`Action`] can sit in a client's own group and in the host's
//! merged group at the same time while still counting as one element. The
//! `Rc` also keeps the whole model on the thread that built it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier assigned to every element at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl ElementId {
	fn next() -> Self {
		Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for ElementId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A leaf command, or a separator line.
pub struct Action {
	id: ElementId,
	label: RefCell<String>,
	command: Option<String>,
	shortcut: Option<String>,
	separator: bool,
	enabled: Cell<bool>,
	checked: Cell<Option<bool>>,
}

impl Action {
	/// Creates an enabled command with the given label.
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			id: ElementId::next(),
			label: RefCell::new(label.into()),
			command: None,
			shortcut: None,
			separator: false,
			enabled: Cell::new(true),
			checked: Cell::new(None),
		}
	}

	/// Creates a fresh separator. Each call yields a distinct element.
	pub fn separator() -> Self {
		Self {
			separator: true,
			..Self::new("")
		}
	}

	/// Builder: the command name dispatched when the action is triggered.
	pub fn with_command(mut self, command: impl Into<String>) -> Self {
		self.command = Some(command.into());
		self
	}

	/// Builder: keyboard shortcut hint (display only).
	pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
		self.shortcut = Some(shortcut.into());
		self
	}

	/// Builder: makes the action checkable with the given initial state.
	pub fn with_checked(self, checked: bool) -> Self {
		self.checked.set(Some(checked));
		self
	}

	/// Wraps the action in the shared handle used by groups.
	pub fn shared(self) -> Rc<Self> {
		Rc::new(self)
	}

	pub fn id(&self) -> ElementId {
		self.id
	}

	pub fn label(&self) -> String {
		self.label.borrow().clone()
	}

	pub fn set_label(&self, label: impl Into<String>) {
		*self.label.borrow_mut() = label.into();
	}

	pub fn command(&self) -> Option<&str> {
		self.command.as_deref()
	}

	pub fn shortcut(&self) -> Option<&str> {
		self.shortcut.as_deref()
	}

	pub fn is_separator(&self) -> bool {
		self.separator
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled.get()
	}

	/// Enables or disables the action wherever it is displayed.
	pub fn set_enabled(&self, enabled: bool) {
		self.enabled.set(enabled);
	}

	/// `None` for plain commands, `Some(state)` for checkable ones.
	pub fn checked(&self) -> Option<bool> {
		self.checked.get()
	}

	/// Updates the check state. No-op for actions that are not checkable.
	pub fn set_checked(&self, checked: bool) {
		if self.checked.get().is_some() {
			self.checked.set(Some(checked));
		}
	}
}

impl fmt::Debug for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.separator {
			return write!(f, "Separator({})", self.id);
		}
		f.debug_struct("Action")
			.field("id", &self.id)
			.field("label", &*self.label.borrow())
			.field("command", &self.command)
			.field("enabled", &self.enabled.get())
			.finish()
	}
}

/// Opaque reference to a nested menu. Only meaningful inside menus.
#[derive(Debug)]
pub struct SubMenu {
	id: ElementId,
	title: String,
}

impl SubMenu {
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			id: ElementId::next(),
			title: title.into(),
		}
	}

	pub fn shared(self) -> Rc<Self> {
		Rc::new(self)
	}

	pub fn id(&self) -> ElementId {
		self.id
	}

	pub fn title(&self) -> &str {
		&self.title
	}
}

/// Opaque embedded control (a combo box, a search field). Only meaningful
/// inside toolbars.
#[derive(Debug)]
pub struct EmbeddedControl {
	id: ElementId,
	name: String,
}

impl EmbeddedControl {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			id: ElementId::next(),
			name: name.into(),
		}
	}

	pub fn shared(self) -> Rc<Self> {
		Rc::new(self)
	}

	pub fn id(&self) -> ElementId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

/// Discriminator of an [`InteractiveElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
	Action,
	SubMenu,
	Control,
}

/// One entry of an action group.
///
/// Equality is identity: two elements are equal only when they share the same
/// allocation, regardless of their labels.
#[derive(Debug, Clone)]
pub enum InteractiveElement {
	/// A command or separator, shown in both menus and toolbars.
	Action(Rc<Action>),
	/// A nested menu, skipped when rendering toolbars.
	SubMenu(Rc<SubMenu>),
	/// An embedded control, skipped when rendering menus.
	Control(Rc<EmbeddedControl>),
}

impl InteractiveElement {
	pub fn kind(&self) -> ElementKind {
		match self {
			Self::Action(_) => ElementKind::Action,
			Self::SubMenu(_) => ElementKind::SubMenu,
			Self::Control(_) => ElementKind::Control,
		}
	}

	pub fn id(&self) -> ElementId {
		match self {
			Self::Action(action) => action.id(),
			Self::SubMenu(menu) => menu.id(),
			Self::Control(control) => control.id(),
		}
	}

	/// Returns the action if this element is one.
	pub fn as_action(&self) -> Option<&Rc<Action>> {
		match self {
			Self::Action(action) => Some(action),
			_ => None,
		}
	}

	pub fn is_separator(&self) -> bool {
		self.as_action().is_some_and(|action| action.is_separator())
	}
}

impl PartialEq for InteractiveElement {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Action(a), Self::Action(b)) => Rc::ptr_eq(a, b),
			(Self::SubMenu(a), Self::SubMenu(b)) => Rc::ptr_eq(a, b),
			(Self::Control(a), Self::Control(b)) => Rc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl Eq for InteractiveElement {}

impl From<Rc<Action>> for InteractiveElement {
	fn from(action: Rc<Action>) -> Self {
		Self::Action(action)
	}
}

impl From<&Rc<Action>> for InteractiveElement {
	fn from(action: &Rc<Action>) -> Self {
		Self::Action(Rc::clone(action))
	}
}

impl From<Action> for InteractiveElement {
	fn from(action: Action) -> Self {
		Self::Action(Rc::new(action))
	}
}

impl From<Rc<SubMenu>> for InteractiveElement {
	fn from(menu: Rc<SubMenu>) -> Self {
		Self::SubMenu(menu)
	}
}

impl From<&Rc<SubMenu>> for InteractiveElement {
	fn from(menu: &Rc<SubMenu>) -> Self {
		Self::SubMenu(Rc::clone(menu))
	}
}

impl From<Rc<EmbeddedControl>> for InteractiveElement {
	fn from(control: Rc<EmbeddedControl>) -> Self {
		Self::Control(control)
	}
}

impl From<&Rc<EmbeddedControl>> for InteractiveElement {
	fn from(control: &Rc<EmbeddedControl>) -> Self {
		Self::Control(Rc::clone(control))
	}
}
