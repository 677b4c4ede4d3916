//! Per-client "Local actions" menu offered by containers.

use std::rc::Rc;

use mergebar_actions::{Action, ActionGroup, ElementId, RenderedMenu};

/// What the user picked from the client menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMenuAction {
	/// Close the client the menu was opened on.
	CloseThis,
	/// Close every client except that one.
	CloseOthers,
	/// Close every client.
	CloseAll,
}

/// The close menu shown on a client's tab.
pub struct ClientMenu {
	group: ActionGroup,
	entries: [(Rc<Action>, ClientMenuAction); 3],
}

impl ClientMenu {
	pub fn new() -> Self {
		let entries = [
			(
				Action::new("Close this window").with_command("close-this").shared(),
				ClientMenuAction::CloseThis,
			),
			(
				Action::new("Close other windows").with_command("close-others").shared(),
				ClientMenuAction::CloseOthers,
			),
			(
				Action::new("Close all windows").with_command("close-all").shared(),
				ClientMenuAction::CloseAll,
			),
		];
		let mut group = ActionGroup::new("Local actions");
		for (action, _) in &entries {
			group.add(action);
		}
		Self { group, entries }
	}

	pub fn group(&self) -> &ActionGroup {
		&self.group
	}

	pub fn render(&self) -> Option<RenderedMenu> {
		self.group.render_menu()
	}

	/// Maps a chosen action back to its meaning.
	pub fn resolve(&self, chosen: &Rc<Action>) -> Option<ClientMenuAction> {
		self.entries
			.iter()
			.find(|(action, _)| Rc::ptr_eq(action, chosen))
			.map(|(_, meaning)| *meaning)
	}

	/// Maps the id of a rendered entry back to its meaning.
	pub fn resolve_id(&self, id: ElementId) -> Option<ClientMenuAction> {
		self.entries
			.iter()
			.find(|(action, _)| action.id() == id)
			.map(|(_, meaning)| *meaning)
	}
}

impl Default for ClientMenu {
	fn default() -> Self {
		Self::new()
	}
}
