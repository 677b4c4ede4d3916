//! Containers: own clients and drive merging as focus moves between them.
//!
//! A container plays the part of a tab widget. Exactly one client is focused
//! at a time (or none), and the host always shows its base chrome plus the
//! focused client's contributions.

use indexmap::IndexMap;
use mergebar_config::ChromeConfig;

use crate::client::{Client, ClientId, ContainerId};
use crate::context_menu::{ClientMenu, ClientMenuAction};
use crate::host::Host;

#[cfg(test)]
mod tests;

/// Owns clients, tracks focus, and keeps the host in sync with it.
pub struct Container {
	id: ContainerId,
	host: Host,
	/// Clients in insertion (tab) order.
	clients: IndexMap<ClientId, Client>,
	/// Counter for generating unique client IDs.
	next_client_id: u64,
	focused: Option<ClientId>,
	context_menu: bool,
}

impl Container {
	pub fn new(host: Host) -> Self {
		Self {
			id: ContainerId::next(),
			host,
			clients: IndexMap::new(),
			next_client_id: 1,
			focused: None,
			context_menu: true,
		}
	}

	/// Creates a container with a host built from `config`.
	pub fn from_config(config: &ChromeConfig) -> Self {
		let mut container = Self::new(Host::from_config(config));
		container.context_menu = config.context_menu();
		container
	}

	pub fn id(&self) -> ContainerId {
		self.id
	}

	pub fn host(&self) -> &Host {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut Host {
		&mut self.host
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}

	pub fn contains(&self, id: ClientId) -> bool {
		self.clients.contains_key(&id)
	}

	pub fn client(&self, id: ClientId) -> Option<&Client> {
		self.clients.get(&id)
	}

	/// Mutable access to a client's contributions.
	///
	/// Changes to a focused client only reach the host on its next merge.
	pub fn client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
		self.clients.get_mut(&id)
	}

	/// Client ids in tab order.
	pub fn client_ids(&self) -> impl Iterator<Item = ClientId> + '_ {
		self.clients.keys().copied()
	}

	/// The id at tab position `index`.
	pub fn client_at(&self, index: usize) -> Option<ClientId> {
		self.clients.get_index(index).map(|(id, _)| *id)
	}

	pub fn focused(&self) -> Option<ClientId> {
		self.focused
	}

	pub fn focused_client(&self) -> Option<&Client> {
		self.focused.and_then(|id| self.clients.get(&id))
	}

	/// Takes ownership of `client` and returns its id.
	///
	/// The first client inserted into an empty container is focused at once.
	pub fn insert_client(&mut self, mut client: Client) -> ClientId {
		let id = ClientId(self.next_client_id);
		self.next_client_id += 1;

		client.owner = Some(self.id);
		tracing::debug!(container = self.id.0, client = %id, name = client.display_name(), "inserted client");
		self.clients.insert(id, client);

		if self.clients.len() == 1 {
			self.select_client(Some(id));
		}
		id
	}

	/// Moves focus to `target` (or to nothing), unmerging the previously
	/// focused client and merging the new one, then renders.
	///
	/// Selecting the focused client again, or an unknown client, does nothing.
	pub fn select_client(&mut self, target: Option<ClientId>) {
		if target == self.focused {
			tracing::trace!(container = self.id.0, "focus unchanged");
			return;
		}
		if let Some(id) = target
			&& !self.clients.contains_key(&id)
		{
			tracing::trace!(container = self.id.0, client = %id, "ignoring focus on unknown client");
			return;
		}

		if let Some(previous) = self.focused.take()
			&& let Some(client) = self.clients.get_mut(&previous)
		{
			self.host.unmerge_client(client);
		}

		self.focused = target;
		if let Some(id) = target
			&& let Some(client) = self.clients.get_mut(&id)
		{
			self.host.merge_client(client);
		}

		tracing::debug!(container = self.id.0, focused = ?self.focused, "focus changed");
		self.host.render();
	}

	/// Focuses the client at tab position `index`.
	pub fn select_index(&mut self, index: usize) {
		if let Some(id) = self.client_at(index) {
			self.select_client(Some(id));
		}
	}

	/// Removes `id` and hands it back.
	///
	/// A focused client is unmerged and the chrome re-rendered first; focus
	/// then stays empty until the next selection.
	pub fn remove_client(&mut self, id: ClientId) -> Option<Client> {
		if self.focused == Some(id)
			&& let Some(client) = self.clients.get_mut(&id)
		{
			self.host.unmerge_client(client);
			self.host.render();
			self.focused = None;
		}

		let mut client = self.clients.shift_remove(&id)?;
		client.owner = None;
		tracing::debug!(container = self.id.0, client = %id, name = client.display_name(), "removed client");
		Some(client)
	}

	/// Two-phase close of one client. The client is dropped when it agrees.
	pub fn request_close(&mut self, id: ClientId) -> bool {
		let Some(client) = self.clients.get_mut(&id) else {
			tracing::trace!(container = self.id.0, client = %id, "close of unknown client ignored");
			return false;
		};
		if !client.request_close() {
			return false;
		}
		drop(self.remove_client(id));
		true
	}

	/// Closes the client at tab position `index`.
	pub fn try_close_client(&mut self, index: usize) -> bool {
		match self.client_at(index) {
			Some(id) => self.request_close(id),
			None => false,
		}
	}

	/// Asks every client except `keep` to close. Returns how many closed.
	pub fn try_close_all_but(&mut self, keep: ClientId) -> usize {
		if !self.contains(keep) {
			return 0;
		}
		let others: Vec<ClientId> = self.client_ids().filter(|id| *id != keep).collect();
		self.close_each(others)
	}

	/// Asks every client to close. Returns how many closed.
	pub fn try_close_all(&mut self) -> usize {
		let all: Vec<ClientId> = self.client_ids().collect();
		self.close_each(all)
	}

	fn close_each(&mut self, ids: Vec<ClientId>) -> usize {
		ids.into_iter().filter(|id| self.request_close(*id)).count()
	}

	/// The close menu for a client tab, unless disabled by configuration.
	pub fn client_menu(&self) -> Option<ClientMenu> {
		self.context_menu.then(ClientMenu::new)
	}

	/// Applies a choice made in the client menu opened on `target`.
	/// Returns how many clients closed.
	pub fn apply_client_menu(&mut self, target: ClientId, action: ClientMenuAction) -> usize {
		if !self.contains(target) {
			return 0;
		}
		match action {
			ClientMenuAction::CloseThis => usize::from(self.request_close(target)),
			ClientMenuAction::CloseOthers => self.try_close_all_but(target),
			ClientMenuAction::CloseAll => self.try_close_all(),
		}
	}
}

impl Drop for Container {
	fn drop(&mut self) {
		if let Some(id) = self.focused.take()
			&& let Some(client) = self.clients.get_mut(&id)
		{
			self.host.unmerge_client(client);
		}
	}
}

impl std::fmt::Debug for Container {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Container")
			.field("id", &self.id)
			.field("clients", &self.clients)
			.field("focused", &self.focused)
			.finish_non_exhaustive()
	}
}
