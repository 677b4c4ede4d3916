use std::cell::Cell;
use std::rc::Rc;

use mergebar_actions::Action;
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::Container;
use crate::client::{Client, ClientBehavior, ClientId};
use crate::context_menu::ClientMenuAction;
use crate::host::Host;

struct Veto(Rc<Cell<bool>>);

impl ClientBehavior for Veto {
	fn can_close(&mut self) -> bool {
		!self.0.get()
	}
}

fn doc(name: &str, file_items: &[&str]) -> Client {
	let mut client = Client::new(name).with_file_identity(format!("/tmp/{name}"));
	for label in file_items {
		client.menus.get("&File").add(Action::new(*label));
	}
	client
}

fn file_menu(container: &Container) -> Vec<String> {
	container.host().chrome().menu_labels("&File")
}

#[test]
fn first_insert_focuses_without_selection() {
	let mut container = Container::new(Host::new());
	let a = container.insert_client(doc("a", &["New"]));
	let b = container.insert_client(doc("b", &["Other"]));

	assert_eq!(container.focused(), Some(a));
	assert_eq!(file_menu(&container), ["New"]);
	assert_eq!(container.client(b).and_then(|c| c.owner()), Some(container.id()));
}

#[test]
fn switching_focus_swaps_contributions() {
	let mut container = Container::new(Host::new());
	let a = container.insert_client(doc("a", &["New", "Save"]));
	let b = container.insert_client(doc("b", &["SaveAs"]));

	assert_eq!(file_menu(&container), ["New", "Save"]);
	container.select_client(Some(b));
	assert_eq!(file_menu(&container), ["SaveAs"]);
	container.select_client(Some(a));
	assert_eq!(file_menu(&container), ["New", "Save"]);
}

#[test]
fn redundant_and_unknown_selection_is_ignored() {
	let mut container = Container::new(Host::new());
	let a = container.insert_client(doc("a", &["New"]));
	let generation = container.host().chrome().generation;

	container.select_client(Some(a));
	container.select_client(Some(ClientId(999)));
	assert_eq!(container.host().chrome().generation, generation);
	assert_eq!(container.focused(), Some(a));
}

#[test]
fn selecting_nothing_unmerges() {
	let mut container = Container::new(Host::new());
	container.insert_client(doc("a", &["New"]));

	container.select_client(None);
	assert_eq!(container.focused(), None);
	assert!(container.host().chrome().menu_bar.is_empty());
}

#[test]
fn removing_focused_client_clears_focus() {
	let mut container = Container::new(Host::new());
	let a = container.insert_client(doc("a", &["New"]));
	let b = container.insert_client(doc("b", &["Other"]));

	let removed = container.remove_client(a).expect("owned client");
	assert_eq!(removed.owner(), None);
	assert_eq!(container.focused(), None);
	assert!(file_menu(&container).is_empty());

	container.select_client(Some(b));
	assert_eq!(file_menu(&container), ["Other"]);
	assert!(container.remove_client(a).is_none());
}

#[test]
fn removing_unfocused_client_keeps_chrome() {
	let mut container = Container::new(Host::new());
	container.insert_client(doc("a", &["New"]));
	let b = container.insert_client(doc("b", &["Other"]));
	let generation = container.host().chrome().generation;

	container.remove_client(b);
	assert_eq!(container.host().chrome().generation, generation);
	assert_eq!(file_menu(&container), ["New"]);
}

#[test]
fn vetoed_close_leaves_client_focused_and_merged() {
	let dirty = Rc::new(Cell::new(true));
	let mut container = Container::new(Host::new());
	let a = container.insert_client(doc("a", &["Save"]).with_behavior(Veto(Rc::clone(&dirty))));

	assert!(!container.request_close(a));
	assert_eq!(container.focused(), Some(a));
	assert_eq!(file_menu(&container), ["Save"]);

	dirty.set(false);
	assert!(container.request_close(a));
	assert!(container.is_empty());
	assert!(file_menu(&container).is_empty());
}

#[test]
fn bulk_close_respects_vetoes() {
	let dirty = Rc::new(Cell::new(true));
	let mut container = Container::new(Host::new());
	let a = container.insert_client(doc("a", &[]));
	let b = container.insert_client(doc("b", &[]).with_behavior(Veto(Rc::clone(&dirty))));
	let c = container.insert_client(doc("c", &[]));
	container.insert_client(doc("d", &[]));

	assert_eq!(container.try_close_all_but(c), 2);
	assert_eq!(container.client_ids().collect::<Vec<_>>(), [b, c]);
	assert!(!container.contains(a));

	assert_eq!(container.try_close_all(), 1);
	assert_eq!(container.client_ids().collect::<Vec<_>>(), [b]);
	assert_eq!(container.try_close_all_but(ClientId(42)), 0);
}

#[rstest]
#[case::first(0, true, Some("b"))]
#[case::last(2, true, Some("a"))]
#[case::out_of_range(3, false, Some("a"))]
fn close_by_tab_index(#[case] index: usize, #[case] closed: bool, #[case] first: Option<&str>) {
	let mut container = Container::new(Host::new());
	for name in ["a", "b", "c"] {
		container.insert_client(doc(name, &[]));
	}

	assert_eq!(container.try_close_client(index), closed);
	assert_eq!(container.len(), if closed { 2 } else { 3 });
	let first_name = container.client_at(0).and_then(|id| container.client(id)).map(|c| c.display_name());
	assert_eq!(first_name, first);
}

#[test]
fn client_menu_dispatches_bulk_closes() {
	let mut container = Container::new(Host::new());
	let a = container.insert_client(doc("a", &[]));
	container.insert_client(doc("b", &[]));
	container.insert_client(doc("c", &[]));

	let menu = container.client_menu().expect("enabled by default");
	assert_eq!(menu.group().len(), 3);

	assert_eq!(container.apply_client_menu(a, ClientMenuAction::CloseOthers), 2);
	assert_eq!(container.len(), 1);
	assert_eq!(container.apply_client_menu(a, ClientMenuAction::CloseThis), 1);
	assert!(container.is_empty());
	assert_eq!(container.apply_client_menu(a, ClientMenuAction::CloseAll), 0);
}

#[test]
fn client_menu_can_be_disabled() {
	let mut config = mergebar_config::ChromeConfig::default();
	config.set_context_menu(false);
	let container = Container::from_config(&config);
	assert!(container.client_menu().is_none());
}

#[test]
fn dropping_container_unmerges_focused_client() {
	struct Watch(Rc<Cell<u32>>);
	impl ClientBehavior for Watch {
		fn on_unmerged(&mut self, _host: crate::HostId) {
			self.0.set(self.0.get() + 1);
		}
	}

	let unmerged = Rc::new(Cell::new(0));
	let mut container = Container::new(Host::new());
	container.insert_client(Client::new("a").with_behavior(Watch(Rc::clone(&unmerged))));
	drop(container);
	assert_eq!(unmerged.get(), 1);
}

#[test]
fn select_index_follows_tab_order() {
	let mut container = Container::new(Host::new());
	container.insert_client(doc("a", &["New"]));
	let b = container.insert_client(doc("b", &["Other"]));

	container.select_index(1);
	assert_eq!(container.focused(), Some(b));
	assert_eq!(file_menu(&container), ["Other"]);

	let generation = container.host().chrome().generation;
	container.select_index(7);
	assert_eq!(container.focused(), Some(b));
	assert_eq!(container.host().chrome().generation, generation);
}

#[test]
fn client_changes_reach_host_on_next_merge() {
	let mut container = Container::new(Host::new());
	let a = container.insert_client(doc("a", &["New"]));
	let b = container.insert_client(doc("b", &[]));

	let client = container.client_mut(a).expect("owned client");
	client.menus.get("&File").add(Action::new("Print"));
	assert_eq!(file_menu(&container), ["New"]);

	container.select_client(Some(b));
	container.select_client(Some(a));
	assert_eq!(file_menu(&container), ["New", "Print"]);
	assert!(container.client_mut(ClientId(999)).is_none());
}
