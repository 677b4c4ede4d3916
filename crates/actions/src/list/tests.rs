use pretty_assertions::assert_eq;

use super::ActionGroupList;
use crate::element::{Action, EmbeddedControl, InteractiveElement};

fn action(label: &str) -> InteractiveElement {
	InteractiveElement::from(Action::new(label))
}

fn menu_titles(list: &ActionGroupList) -> Vec<String> {
	list.render_menu_bar().into_iter().map(|menu| menu.title).collect()
}

#[test]
fn get_auto_vivifies_the_same_group() {
	let mut list = ActionGroupList::new();
	let first = list.get("NewName").id();
	let second = list.get("NewName").id();

	assert_eq!(first, second);
	assert_eq!(list.len(), 1);
	assert!(list.find("Other").is_none());
	assert_eq!(list.len(), 1);
}

#[test]
fn names_keep_first_lookup_order() {
	let mut list = ActionGroupList::new();
	list.get("&File");
	list.get("&Edit");
	list.get("&Help");
	list.get("&File");

	assert_eq!(list.names().collect::<Vec<_>>(), ["&File", "&Edit", "&Help"]);
}

#[test]
fn merge_creates_missing_groups_after_existing_ones() {
	let mut host = ActionGroupList::new();
	host.get("&File").add(action("Quit"));
	host.get("&Help").add(action("About"));

	let mut client = ActionGroupList::new();
	client.get("&Edit").add(action("Copy"));
	client.get("&File").add(action("Save"));

	host.merge(&client);
	assert_eq!(host.names().collect::<Vec<_>>(), ["&File", "&Help", "&Edit"]);
	assert_eq!(host.find("&File").map(|g| g.len()), Some(2));
}

#[test]
fn unmerge_keeps_empty_groups_but_hides_them() {
	let mut host = ActionGroupList::new();
	host.get("&File").add(action("Quit"));

	let mut client = ActionGroupList::new();
	client.get("&Edit").add(action("Copy"));

	host.merge(&client);
	assert_eq!(menu_titles(&host), ["&File", "&Edit"]);

	host.unmerge(&client);
	assert_eq!(host.len(), 2);
	assert_eq!(menu_titles(&host), ["&File"]);
}

#[test]
fn render_is_repeatable() {
	let mut list = ActionGroupList::new();
	list.get("Main").add(action("New"));
	list.get("Main").add_control(&EmbeddedControl::new("search").shared());
	list.get("Empty");

	let first = (list.render_menu_bar(), list.render_toolbars());
	let second = (list.render_menu_bar(), list.render_toolbars());
	assert_eq!(first, second);

	let toolbars = list.render_toolbars();
	assert_eq!(toolbars.len(), 2);
	assert!(toolbars[0].visible);
	assert!(!toolbars[1].visible);
}

#[test]
fn popup_nests_one_menu_per_group() {
	let mut list = ActionGroupList::new();
	list.get("Tabs").add(action("Close"));
	list.get("Nothing");
	list.get("Split").add(action("Split right"));

	let popup = list.render_popup("Local actions");
	assert_eq!(popup.title, "Local actions");
	let titles: Vec<_> = popup.menus.iter().map(|m| m.title.as_str()).collect();
	assert_eq!(titles, ["Tabs", "Split"]);
}

#[test]
fn actions_skips_separators_and_controls() {
	let mut list = ActionGroupList::new();
	let file = list.get("File");
	file.add(action("Open"));
	file.add_separator();
	file.add_control(&EmbeddedControl::new("path").shared());
	list.get("Edit").add(action("Undo"));

	let labels: Vec<String> = list.actions().map(|a| a.label()).collect();
	assert_eq!(labels, ["Open", "Undo"]);
}
