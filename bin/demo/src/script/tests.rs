use pretty_assertions::assert_eq;

use super::*;

fn session() -> Session {
	let config = mergebar_config::ChromeConfig::parse(documents::DEFAULT_CONFIG).expect("built-in config parses");
	Session::new(documents::container(&config))
}

fn run(session: &mut Session, source: &str) -> Result<()> {
	session.run(&parse(source)?)
}

fn file_menu(session: &Session) -> Vec<String> {
	session.container().host().chrome().menu_labels("&File")
}

#[test]
fn parse_skips_comments_and_blank_lines() {
	let steps = parse("# tour\n\nopen text a  # first\nfocus none\nchrome off\n").unwrap();
	assert_eq!(
		steps,
		[
			Step {
				line: 3,
				command: Command::Open {
					kind: DocumentKind::Text,
					name: "a".into(),
				},
			},
			Step {
				line: 4,
				command: Command::Focus(None),
			},
			Step {
				line: 5,
				command: Command::Chrome(false),
			},
		]
	);
}

#[test]
fn parse_reports_the_offending_line() {
	assert!(matches!(
		parse("show\nfrobnicate"),
		Err(ScriptError::UnknownCommand { line: 2, .. })
	));
	assert!(matches!(parse("open text"), Err(ScriptError::MissingArgument { line: 1, .. })));
	assert!(matches!(parse("open video v"), Err(ScriptError::UnknownKind { .. })));
	assert!(matches!(parse("chrome maybe"), Err(ScriptError::BadToggle { .. })));
	assert!(matches!(parse("menu a 0"), Err(ScriptError::BadEntry { .. })));
}

#[test]
fn focus_swaps_document_menus() {
	let mut session = session();
	run(&mut session, "open text notes\nopen image photo").unwrap();
	assert_eq!(file_menu(&session), ["New", "Open...", "Save", "Save As...", "-", "Quit"]);

	run(&mut session, "focus photo").unwrap();
	assert_eq!(file_menu(&session), ["New", "Open...", "Export...", "-", "Quit"]);
	let chrome = session.container().host().chrome();
	assert_eq!(chrome.menu_labels("&Image"), ["Rotate"]);
	assert!(chrome.toolbar("Edit").is_some_and(|t| !t.visible));

	run(&mut session, "focus none").unwrap();
	assert_eq!(file_menu(&session), ["New", "Open...", "-", "Quit"]);
}

#[test]
fn unsaved_documents_survive_close_all() {
	let mut session = session();
	run(&mut session, "open text notes\nopen text todo\nmodify notes\nclose-all").unwrap();
	assert!(session.is_open("notes"));
	assert!(!session.is_open("todo"));

	run(&mut session, "save notes\nclose notes").unwrap();
	assert!(session.container().is_empty());
}

#[test]
fn tab_menu_entries_dispatch() {
	let mut session = session();
	run(&mut session, "open text a\nopen text b\nopen image c\nmenu a 2").unwrap();
	assert!(session.is_open("a"));
	assert_eq!(session.container().len(), 1);

	run(&mut session, "menu a 1").unwrap();
	assert!(session.container().is_empty());
}

#[test]
fn runtime_errors_name_the_document() {
	let mut session = session();
	assert!(matches!(
		run(&mut session, "focus ghost"),
		Err(ScriptError::UnknownDocument { line: 1, .. })
	));
	assert!(matches!(
		run(&mut session, "open text a\nopen image a"),
		Err(ScriptError::DuplicateDocument { line: 2, .. })
	));
	assert!(matches!(run(&mut session, "menu a 9"), Err(ScriptError::BadEntry { .. })));
}

#[test]
fn menu_entry_zero_is_rejected_at_run_time() {
	let mut session = session();
	run(&mut session, "open text a").unwrap();
	let step = Step {
		line: 7,
		command: Command::Menu {
			name: "a".into(),
			entry: 0,
		},
	};
	assert!(matches!(session.execute(&step), Err(ScriptError::BadEntry { line: 7, .. })));
	assert!(session.is_open("a"));
}

#[test]
fn rename_rekeys_document_and_file() {
	let mut session = session();
	run(&mut session, "open text notes\nopen image photo\nrename notes draft").unwrap();
	assert!(!session.is_open("notes"));
	assert!(session.is_open("draft"));

	let client = session.container().focused_client().expect("draft stays focused");
	assert_eq!(client.display_name(), "draft");
	assert_eq!(client.file_identity(), Some("draft.txt"));

	assert!(matches!(
		run(&mut session, "rename draft photo"),
		Err(ScriptError::DuplicateDocument { .. })
	));
	run(&mut session, "close draft").unwrap();
	assert_eq!(session.container().len(), 1);
}
