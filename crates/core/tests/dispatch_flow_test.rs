//! End-to-end dispatch against settings on disk and an in-memory terminal

mod common;

use common::{MemoryTerminal, TestWorkbench};
use run_in_terminal_core::{
    ActiveEditor, CommandSpec, DispatchOutcome, Dispatcher, JsonSettings, Position, SESSION_NAME,
    SessionState, TerminalManager, config::CONFIG_FILE_NAME,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

type TestDispatcher = Dispatcher<JsonSettings, TestWorkbench, MemoryTerminal>;

fn write_settings(root: &Path, settings: serde_json::Value) {
    fs::write(
        root.join(CONFIG_FILE_NAME),
        serde_json::to_string_pretty(&settings).unwrap(),
    )
    .unwrap();
}

fn dispatcher(root: &Path) -> (TestDispatcher, MemoryTerminal) {
    let terminal = MemoryTerminal::default();
    let dispatcher = Dispatcher::new(
        JsonSettings::new(),
        TestWorkbench::rooted(root),
        TerminalManager::new(terminal.clone()),
        SessionState::new(),
    );
    (dispatcher, terminal)
}

fn editor(path: &Path, line: u32) -> ActiveEditor {
    ActiveEditor::new(path, Position::new(line, 0))
}

#[test]
fn test_run_then_run_last_on_another_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_settings(
        root,
        serde_json::json!({
            "runInTerminal.commands": [
                {"name": "test", "match": "\\.py$", "cmd": "pytest ${relativeFile}::${line}"}
            ]
        }),
    );
    let (mut dispatcher, terminal) = dispatcher(root);

    let first = dispatcher
        .dispatch(
            Some(&editor(&root.join("tests").join("test_a.py"), 9)),
            Some(CommandSpec::named("test")),
        )
        .unwrap();
    let second = dispatcher
        .run_last(Some(&editor(&root.join("test_b.py"), 0)))
        .unwrap();

    assert_eq!(first.command(), Some(" pytest ./tests/test_a.py::10"));
    assert_eq!(second.command(), Some(" pytest ./test_b.py::1"));
    assert_eq!(terminal.created(), 1);
    assert_eq!(terminal.sent().len(), 2);
}

#[test]
fn test_settings_are_reread_for_every_run() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let file = root.join("main.go");
    write_settings(
        root,
        serde_json::json!({"commands": [{"name": "run", "match": "\\.go$", "cmd": "go run ."}]}),
    );
    let (mut dispatcher, terminal) = dispatcher(root);

    dispatcher
        .dispatch(Some(&editor(&file, 0)), Some(CommandSpec::named("run")))
        .unwrap();

    write_settings(
        root,
        serde_json::json!({
            "commands": [{"name": "run", "match": "\\.go$", "cmd": "go run ${file}"}],
            "clearBeforeRun": true,
            "clearCommand": "tput reset",
            "saveAllBeforeRun": true
        }),
    );
    dispatcher.run_last(Some(&editor(&file, 0))).unwrap();

    let sent: Vec<String> = terminal.sent().into_iter().map(|(_, text)| text).collect();
    assert_eq!(
        sent,
        vec![
            " go run .".to_string(),
            format!(" tput reset; go run {}", file.display()),
        ]
    );
    assert_eq!(dispatcher.workbench().saves, 1);
}

#[test]
fn test_closed_terminal_is_replaced() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let file = root.join("script.sh");
    let (mut dispatcher, terminal) = dispatcher(root);
    let invocation = CommandSpec::ad_hoc("\\.sh$", "bash ${fileBasename}");

    dispatcher
        .dispatch(Some(&editor(&file, 0)), Some(invocation.clone()))
        .unwrap();
    terminal.close("some other terminal");
    dispatcher
        .dispatch(Some(&editor(&file, 0)), Some(invocation.clone()))
        .unwrap();
    terminal.close(SESSION_NAME);
    dispatcher
        .dispatch(Some(&editor(&file, 0)), Some(invocation))
        .unwrap();

    assert_eq!(terminal.created(), 2);
    let terminals: Vec<usize> = terminal.sent().into_iter().map(|(id, _)| id).collect();
    assert_eq!(terminals, vec![1, 1, 2]);
}

#[test]
fn test_unresolved_runs_leave_terminal_alone() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let (mut dispatcher, terminal) = dispatcher(root);
    let file = root.join("notes.txt");

    assert_eq!(
        dispatcher
            .dispatch(Some(&editor(&file, 0)), Some(CommandSpec::named("run")))
            .unwrap(),
        DispatchOutcome::NoCommand
    );
    assert_eq!(
        dispatcher
            .dispatch(Some(&editor(&file, 0)), Some(CommandSpec::ad_hoc("[", "x")))
            .unwrap(),
        DispatchOutcome::NoCommand
    );
    assert_eq!(
        dispatcher.dispatch(None, Some(CommandSpec::named("run"))).unwrap(),
        DispatchOutcome::NoEditor
    );

    assert_eq!(terminal.created(), 0);
    assert_eq!(
        dispatcher.workbench().errors,
        vec!["run-in-terminal: invalid match pattern: ["]
    );
    // unresolved requests are still what run-last replays
    assert_eq!(
        dispatcher.state().last_command(),
        Some(&CommandSpec::ad_hoc("[", "x"))
    );
}
