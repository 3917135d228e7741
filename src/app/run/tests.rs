use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use serde_json::json;
use tempfile::TempDir;

use l2_base::state::{Role, Turn, UsageStats};
use l2_base::storage::{Record, Store};

use crate::app::App;
use crate::app::actions::Action;
use crate::llms::Fragment;
use crate::llms::mock::{MockBackend, tool_call};
use crate::state::{Phase, State, load_state};

fn app_with(mock: MockBackend, dir: &TempDir) -> (App, Arc<MockBackend>) {
    let store = Store::new(dir.path());
    let mock = Arc::new(mock);
    let state = load_state(&store, "mock");
    (App::new(state, mock.clone(), store), mock)
}

fn submit(app: &mut App, text: &str) {
    app.state.input = text.to_string();
    app.handle_action(Action::InputSubmit);
}

fn wait_idle(app: &mut App) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.state.is_streaming() {
        assert!(Instant::now() < deadline, "stream never finished");
        app.tick(Instant::now());
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn hello_round_trip() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = app_with(MockBackend::from_text(&["Hi", " there", "!"]), &dir);

    submit(&mut app, "Hello");
    assert_eq!(app.state.phase, Phase::Streaming);
    wait_idle(&mut app);

    assert_eq!(app.state.history, vec![Turn::user("Hello"), Turn::assistant("Hi there!")]);
    assert_eq!(app.state.stats.get(), 3);

    let store = Store::new(dir.path());
    assert_eq!(store.load_history().unwrap(), app.state.history);
    assert_eq!(store.load_stats().unwrap(), UsageStats { total_tokens: 3 });
    assert!(app.state.content.ends_with("🤖 Assistant: Hi there!\n\n"));
}

#[test]
fn submit_while_streaming_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mock = MockBackend::from_text(&["one", " two", " three"]).with_delay(Duration::from_millis(40));
    let (mut app, mock) = app_with(mock, &dir);

    submit(&mut app, "first");
    thread::sleep(Duration::from_millis(60));
    app.tick(Instant::now());
    let pending = app.state.pending_response.clone();

    submit(&mut app, "second");
    assert_eq!(app.state.history.len(), 1);
    assert_eq!(app.state.pending_response, pending);
    assert_eq!(app.state.input, "second");

    wait_idle(&mut app);
    assert_eq!(app.state.history.len(), 2);
    assert_eq!(mock.stream_requests().len(), 1);
}

#[test]
fn empty_input_is_ignored() {
    let dir = TempDir::new().unwrap();
    let (mut app, mock) = app_with(MockBackend::from_text(&["x"]), &dir);

    submit(&mut app, "");
    submit(&mut app, "  ");
    assert_eq!(app.state.phase, Phase::Idle);
    assert!(app.state.history.is_empty());
    assert!(mock.stream_requests().is_empty());
}

#[test]
fn history_grows_by_two_per_turn_even_when_empty() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = app_with(MockBackend::new(Vec::new()), &dir);

    for i in 0..3 {
        submit(&mut app, &format!("turn {}", i));
        wait_idle(&mut app);
        assert_eq!(app.state.history.len(), 2 * (i + 1));
    }
    let last = app.state.history.last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert!(last.content.is_empty());
    assert_eq!(app.state.stats.get(), 0);
}

#[test]
fn mid_stream_failure_keeps_partial_response() {
    let dir = TempDir::new().unwrap();
    let mock = MockBackend::from_text(&["Hi", " there", "!"]).failing_after(2, "connection reset");
    let (mut app, _) = app_with(mock, &dir);

    submit(&mut app, "Hello");
    wait_idle(&mut app);

    assert_eq!(app.state.history.last(), Some(&Turn::assistant("Hi there")));
    assert_eq!(app.state.stats.get(), 2);
    assert!(app.state.last_warning.as_deref().unwrap().contains("connection reset"));
    assert_eq!(Store::new(dir.path()).load_history().unwrap().len(), 2);
}

#[test]
fn start_failure_aborts_the_turn() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = app_with(MockBackend::from_text(&["never"]).failing_start("refused"), &dir);

    submit(&mut app, "Hello");
    wait_idle(&mut app);

    assert_eq!(app.state.phase, Phase::Idle);
    assert_eq!(app.state.history, vec![Turn::user("Hello")]);
    assert!(app.state.last_warning.as_deref().unwrap().contains("refused"));
    assert!(app.state.throttle.last_flush().is_none());

    // The session carries on normally afterwards
    submit(&mut app, "again");
    assert_eq!(app.state.phase, Phase::Streaming);
    assert!(app.state.last_warning.is_none());
}

#[test]
fn stream_breaking_before_any_text_commits_an_empty_reply() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = app_with(MockBackend::from_text(&["Hi"]).failing_after(0, "connection reset"), &dir);

    submit(&mut app, "Hello");
    wait_idle(&mut app);

    assert_eq!(app.state.history, vec![Turn::user("Hello"), Turn::assistant("")]);
    assert_eq!(app.state.stats.get(), 0);
    assert!(app.state.last_warning.as_deref().unwrap().contains("connection reset"));
    assert_eq!(Store::new(dir.path()).load_history().unwrap().len(), 2);
}

#[test]
fn unwritable_store_does_not_stop_the_session() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"regular file").unwrap();

    let store = Store::new(blocker.join("l2"));
    let state = load_state(&store, "mock");
    let mut app = App::new(state, Arc::new(MockBackend::from_text(&["Hi", "!"])), store.clone());

    submit(&mut app, "Hello");
    wait_idle(&mut app);
    assert_eq!(app.state.phase, Phase::Idle);
    assert_eq!(app.state.history.len(), 2);
    assert!(store.load_history().is_err());

    submit(&mut app, "again");
    wait_idle(&mut app);
    assert_eq!(app.state.history.len(), 4);

    app.handle_action(Action::Quit);
    assert_eq!(app.state.phase, Phase::Exiting);
    assert_eq!(app.state.stats.get(), 4);
}

#[test]
fn tool_calls_are_annotated_and_recorded() {
    let dir = TempDir::new().unwrap();
    let script = vec![
        Fragment::Text("Saved ".into()),
        tool_call("add_lexicon_entry", json!({"word": "kala", "definition": "water"})),
        Fragment::Text("kala.".into()),
    ];
    let (mut app, _) = app_with(MockBackend::new(script), &dir);

    submit(&mut app, "add kala = water");
    wait_idle(&mut app);

    let reply = app.state.history.last().unwrap();
    assert_eq!(reply.content, "Saved \n[Tool Call: add_lexicon_entry]\nkala.");
    let calls = reply.tool_calls.as_ref().unwrap();
    assert_eq!(calls[0].name, "add_lexicon_entry");
    assert_eq!(app.state.stats.get(), 2);
}

#[test]
fn corrupted_history_starts_empty_and_proceeds() {
    let dir = TempDir::new().unwrap();
    Store::new(dir.path()).write(Record::Conversation, b"{ this is not json").unwrap();
    let (mut app, _) = app_with(MockBackend::from_text(&["ok"]), &dir);
    assert!(app.state.history.is_empty());

    submit(&mut app, "Hello");
    wait_idle(&mut app);
    assert_eq!(Store::new(dir.path()).load_history().unwrap().len(), 2);
}

#[test]
fn quit_mid_stream_persists_committed_history_only() {
    let dir = TempDir::new().unwrap();
    let mock = MockBackend::from_text(&["a", "b", "c", "d"]).with_delay(Duration::from_millis(50));
    let (mut app, _) = app_with(mock, &dir);

    submit(&mut app, "Hello");
    app.handle_action(Action::Quit);

    assert_eq!(app.state.phase, Phase::Exiting);
    let saved = Store::new(dir.path()).load_history().unwrap();
    assert_eq!(saved, vec![Turn::user("Hello")]);
}

#[test]
fn tokens_accumulate_across_launches() {
    let dir = TempDir::new().unwrap();
    {
        let (mut app, _) = app_with(MockBackend::from_text(&["a", "b"]), &dir);
        submit(&mut app, "one");
        wait_idle(&mut app);
        app.handle_action(Action::Quit);
    }
    let (mut app, _) = app_with(MockBackend::from_text(&["c"]), &dir);
    assert_eq!(app.state.stats.get(), 2);
    submit(&mut app, "two");
    wait_idle(&mut app);
    assert_eq!(app.state.stats.get(), 3);
}

#[test]
fn system_prompt_is_sent_but_never_displayed() {
    let dir = TempDir::new().unwrap();
    let store = Store::new(dir.path());
    let mock = Arc::new(MockBackend::from_text(&["ok"]));
    let mut state = State::new(Vec::new(), UsageStats::default(), "mock");
    state.ensure_system_prompt("You are a conlang assistant.");
    let mut app = App::new(state, mock.clone(), store);

    submit(&mut app, "hi");
    wait_idle(&mut app);

    let sent = &mock.stream_requests()[0];
    assert_eq!(sent[0], Turn::system("You are a conlang assistant."));
    assert!(!app.state.content.contains("conlang assistant"));
}
