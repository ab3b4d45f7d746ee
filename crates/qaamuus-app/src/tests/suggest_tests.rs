//! Autocomplete against a backend that answers out of order

use std::time::Duration;

use qaamuus_core::Action;
use qaamuus_core::browser::ids;
use qaamuus_types::{Key, PageTarget};

use super::support::{Harness, ScriptedApi, headwords};

#[tokio::test]
async fn test_late_response_for_older_keystroke_is_dropped() {
    let api = ScriptedApi::new().with_delay("suggest:a", Duration::from_millis(200));
    let harness = Harness::new(api, 5);

    harness.send(Action::Input("a".into())).await;
    harness.send(Action::Input("aa".into())).await;
    harness.wait_for(|s| !s.suggestions.is_empty()).await;

    tokio::time::sleep(Duration::from_millis(300)).await;
    let snapshot = harness.snapshot().await;
    assert_eq!(snapshot.suggestions, vec!["aabo", "aad", "aar"]);
    assert_eq!(snapshot.input, "aa");
}

#[tokio::test]
async fn test_keyboard_selection_runs_search() {
    let harness = Harness::new(ScriptedApi::new(), 5);
    harness.send(Action::Focus(ids::SEARCH_INPUT.into())).await;
    harness.send(Action::Input("aa".into())).await;
    harness.wait_for(|s| s.suggestions.len() == 3).await;

    harness.send(Action::Key(Key::Up)).await;
    harness.send(Action::Key(Key::Enter)).await;
    let snapshot = harness
        .wait_for(|s| s.mode.query() == Some("aar") && !s.loading)
        .await;

    assert!(snapshot.suggestions.is_empty());
    assert_eq!(headwords(&snapshot), vec!["aar"]);
    assert!(harness.api.calls().contains(&PageTarget::Search("aar".into()).to_string()));
}

#[tokio::test]
async fn test_escape_hides_list_and_keeps_text() {
    let harness = Harness::new(ScriptedApi::new(), 5);
    harness.send(Action::Focus(ids::SEARCH_INPUT.into())).await;
    harness.send(Action::Input("b".into())).await;
    harness.wait_for(|s| s.suggestions.len() == 2).await;

    harness.send(Action::Key(Key::Escape)).await;
    let snapshot = harness.wait_for(|s| s.suggestions.is_empty()).await;
    assert_eq!(snapshot.input, "b");
    assert_eq!(snapshot.selected_suggestion, None);
}
