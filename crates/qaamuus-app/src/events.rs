use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use qaamuus_api::DictionaryApi;
use qaamuus_core::{Action, Command};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::ui::UiEvent;

pub mod fetch;

use fetch::{fetch_entry, fetch_letters, fetch_page, fetch_suggestions};

/// App's main loop: every action goes through the browser, then the
/// resulting commands run and the new page state goes to the front end.
pub async fn event_loop(
    state: Arc<AppState>,
    api: Arc<dyn DictionaryApi>,
    ui_to_app_rx: AsyncReceiver<Action>,
    ui_to_app_tx: AsyncSender<Action>,
    app_to_ui_tx: AsyncSender<UiEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let action = tokio::select! {
            action = ui_to_app_rx.recv() => action?,
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Stopping");
                return Ok(());
            }
        };

        tracing::debug!("[EVENT_LOOP] {:?}", std::mem::discriminant(&action));
        let (commands, snapshot) = {
            let mut browser = state.browser.lock().await;
            let commands = browser.dispatch(action);
            (commands, browser.snapshot())
        };

        for command in commands {
            handle_command(command, &api, &ui_to_app_tx, &app_to_ui_tx).await?;
        }
        app_to_ui_tx.send(UiEvent::Render(snapshot)).await?;
    }
}

/// Fetches run as their own tasks and report back as actions, so a slow
/// response never holds up input handling.
async fn handle_command(
    command: Command,
    api: &Arc<dyn DictionaryApi>,
    ui_to_app_tx: &AsyncSender<Action>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    match command {
        Command::FetchPage(request) => {
            tokio::spawn(fetch_page(api.clone(), request, ui_to_app_tx.clone()));
        }
        Command::FetchSuggestions(request) => {
            tokio::spawn(fetch_suggestions(api.clone(), request, ui_to_app_tx.clone()));
        }
        Command::FetchLetters => {
            tokio::spawn(fetch_letters(api.clone(), ui_to_app_tx.clone()));
        }
        Command::FetchEntry(word) => {
            tokio::spawn(fetch_entry(api.clone(), word, ui_to_app_tx.clone()));
        }
        Command::ScrollToTop => app_to_ui_tx.send(UiEvent::ScrollToTop).await?,
    }
    Ok(())
}
