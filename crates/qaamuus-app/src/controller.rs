use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use qaamuus_api::DictionaryApi;
use qaamuus_core::Action;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::console_io;
use crate::state::AppState;
use crate::ui::{UiEvent, ui_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>),
    pub ui_to_app: (AsyncSender<Action>, AsyncReceiver<Action>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            // user input and fetch results share this queue
            ui_to_app: kanal::bounded_async(256),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender for injecting actions, e.g. the initial `Start`
    pub fn actions(&self) -> AsyncSender<Action> {
        self.channels.ui_to_app.0.clone()
    }

    /// The event loop on its own; the caller owns the front end side
    pub fn spawn_event_loop(
        &self,
        tasks: &mut JoinSet<anyhow::Result<()>>,
        api: Arc<dyn DictionaryApi>,
    ) -> AsyncReceiver<UiEvent> {
        tasks.spawn(event_loop(
            self.state.clone(),
            api,
            self.channels.ui_to_app.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));
        self.channels.app_to_ui.1.clone()
    }

    pub fn spawn_tasks(&self, api: Arc<dyn DictionaryApi>, color: bool) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        let app_to_ui_rx = self.spawn_event_loop(&mut tasks, api);

        // UI loop
        tasks.spawn(ui_loop(
            app_to_ui_rx,
            self.state.config.clone(),
            color,
            self.cancel_token.child_token(),
        ));

        // Console input
        tasks.spawn(console_io(
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
