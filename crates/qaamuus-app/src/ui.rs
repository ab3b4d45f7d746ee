use std::io::Write;
use std::sync::Arc;

use kanal::AsyncReceiver;
use qaamuus_config::Config;
use qaamuus_core::Snapshot;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::view::render_snapshot;

/// Messages from the event loop to the front end
#[derive(Debug, Clone)]
pub enum UiEvent {
    Render(Snapshot),
    ScrollToTop,
}

/// Prints a frame whenever the page changes
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<UiEvent>,
    config: Arc<RwLock<Config>>,
    color: bool,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let messages = config.read().await.ui.messages.clone();
    let mut last: Option<Snapshot> = None;

    loop {
        let event = tokio::select! {
            event = app_to_ui_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::info!("[UI] Stopping");
                return Ok(());
            }
        };

        match event {
            UiEvent::Render(snapshot) => {
                if last.as_ref() == Some(&snapshot) {
                    continue;
                }
                let frame = render_snapshot(&snapshot, &messages, color);
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{frame}")?;
                stdout.flush()?;
                last = Some(snapshot);
            }
            UiEvent::ScrollToTop => {
                tracing::debug!("[UI] Scroll to top");
                if color {
                    print!("\x1b[2J\x1b[H");
                }
                // force the next frame out even if nothing else changed
                last = None;
            }
        }
    }
}
