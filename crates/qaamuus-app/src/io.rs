use std::io::BufRead;

use kanal::AsyncSender;
use qaamuus_core::Action;
use qaamuus_core::browser::ids;
use qaamuus_types::Key;
use tokio_util::sync::CancellationToken;

/// Reads console lines and forwards them as page actions.
///
/// Stdin is read on a plain thread so that a pending read never holds up
/// runtime shutdown.
pub async fn console_io(
    cancel: CancellationToken,
    ui_to_app_tx: AsyncSender<Action>,
) -> anyhow::Result<()> {
    let (line_tx, line_rx) = kanal::bounded::<String>(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    let line_rx = line_rx.to_async();

    loop {
        let line = tokio::select! {
            line = line_rx.recv() => line,
            _ = cancel.cancelled() => {
                tracing::info!("[IO] Console reader stopping");
                return Ok(());
            }
        };
        let Ok(line) = line else {
            tracing::info!("[IO] Console closed");
            return Ok(());
        };

        match parse_command(&line) {
            Ok(actions) => {
                for action in actions {
                    ui_to_app_tx.send(action).await?;
                }
            }
            Err(message) => eprintln!("{message}"),
        }
    }
}

/// Translate one console line into the gestures it stands for.
///
/// Plain text replaces the search box content and focuses it, as typing would.
pub fn parse_command(line: &str) -> Result<Vec<Action>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix('/') else {
        return Ok(vec![
            Action::Focus(ids::SEARCH_INPUT.into()),
            Action::Input(line.to_string()),
        ]);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let action = match (name, arg) {
        ("all", _) => Action::ShowAll,
        ("search", "") => Action::Submit,
        ("search", query) => return Ok(vec![Action::Input(query.to_string()), Action::Submit]),
        ("letter", letter) if !letter.is_empty() => Action::LetterClicked(letter.to_string()),
        ("more", _) => Action::LoadMore,
        ("open", target) if !target.is_empty() => match target.parse::<usize>() {
            Ok(number) if number > 0 => Action::OpenEntry(number - 1),
            _ => Action::OpenWord(target.to_string()),
        },
        ("toggle", number) => Action::ToggleCard(card_index(number)?),
        ("close", _) => Action::CloseEntry,
        ("ref", word) if !word.is_empty() => Action::ReferenceActivated(word.to_string()),
        ("pick", number) => Action::SuggestionClicked(card_index(number)?),
        ("menu", _) => Action::OpenNav,
        ("down", _) => Action::Key(Key::Down),
        ("up", _) => Action::Key(Key::Up),
        ("enter", _) => Action::Key(Key::Enter),
        ("esc", _) => Action::Key(Key::Escape),
        ("tab", _) => Action::Key(Key::Tab),
        ("backtab", _) => Action::Key(Key::ShiftTab),
        ("click", id) if !id.is_empty() => Action::Click(id.into()),
        _ => return Err(format!("unknown command: {line}")),
    };
    Ok(vec![action])
}

fn card_index(number: &str) -> Result<usize, String> {
    match number.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("expected a number from 1, got {number:?}")),
    }
}
