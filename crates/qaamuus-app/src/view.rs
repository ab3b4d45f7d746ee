//! Plain-text rendering of a [`Snapshot`] for the console front end.

use std::fmt::Write;

use qaamuus_config::Messages;
use qaamuus_core::overlay::ModalContent;
use qaamuus_core::{BrowseMode, Card, Placeholder, Snapshot};

const BOLD: &str = "\x1b[1m";
const UNDERLINE: &str = "\x1b[4m";
const RESET: &str = "\x1b[0m";

pub fn render_snapshot(snapshot: &Snapshot, messages: &Messages, color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "search> {}", snapshot.input);
    for (i, item) in snapshot.suggestions.iter().enumerate() {
        let marker = if snapshot.selected_suggestion == Some(i) { '>' } else { ' ' };
        let _ = writeln!(out, "  {marker} {item}");
    }

    if !snapshot.letters.is_empty() {
        let _ = writeln!(out, "letters: {}", snapshot.letters.join(" "));
    }

    let _ = writeln!(out, "-- {} --", describe_mode(&snapshot.mode));
    for (i, card) in snapshot.cards.iter().enumerate() {
        write_card(&mut out, i + 1, card, color);
    }

    match &snapshot.placeholder {
        Some(Placeholder::NoResults(text)) | Some(Placeholder::Error(text)) => {
            let _ = writeln!(out, "{text}");
        }
        None if snapshot.loading && snapshot.cards.is_empty() => {
            let _ = writeln!(out, "{}", messages.loading);
        }
        None => {}
    }
    if let Some(status) = &snapshot.status {
        let _ = writeln!(out, "{status}");
    }

    if let Some(modal) = &snapshot.modal {
        write_modal(&mut out, modal, color);
    }
    if snapshot.drawer_open {
        let _ = writeln!(out, "[menu open]");
    }

    out
}

fn describe_mode(mode: &BrowseMode) -> String {
    match mode {
        BrowseMode::AllWords => "all words".to_string(),
        BrowseMode::Search { query } => format!("search {query:?}"),
        BrowseMode::Letter { letter } => format!("letter {letter}"),
    }
}

fn write_card(out: &mut String, number: usize, card: &Card, color: bool) {
    let pos = card.pos.as_deref().map(|p| format!(" ({p})")).unwrap_or_default();
    let body = if card.expanded {
        &card.full_definition
    } else {
        &card.preview
    };
    let _ = writeln!(
        out,
        "{number:>3}. {}{pos} {}",
        card.headword,
        markup_to_text(body, color)
    );
}

fn write_modal(out: &mut String, modal: &ModalContent, color: bool) {
    let pos = modal.pos.as_deref().map(|p| format!(" ({p})")).unwrap_or_default();
    let _ = writeln!(out, "==== {}{pos} ====", modal.headword);
    let _ = writeln!(out, "{}", markup_to_text(&modal.definition, color));

    let Some(detail) = &modal.detail else {
        return;
    };
    if let (Some(page), Some(column)) = (detail.page, detail.column) {
        let _ = writeln!(out, "page {page}, column {column}");
    }
    for (label, words) in [
        ("cross references", &detail.cross_refs),
        ("see also", &detail.see_also),
        ("referred by", &detail.referred_by),
        ("similar", &detail.similar),
    ] {
        if !words.is_empty() {
            let _ = writeln!(out, "{label}: {}", words.join(", "));
        }
    }
}

/// Strip markup, showing `<mark>` as bold and reference links as `[word]`
pub fn markup_to_text(markup: &str, color: bool) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        push_decoded(&mut out, &rest[..start]);
        let Some(len) = rest[start..].find('>') else {
            push_decoded(&mut out, &rest[start..]);
            return out;
        };
        let tag = &rest[start + 1..start + len];
        match tag.split_whitespace().next().unwrap_or_default() {
            "mark" if color => out.push_str(BOLD),
            "/mark" if color => out.push_str(RESET),
            "a" => out.push_str(if color { UNDERLINE } else { "[" }),
            "/a" => out.push_str(if color { RESET } else { "]" }),
            _ => {}
        }
        rest = &rest[start + len + 1..];
    }
    push_decoded(&mut out, rest);
    out
}

/// Append text with the escapes produced by the highlighter undone
fn push_decoded(out: &mut String, text: &str) {
    if !text.contains('&') {
        out.push_str(text);
        return;
    }
    out.push_str(
        &text
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&"),
    );
}
