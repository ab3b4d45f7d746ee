//! Markup decoration for headwords and definitions.
//!
//! Source text is HTML-escaped first. Then two passes run, both restricted to
//! text outside of tags and entities so that neither pass can corrupt markup
//! produced by the other:
//! 1. `eeg <word>` cross-reference markers become reference links.
//! 2. Case-insensitive occurrences of the query are wrapped in `<mark>`.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};

/// Class carried by every reference link
pub const REFERENCE_CLASS: &str = "ref-link";

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([Ee]eg)(\s+)([\p{L}\p{N}’ʼʻ'′()]+)").expect("reference marker regex")
});

/// Tags and character entities; everything else is visible text
static MARKUP_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>|&(?:[a-z]+|#[0-9]+);").expect("markup token regex")
});

static REFERENCE_TARGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"data-word="([^"]*)""#).expect("reference target regex")
});

/// Escape plain text, link cross-references, then emphasize `query`
pub fn highlight(text: &str, query: &str) -> String {
    decorate(&escape_html(text), query)
}

/// Both decoration passes over text that is already markup
pub fn decorate(markup: &str, query: &str) -> String {
    emphasize(&link_references(markup), query)
}

pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>', '&']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    )
}

/// Rewrite every `eeg <word>` so the word becomes a reference link
pub fn link_references(markup: &str) -> String {
    map_text_segments(markup, |segment| {
        REFERENCE_RE.replace_all(segment, |caps: &Captures| {
            let token = &caps[3];
            let target = reference_target(token);
            if target.is_empty() {
                return caps[0].to_string();
            }
            format!(
                r##"{}{}<a href="#" class="{}" data-word="{}">{}</a>"##,
                &caps[1], &caps[2], REFERENCE_CLASS, target, token
            )
        })
    })
}

/// Wrap case-insensitive occurrences of `query` in `<mark>`.
///
/// Identity when the query is blank.
pub fn emphasize(markup: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return markup.to_string();
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::warn!("[HIGHLIGHT] Unusable query {:?}: {}", query, e);
            return markup.to_string();
        }
    };

    map_text_segments(markup, |segment| pattern.replace_all(segment, "<mark>$0</mark>"))
}

/// Keep the first `max_chars` visible characters of `markup`, adding an
/// ellipsis when anything was dropped.
///
/// An entity counts as one character. A cut never lands inside a reference
/// link: a link that starts before the limit is kept whole.
pub fn truncate_markup(markup: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut shown = 0;
    let mut in_link = false;
    let mut last = 0;

    let mut units = Vec::new();
    for token in MARKUP_TOKEN_RE.find_iter(markup) {
        units.extend(markup[last..token.start()].char_indices().map(|(i, c)| {
            let start = last + i;
            (&markup[start..start + c.len_utf8()], true)
        }));
        let text = token.as_str();
        units.push((text, text.starts_with('&')));
        last = token.end();
    }
    units.extend(markup[last..].char_indices().map(|(i, c)| {
        let start = last + i;
        (&markup[start..start + c.len_utf8()], true)
    }));

    for (text, visible) in units {
        if shown >= max_chars && !in_link {
            let kept = out.trim_end().len();
            out.truncate(kept);
            out.push('…');
            return out;
        }
        if visible {
            shown += 1;
        } else if text.starts_with("</a") {
            in_link = false;
        } else if text.starts_with("<a ") || text == "<a>" {
            in_link = true;
        }
        out.push_str(text);
    }
    out
}

/// Headwords referenced by links in `markup`, in order of appearance
pub fn reference_targets(markup: &str) -> Vec<String> {
    REFERENCE_TARGET_RE
        .captures_iter(markup)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Headword form of a reference token: surrounding parentheses and homonym
/// numbers are dropped, and the result is lower-cased like stored headwords.
fn reference_target(token: &str) -> String {
    token
        .trim_start_matches(|c: char| c == '(' || c.is_ascii_digit())
        .trim_end_matches(|c: char| c == ')' || c.is_ascii_digit() || is_superscript_digit(c))
        .to_lowercase()
}

fn is_superscript_digit(c: char) -> bool {
    matches!(c, '¹' | '²' | '³' | '⁰' | '⁴'..='⁹')
}

/// Apply `f` to the text between tags and entities, copying those through untouched
fn map_text_segments<'a, F>(markup: &'a str, mut f: F) -> String
where
    F: FnMut(&'a str) -> Cow<'a, str>,
{
    let mut out = String::with_capacity(markup.len());
    let mut last = 0;

    for token in MARKUP_TOKEN_RE.find_iter(markup) {
        out.push_str(&f(&markup[last..token.start()]));
        out.push_str(token.as_str());
        last = token.end();
    }
    out.push_str(&f(&markup[last..]));

    out
}
