use unicode_normalization::UnicodeNormalization;

/// Canonical form of text typed into the search box.
///
/// NFC only: compatibility folding would turn homonym superscripts (`bar²`)
/// into plain digits.
pub fn normalize_input(text: &str) -> String {
    text.replace(['\n', '\r'], " ").nfc().collect()
}

/// Upper-cased single letter, or `None` if `letter` is not exactly one character
pub fn normalize_letter(letter: &str) -> Option<String> {
    let mut chars = letter.trim().chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(first.to_uppercase().collect())
}
