use once_cell::sync::Lazy;
use regex::Regex;

/// Morphology codes seen at the head of definitions: `m.`, `f.`, `m.dh`,
/// `f.mag2`, `g.<alnum>`.
// TODO: the printed dictionary's front matter lists more codes (verb classes,
// particles); extend once they are confirmed against the full entry table.
static POS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([mf]\.[a-z]*\d{0,2}|g\.[a-z0-9]+)(?:\s+|$)").expect("part-of-speech regex")
});

/// A definition split into its leading part-of-speech token and the rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionParts<'a> {
    pub pos: Option<&'a str>,
    pub body: &'a str,
}

pub fn split_pos(definition: &str) -> DefinitionParts<'_> {
    match POS_RE.captures(definition) {
        Some(caps) => {
            let token = caps.get(1).map(|m| m.as_str());
            let rest = caps.get(0).map_or(0, |m| m.end());
            DefinitionParts {
                pos: token,
                body: definition[rest..].trim(),
            }
        }
        None => DefinitionParts {
            pos: None,
            body: definition.trim(),
        },
    }
}
