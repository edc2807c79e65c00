//! Text normalization applied to every extracted document

/// Normalize line endings and typographic characters while keeping line structure.
///
/// The field heuristics split on `\n` and look for blank lines, so carriage
/// returns are folded into plain newlines here.
pub fn normalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    unified
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{00A0}' => ' ',
            _ => c,
        })
        .collect()
}
