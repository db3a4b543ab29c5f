// src/dna/code.rs

use super::ReadingDna;

/// Short display code for a child's reading DNA.
///
/// Initials of the base type's words, then `-` and the modifier letters in
/// their given order: `curious_investigator` -> `CI`, `social_connector`
/// with `[S, F]` -> `SC-SF`. Returns `"Unknown"` when there is no type.
pub fn format_dna_code(reading_dna: Option<&ReadingDna>) -> String {
    let Some(dna_type) = reading_dna.and_then(|dna| dna.dna_type) else {
        return "Unknown".to_string();
    };

    let mut code: String = dna_type
        .as_str()
        .split('_')
        .filter_map(|word| word.chars().next())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let modifiers = reading_dna.map(|dna| dna.modifiers.codes()).unwrap_or_default();
    if !modifiers.is_empty() {
        code.push('-');
        code.push_str(&modifiers);
    }

    code
}
