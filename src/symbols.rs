// src/symbols.rs
// Character <-> dot/dash pattern mapping with a built-in fallback alphabet.

use std::collections::HashMap;

use crate::error::{MorseError, Result};

/// The standard letters and digits, used as a fallback whenever a table does
/// not define a character itself.
const ALPHABET: &[(char, &str)] = &[
    ('a', ".-"),
    ('b', "-..."),
    ('c', "-.-."),
    ('d', "-.."),
    ('e', "."),
    ('f', "..-."),
    ('g', "--."),
    ('h', "...."),
    ('i', ".."),
    ('j', ".---"),
    ('k', "-.-"),
    ('l', ".-.."),
    ('m', "--"),
    ('n', "-."),
    ('o', "---"),
    ('p', ".--."),
    ('q', "--.-"),
    ('r', ".-."),
    ('s', "..."),
    ('t', "-"),
    ('u', "..-"),
    ('v', "...-"),
    ('w', ".--"),
    ('x', "-..-"),
    ('y', "-.--"),
    ('z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
];

/// Bidirectional mapping between characters and dot/dash patterns.
///
/// Lookups consult the table's own entries first and fall back to the
/// built-in alphabet, so a table only needs to define the exotic characters
/// it cares about. Both directions are enforced unique at insertion time.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    by_char: HashMap<char, String>,
    by_pattern: HashMap<String, char>,
}

impl SymbolTable {
    /// An empty table. Lookups still fall back to the built-in alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of custom entries, not counting the fallback alphabet.
    pub fn len(&self) -> usize {
        self.by_char.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_char.is_empty()
    }

    fn check_pattern(pattern: &str) -> Result<()> {
        if pattern.is_empty() || !pattern.chars().all(|c| c == '.' || c == '-') {
            return Err(MorseError::InvalidPattern(pattern.to_string()));
        }
        Ok(())
    }

    /// Inserts a character/pattern pair. A clash on either side is reported
    /// as `DuplicateSymbol` rather than silently overwriting, so callers can
    /// treat an existing entry as non-fatal.
    pub fn insert(&mut self, character: char, pattern: &str) -> Result<()> {
        Self::check_pattern(pattern)?;
        if self.by_char.contains_key(&character) {
            return Err(MorseError::DuplicateSymbol(character.to_string()));
        }
        if self.by_pattern.contains_key(pattern) {
            return Err(MorseError::DuplicateSymbol(pattern.to_string()));
        }
        self.by_char.insert(character, pattern.to_string());
        self.by_pattern.insert(pattern.to_string(), character);
        Ok(())
    }

    /// Pattern for `character`. Tries the character as given, then its
    /// ASCII-lowercase form, then the fallback alphabet.
    pub fn pattern_for(&self, character: char) -> Result<&str> {
        if let Some(pattern) = self.by_char.get(&character) {
            return Ok(pattern);
        }
        let lower = character.to_ascii_lowercase();
        if let Some(pattern) = self.by_char.get(&lower) {
            return Ok(pattern);
        }
        ALPHABET
            .iter()
            .find(|(c, _)| *c == lower)
            .map(|(_, pattern)| *pattern)
            .ok_or_else(|| MorseError::SymbolNotFound(character.to_string()))
    }

    /// Character for `pattern`. Exact sequence match only, no fuzzy lookup.
    pub fn char_for(&self, pattern: &str) -> Result<char> {
        if let Some(&character) = self.by_pattern.get(pattern) {
            return Ok(character);
        }
        ALPHABET
            .iter()
            .find(|(_, p)| *p == pattern)
            .map(|(c, _)| *c)
            .ok_or_else(|| MorseError::SymbolNotFound(pattern.to_string()))
    }

    /// Converts `text` into one pattern per character. A space becomes a
    /// single blank entry when `with_blanks` is set and is skipped
    /// otherwise.
    pub fn text_to_patterns(&self, text: &str, with_blanks: bool) -> Result<Vec<String>> {
        let mut patterns = Vec::with_capacity(text.len());
        for character in text.chars() {
            if character == ' ' {
                if with_blanks {
                    patterns.push(" ".to_string());
                }
                continue;
            }
            patterns.push(self.pattern_for(character)?.to_string());
        }
        Ok(patterns)
    }

    /// Inverse of [`SymbolTable::text_to_patterns`]: blank entries become
    /// spaces when `with_blanks` is set and are skipped otherwise.
    pub fn patterns_to_text(&self, patterns: &[String], with_blanks: bool) -> Result<String> {
        let mut text = String::with_capacity(patterns.len());
        for pattern in patterns {
            if pattern == " " {
                if with_blanks {
                    text.push(' ');
                }
                continue;
            }
            text.push(self.char_for(pattern)?);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_fallback_lookup() {
        let table = SymbolTable::new();
        assert_eq!(table.pattern_for('a').unwrap(), ".-");
        assert_eq!(table.pattern_for('A').unwrap(), ".-");
        assert_eq!(table.char_for("-.-.").unwrap(), 'c');
        assert_eq!(table.char_for("-----").unwrap(), '0');
    }

    #[test]
    fn custom_entry_wins_over_alphabet() {
        let mut table = SymbolTable::new();
        table.insert('a', "....--").unwrap();
        assert_eq!(table.pattern_for('a').unwrap(), "....--");
        // The alphabet pattern still resolves in the other direction.
        assert_eq!(table.char_for(".-").unwrap(), 'a');
    }

    #[test]
    fn unknown_character_is_symbol_not_found() {
        let table = SymbolTable::new();
        let err = table.pattern_for('!').unwrap_err();
        assert!(matches!(err, MorseError::SymbolNotFound(_)));
        let err = table.char_for(".......").unwrap_err();
        assert!(matches!(err, MorseError::SymbolNotFound(_)));
    }

    #[test]
    fn duplicate_insertion_is_typed() {
        let mut table = SymbolTable::new();
        table.insert('@', ".--.-.").unwrap();
        let err = table.insert('@', "-----.").unwrap_err();
        assert!(matches!(err, MorseError::DuplicateSymbol(_)));
        let err = table.insert('#', ".--.-.").unwrap_err();
        assert!(matches!(err, MorseError::DuplicateSymbol(_)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn insert_rejects_foreign_symbols() {
        let mut table = SymbolTable::new();
        let err = table.insert('x', ".-x").unwrap_err();
        assert!(matches!(err, MorseError::InvalidPattern(_)));
        let err = table.insert('x', "").unwrap_err();
        assert!(matches!(err, MorseError::InvalidPattern(_)));
    }

    #[test]
    fn text_to_patterns_with_blanks() {
        let table = SymbolTable::new();
        let patterns = table.text_to_patterns("i l p", true).unwrap();
        assert_eq!(patterns, vec!["..", " ", ".-..", " ", ".--."]);
    }

    #[test]
    fn text_to_patterns_without_blanks() {
        let table = SymbolTable::new();
        let patterns = table.text_to_patterns("i l p", false).unwrap();
        assert_eq!(patterns, vec!["..", ".-..", ".--."]);
    }

    #[test]
    fn patterns_to_text_round_trip() {
        let table = SymbolTable::new();
        let patterns: Vec<String> = vec!["..", " ", ".-..", " ", ".--."]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(table.patterns_to_text(&patterns, true).unwrap(), "i l p");
        assert_eq!(table.patterns_to_text(&patterns, false).unwrap(), "ilp");
    }
}
