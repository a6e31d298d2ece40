//! Script classification via static code-point range tables.
//!
//! String casing operations can vary with locale data; fixed ranges keep the
//! classification deterministic across platforms.

/// Whether a writing system distinguishes upper and lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptClass {
    /// Latin, Greek, Cyrillic and friends.
    Cased,
    /// Han, kana, Hangul, Arabic, and everything else without a case system.
    Uncased,
}

/// Tokens the capitalization checkers never flag, matched case-insensitively:
/// brand-style lowercase-leading names plus common acronyms.
pub const EXCEPTION_TOKENS: &[&str] = &[
    "iPhone", "iPad", "iPod", "eBay", "DJ", "TV", "USA", "UK", "NYC", "LA", "OK", "MC", "VIP",
    "R&B",
];

/// Classify one character's script, or `None` for non-letters.
pub fn char_script(c: char) -> Option<ScriptClass> {
    if !c.is_alphabetic() {
        return None;
    }

    match c {
        'A'..='Z' | 'a'..='z'
        | '\u{00C0}'..='\u{024F}'   // Latin-1 letters, Latin Extended-A/B
        | '\u{0370}'..='\u{03FF}'   // Greek and Coptic
        | '\u{1F00}'..='\u{1FFF}'   // Greek Extended
        | '\u{0400}'..='\u{052F}'   // Cyrillic + supplement
        => Some(ScriptClass::Cased),

        '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}'   // CJK extension A
        | '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}'   // Katakana
        | '\u{AC00}'..='\u{D7AF}'   // Hangul syllables
        | '\u{1100}'..='\u{11FF}'   // Hangul Jamo
        | '\u{0600}'..='\u{06FF}'   // Arabic
        | '\u{0590}'..='\u{05FF}'   // Hebrew
        | '\u{0E00}'..='\u{0E7F}'   // Thai
        | '\u{0900}'..='\u{097F}'   // Devanagari
        => Some(ScriptClass::Uncased),

        // Uncatalogued alphabetic scripts: treat as case-less so the
        // case-gated rules stay quiet rather than misfire.
        _ => Some(ScriptClass::Uncased),
    }
}

/// Classify a line by its first alphabetic character.
pub fn line_script(text: &str) -> Option<ScriptClass> {
    text.chars().find_map(char_script)
}

/// Does `text` begin with an allow-listed exception token?
///
/// The token must end at a word boundary: "eBay's" matches, "ebayish" does not.
pub fn matches_exception(text: &str) -> bool {
    EXCEPTION_TOKENS.iter().any(|tok| {
        let Some(head) = text.get(..tok.len()) else {
            return false;
        };
        if !head.eq_ignore_ascii_case(tok) {
            return false;
        }
        match text[tok.len()..].chars().next() {
            None => true,
            Some(c) => !c.is_alphanumeric(),
        }
    })
}

/// Is `word` exactly an allow-listed exception token?
pub fn is_exception(word: &str) -> bool {
    EXCEPTION_TOKENS.iter().any(|tok| tok.eq_ignore_ascii_case(word))
}
