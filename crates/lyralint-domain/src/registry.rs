//! The rule catalogue and its checkers.
//!
//! Every rule is one variant of [`lyralint_types::RuleCode`]; dispatch is an
//! exhaustive match, so adding a code without a checker fails to compile.
//! Checkers are pure functions over one line's clean text plus its script
//! classification; they never see neighbouring lines or mutate anything.

use lyralint_types::{RuleCode, Severity};
use regex::Regex;

use crate::clean::CleanText;
use crate::script::{char_script, is_exception, line_script, matches_exception, ScriptClass};

/// Static registry entry for one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub code: RuleCode,
    pub category: &'static str,
    pub severity: Severity,
    pub message: &'static str,
}

/// The full catalogue, in the stable order checks run and diagnostics are
/// emitted per line.
pub static REGISTRY: [RuleDescriptor; 22] = [
    RuleDescriptor {
        code: RuleCode::Cap001,
        category: "capitalization",
        severity: Severity::Error,
        message: "First letter must be capitalized",
    },
    RuleDescriptor {
        code: RuleCode::Cap002,
        category: "capitalization",
        severity: Severity::Error,
        message: "Don't use all caps for emphasis",
    },
    RuleDescriptor {
        code: RuleCode::Cap003,
        category: "capitalization",
        severity: Severity::Error,
        message: "Don't capitalize every word (title case)",
    },
    RuleDescriptor {
        code: RuleCode::Pct001,
        category: "punctuation",
        severity: Severity::Error,
        message: "Don't end lines with commas",
    },
    RuleDescriptor {
        code: RuleCode::Pct002,
        category: "punctuation",
        severity: Severity::Error,
        message: "Don't end lines with periods (unless acronym)",
    },
    RuleDescriptor {
        code: RuleCode::Pct003,
        category: "punctuation",
        severity: Severity::Error,
        message: "Don't use multiple punctuation marks",
    },
    RuleDescriptor {
        code: RuleCode::Pct004,
        category: "punctuation",
        severity: Severity::Error,
        message: "Remove space before punctuation",
    },
    RuleDescriptor {
        code: RuleCode::Pct005,
        category: "punctuation",
        severity: Severity::Error,
        message: "Add space after punctuation",
    },
    RuleDescriptor {
        code: RuleCode::Fmt001,
        category: "formatting",
        severity: Severity::Error,
        message: "Remove multiple consecutive spaces",
    },
    RuleDescriptor {
        code: RuleCode::Fmt002,
        category: "formatting",
        severity: Severity::Error,
        message: "Remove leading/trailing spaces",
    },
    RuleDescriptor {
        code: RuleCode::Fmt003,
        category: "formatting",
        severity: Severity::Error,
        message: "Use straight quotes (\") instead of smart quotes",
    },
    RuleDescriptor {
        code: RuleCode::Fmt004,
        category: "formatting",
        severity: Severity::Warning,
        message: "Use three dots (...) instead of the ellipsis character",
    },
    RuleDescriptor {
        code: RuleCode::Fmt005,
        category: "formatting",
        severity: Severity::Warning,
        message: "Consider splitting multi-line lyrics into separate events",
    },
    RuleDescriptor {
        code: RuleCode::Fmt006,
        category: "formatting",
        severity: Severity::Error,
        message: "Remove styling override tags (karaoke timing tags are fine)",
    },
    RuleDescriptor {
        code: RuleCode::Spc001,
        category: "special-characters",
        severity: Severity::Error,
        message: "Don't use brackets in lyrics",
    },
    RuleDescriptor {
        code: RuleCode::Spc002,
        category: "special-characters",
        severity: Severity::Error,
        message: "Don't censor with asterisks; use a hyphen if the audio is censored (e.g. 'f-')",
    },
    RuleDescriptor {
        code: RuleCode::Num001,
        category: "numbers",
        severity: Severity::Error,
        message: "Write numbers over 10 numerically, not as words",
    },
    RuleDescriptor {
        code: RuleCode::Mul001,
        category: "multipliers",
        severity: Severity::Error,
        message: "Don't use multipliers like (x5); transcribe repetitions fully",
    },
    RuleDescriptor {
        code: RuleCode::Nvc001,
        category: "non-vocal",
        severity: Severity::Error,
        message: "Don't include structure labels like (Verse - Artist)",
    },
    RuleDescriptor {
        code: RuleCode::Nvc002,
        category: "non-vocal",
        severity: Severity::Error,
        message: "Don't include sound effect descriptions like *dial tone*",
    },
    RuleDescriptor {
        code: RuleCode::Dsp001,
        category: "direct-speech",
        severity: Severity::Warning,
        message: "Direct speech should follow a comma: text, \"Speech\"",
    },
    RuleDescriptor {
        code: RuleCode::Dsp002,
        category: "direct-speech",
        severity: Severity::Error,
        message: "Direct speech must start with a capital letter",
    },
];

/// Look up the descriptor for a code.
pub fn descriptor(code: RuleCode) -> &'static RuleDescriptor {
    // REGISTRY is in RuleCode::ALL order; fall back to a scan if ever not.
    let idx = code as usize;
    if REGISTRY.get(idx).map(|d| d.code) == Some(code) {
        &REGISTRY[idx]
    } else {
        REGISTRY
            .iter()
            .find(|d| d.code == code)
            .expect("every RuleCode has a registry entry")
    }
}

/// One checker hit: the rule plus a short excerpt around the offending span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub code: RuleCode,
    pub context: String,
}

/// One line's checkable view: clean text plus derived classification.
#[derive(Debug, Clone, Copy)]
pub struct CleanLine<'a> {
    pub text: &'a str,
    pub script: Option<ScriptClass>,
    pub had_line_break: bool,
    pub foreign_tags: &'a [String],
}

impl<'a> CleanLine<'a> {
    pub fn from_clean(clean: &'a CleanText) -> Self {
        Self {
            text: &clean.text,
            script: line_script(&clean.text),
            had_line_break: clean.had_line_break,
            foreign_tags: &clean.foreign_tags,
        }
    }

    fn is_cased(&self) -> bool {
        self.script == Some(ScriptClass::Cased)
    }
}

/// All regexes the checkers need, compiled once per run.
#[derive(Debug)]
pub struct CompiledChecks {
    acronym_end: Regex,
    space_before_punct: Regex,
    no_space_after_punct: Regex,
    censoring: Regex,
    number_word: Regex,
    multiplier: Regex,
    structure_label: Regex,
    sound_wrapped: Regex,
    sound_vocab: Regex,
    quote_then_upper: Regex,
    comma_before_quote: Regex,
    quoted_span: Regex,
}

impl CompiledChecks {
    pub fn compile() -> Self {
        // Patterns are static; a failure here is a programming error.
        let rx = |p: &str| Regex::new(p).expect("static pattern should compile");
        Self {
            acronym_end: rx(r"[A-Z]\.$"),
            space_before_punct: rx(r"\s+[,.!?;:]"),
            no_space_after_punct: rx(r"[,.!?;:][a-zA-Z]"),
            censoring: rx(r"\*\*+"),
            number_word: rx(
                r"(?i)\b(eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety|hundred|thousand|million)\b",
            ),
            multiplier: rx(r"\([xX×]\s*\d+\)"),
            structure_label: rx(r"(?i)\((Verse|Chorus|Bridge|Intro|Outro|Hook|Pre-Chorus)[\s\-]"),
            sound_wrapped: rx(r"\*([^*]+)\*"),
            sound_vocab: rx(
                r"(?i)\b(dial|tone|ring|beep|buzz|static|click|applause|laugh|laughter|noise|horn|siren|crash|thunder|phone|whistle)\b",
            ),
            quote_then_upper: rx(r#""[A-Z]"#),
            comma_before_quote: rx(r#",\s*"[A-Z]"#),
            quoted_span: rx(r#""([^"]+)""#),
        }
    }

    /// Run one rule against one line. Findings come back in text order.
    pub fn run(&self, code: RuleCode, line: &CleanLine) -> Vec<Finding> {
        match code {
            RuleCode::Cap001 => self.cap001(line),
            RuleCode::Cap002 => self.cap002(line),
            RuleCode::Cap003 => self.cap003(line),
            RuleCode::Pct001 => self.pct001(line),
            RuleCode::Pct002 => self.pct002(line),
            RuleCode::Pct003 => self.pct003(line),
            RuleCode::Pct004 => self.pct004(line),
            RuleCode::Pct005 => self.pct005(line),
            RuleCode::Fmt001 => self.fmt001(line),
            RuleCode::Fmt002 => self.fmt002(line),
            RuleCode::Fmt003 => self.fmt003(line),
            RuleCode::Fmt004 => self.fmt004(line),
            RuleCode::Fmt005 => self.fmt005(line),
            RuleCode::Fmt006 => self.fmt006(line),
            RuleCode::Spc001 => self.spc001(line),
            RuleCode::Spc002 => self.spc002(line),
            RuleCode::Num001 => self.num001(line),
            RuleCode::Mul001 => self.mul001(line),
            RuleCode::Nvc001 => self.nvc001(line),
            RuleCode::Nvc002 => self.nvc002(line),
            RuleCode::Dsp001 => self.dsp001(line),
            RuleCode::Dsp002 => self.dsp002(line),
        }
    }

    // ── Capitalization ─────────────────────────────────────────────

    fn cap001(&self, line: &CleanLine) -> Vec<Finding> {
        if !line.is_cased() {
            return vec![];
        }
        let t = line.text.trim_start();
        let Some(first) = t.chars().next() else {
            return vec![];
        };
        if !first.is_alphabetic()
            || char_script(first) != Some(ScriptClass::Cased)
            || first.is_uppercase()
            || matches_exception(t)
        {
            return vec![];
        }
        vec![finding(RuleCode::Cap001, t, 0)]
    }

    fn cap002(&self, line: &CleanLine) -> Vec<Finding> {
        if !line.is_cased() {
            return vec![];
        }
        let mut shouted = 0usize;
        for word in line.text.split_whitespace() {
            let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
            if letters.len() < 2 {
                continue;
            }
            if letters.iter().any(|&c| char_script(c) != Some(ScriptClass::Cased)) {
                continue;
            }
            let core: String = letters.iter().collect();
            if is_exception(&core) {
                continue;
            }
            if letters.iter().all(|c| c.is_uppercase()) {
                shouted += 1;
            } else {
                // A normally-cased word anywhere means the line is not shouting.
                return vec![];
            }
        }
        if shouted > 0 {
            vec![finding(RuleCode::Cap002, line.text, 0)]
        } else {
            vec![]
        }
    }

    fn cap003(&self, line: &CleanLine) -> Vec<Finding> {
        if !line.is_cased() {
            return vec![];
        }
        let long_words: Vec<&str> = line
            .text
            .split_whitespace()
            .filter(|w| w.chars().count() > 3 && w.chars().all(|c| c.is_alphabetic()))
            .collect();
        if long_words.len() <= 2 {
            return vec![];
        }
        let all_capitalized = long_words.iter().all(|w| {
            w.chars()
                .next()
                .map(|c| c.is_uppercase())
                .unwrap_or(false)
        });
        if all_capitalized {
            vec![finding(RuleCode::Cap003, line.text, 0)]
        } else {
            vec![]
        }
    }

    // ── Punctuation ────────────────────────────────────────────────

    fn pct001(&self, line: &CleanLine) -> Vec<Finding> {
        let t = line.text.trim_end();
        if t.ends_with(',') || t.ends_with('、') {
            vec![finding(RuleCode::Pct001, t, t.len().saturating_sub(1))]
        } else {
            vec![]
        }
    }

    fn pct002(&self, line: &CleanLine) -> Vec<Finding> {
        let t = line.text.trim_end();
        let ends_period = t.ends_with('.') || t.ends_with('。');
        if ends_period && !self.acronym_end.is_match(t) {
            vec![finding(RuleCode::Pct002, t, t.len().saturating_sub(1))]
        } else {
            vec![]
        }
    }

    fn pct003(&self, line: &CleanLine) -> Vec<Finding> {
        // Maximal runs of .!? chars: any run of two or more is a violation
        // except the plain three-dot ellipsis.
        let mut run_start: Option<usize> = None;
        let mut prev_end = 0usize;
        let check = |start: usize, end: usize, text: &str| -> Option<Finding> {
            let run = &text[start..end];
            if run.chars().count() >= 2 && run != "..." {
                Some(finding(RuleCode::Pct003, text, start))
            } else {
                None
            }
        };

        for (i, c) in line.text.char_indices() {
            if matches!(c, '.' | '!' | '?') {
                if run_start.is_none() {
                    run_start = Some(i);
                }
                prev_end = i + c.len_utf8();
            } else if let Some(start) = run_start.take() {
                if let Some(f) = check(start, prev_end, line.text) {
                    return vec![f];
                }
            }
        }
        if let Some(start) = run_start {
            if let Some(f) = check(start, prev_end, line.text) {
                return vec![f];
            }
        }
        vec![]
    }

    fn pct004(&self, line: &CleanLine) -> Vec<Finding> {
        match self.space_before_punct.find(line.text) {
            Some(m) => vec![finding(RuleCode::Pct004, line.text, m.start())],
            None => vec![],
        }
    }

    fn pct005(&self, line: &CleanLine) -> Vec<Finding> {
        match self.no_space_after_punct.find(line.text) {
            Some(m) => vec![finding(RuleCode::Pct005, line.text, m.start())],
            None => vec![],
        }
    }

    // ── Formatting ─────────────────────────────────────────────────

    fn fmt001(&self, line: &CleanLine) -> Vec<Finding> {
        match line.text.find("  ") {
            Some(at) => vec![finding(RuleCode::Fmt001, line.text, at)],
            None => vec![],
        }
    }

    fn fmt002(&self, line: &CleanLine) -> Vec<Finding> {
        if line.text.trim() != line.text {
            vec![finding(RuleCode::Fmt002, line.text, 0)]
        } else {
            vec![]
        }
    }

    fn fmt003(&self, line: &CleanLine) -> Vec<Finding> {
        match line.text.find(['\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}']) {
            Some(at) => vec![finding(RuleCode::Fmt003, line.text, at)],
            None => vec![],
        }
    }

    fn fmt004(&self, line: &CleanLine) -> Vec<Finding> {
        match line.text.find('…') {
            Some(at) => vec![finding(RuleCode::Fmt004, line.text, at)],
            None => vec![],
        }
    }

    fn fmt005(&self, line: &CleanLine) -> Vec<Finding> {
        if line.had_line_break {
            vec![Finding {
                code: RuleCode::Fmt005,
                context: "\\N".to_string(),
            }]
        } else {
            vec![]
        }
    }

    fn fmt006(&self, line: &CleanLine) -> Vec<Finding> {
        line.foreign_tags
            .iter()
            .map(|tag| Finding {
                code: RuleCode::Fmt006,
                context: tag.clone(),
            })
            .collect()
    }

    // ── Special characters ─────────────────────────────────────────

    fn spc001(&self, line: &CleanLine) -> Vec<Finding> {
        match line.text.find(['[', ']']) {
            Some(at) => vec![finding(RuleCode::Spc001, line.text, at)],
            None => vec![],
        }
    }

    fn spc002(&self, line: &CleanLine) -> Vec<Finding> {
        match self.censoring.find(line.text) {
            Some(m) => vec![finding(RuleCode::Spc002, line.text, m.start())],
            None => vec![],
        }
    }

    // ── Numbers / multipliers ──────────────────────────────────────

    fn num001(&self, line: &CleanLine) -> Vec<Finding> {
        match self.number_word.find(line.text) {
            Some(m) => vec![finding(RuleCode::Num001, line.text, m.start())],
            None => vec![],
        }
    }

    fn mul001(&self, line: &CleanLine) -> Vec<Finding> {
        match self.multiplier.find(line.text) {
            Some(m) => vec![finding(RuleCode::Mul001, line.text, m.start())],
            None => vec![],
        }
    }

    // ── Non-vocal content ──────────────────────────────────────────

    fn nvc001(&self, line: &CleanLine) -> Vec<Finding> {
        match self.structure_label.find(line.text) {
            Some(m) => vec![finding(RuleCode::Nvc001, line.text, m.start())],
            None => vec![],
        }
    }

    fn nvc002(&self, line: &CleanLine) -> Vec<Finding> {
        for caps in self.sound_wrapped.captures_iter(line.text) {
            let whole = caps.get(0).expect("match 0 always present");
            let inner = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            // Best effort: a multi-word phrase or sound vocabulary reads as a
            // description; a lone censored word is SPC002 territory.
            let descriptive =
                inner.split_whitespace().count() >= 2 || self.sound_vocab.is_match(inner);
            if descriptive {
                return vec![finding(RuleCode::Nvc002, line.text, whole.start())];
            }
        }
        vec![]
    }

    // ── Direct speech ──────────────────────────────────────────────

    fn dsp001(&self, line: &CleanLine) -> Vec<Finding> {
        if !line.text.contains('"') || line.text.trim_start().starts_with('"') {
            return vec![];
        }
        if let Some(m) = self.quote_then_upper.find(line.text) {
            if !self.comma_before_quote.is_match(line.text) {
                return vec![finding(RuleCode::Dsp001, line.text, m.start())];
            }
        }
        vec![]
    }

    fn dsp002(&self, line: &CleanLine) -> Vec<Finding> {
        let mut out = Vec::new();
        for caps in self.quoted_span.captures_iter(line.text) {
            let Some(inner) = caps.get(1) else { continue };
            let Some(first) = inner.as_str().chars().next() else {
                continue;
            };
            if first.is_alphabetic()
                && char_script(first) == Some(ScriptClass::Cased)
                && first.is_lowercase()
            {
                out.push(finding(RuleCode::Dsp002, line.text, inner.start()));
            }
        }
        out
    }
}

impl Default for CompiledChecks {
    fn default() -> Self {
        Self::compile()
    }
}

const EXCERPT_BEFORE: usize = 20;
const EXCERPT_AFTER: usize = 40;

fn finding(code: RuleCode, text: &str, at: usize) -> Finding {
    Finding {
        code,
        context: excerpt(text, at),
    }
}

/// A short window of `text` around byte offset `at`, char-safe, with `…`
/// marking truncation.
fn excerpt(text: &str, at: usize) -> String {
    let mut at = at.min(text.len());
    while at > 0 && !text.is_char_boundary(at) {
        at -= 1;
    }

    let mut start = at;
    for _ in 0..EXCERPT_BEFORE {
        match text[..start].chars().next_back() {
            Some(c) => start -= c.len_utf8(),
            None => break,
        }
    }
    let mut end = at;
    for _ in 0..EXCERPT_AFTER {
        match text[end..].chars().next() {
            Some(c) => end += c.len_utf8(),
            None => break,
        }
    }

    let mut out = String::new();
    if start > 0 {
        out.push('…');
    }
    out.push_str(&text[start..end]);
    if end < text.len() {
        out.push('…');
    }
    out
}
