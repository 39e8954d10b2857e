//! Response Parser — splits a free-text model reply into prompt, negative prompt
//! and analysis.
//!
//! Each trimmed, non-blank line goes through a three-state machine. Check order
//! per line is fixed:
//! 1. contains "negative" and "prompt"   → switch to `Negative`, drop line
//! 2. contains "analysis" or "technical" → switch to `Analysis`, drop line
//! 3. contains "prompt:" with < 8 tokens → drop line (meta header), no switch
//! 4. otherwise                          → content for the current section
//!
//! All matching is case-insensitive. The final prompt is the prompt-section
//! line with the most tokens (first wins on ties).

use crate::models::outcome::{ParsedResult, FALLBACK_ANALYSIS, FALLBACK_NEGATIVE, FALLBACK_PROMPT};

/// Header lines with this many tokens or more are treated as content.
const HEADER_MAX_TOKENS: usize = 8;
/// Minimum token count (exclusive) for the untagged fallback scan.
const FALLBACK_MIN_TOKENS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Prompt,
    Negative,
    Analysis,
}

/// What a single line does to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    SwitchTo(Section),
    SkipHeader,
    Content,
}

pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Classifies one trimmed line. Order of checks is significant.
pub fn classify_line(line: &str) -> LineClass {
    let lower = line.to_lowercase();
    if lower.contains("negative") && lower.contains("prompt") {
        LineClass::SwitchTo(Section::Negative)
    } else if lower.contains("analysis") || lower.contains("technical") {
        LineClass::SwitchTo(Section::Analysis)
    } else if lower.contains("prompt:") && token_count(line) < HEADER_MAX_TOKENS {
        LineClass::SkipHeader
    } else {
        LineClass::Content
    }
}

#[derive(Debug)]
pub struct ReplyParser<'a> {
    section: Section,
    prompt_candidates: Vec<&'a str>,
    negative: Vec<&'a str>,
    analysis: Vec<&'a str>,
}

impl Default for ReplyParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ReplyParser<'a> {
    pub fn new() -> Self {
        Self {
            section: Section::Prompt,
            prompt_candidates: Vec::new(),
            negative: Vec::new(),
            analysis: Vec::new(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Feeds one line; blank lines are ignored.
    pub fn feed(&mut self, line: &'a str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        match classify_line(line) {
            LineClass::SwitchTo(section) => self.section = section,
            LineClass::SkipHeader => {}
            LineClass::Content => match self.section {
                Section::Prompt => self.prompt_candidates.push(line),
                Section::Negative => self.negative.push(line),
                Section::Analysis => self.analysis.push(line),
            },
        }
    }

    /// Densest prompt candidate, first seen on ties.
    fn best_candidate(&self) -> Option<&'a str> {
        let mut best: Option<(&'a str, usize)> = None;
        for &line in &self.prompt_candidates {
            let tokens = token_count(line);
            if best.map_or(true, |(_, best_tokens)| tokens > best_tokens) {
                best = Some((line, tokens));
            }
        }
        best.map(|(line, _)| line)
    }

    /// Resolves the three fields. `all_lines` is the full reply, used only when
    /// no prompt-tagged line was collected.
    pub fn finish<I>(self, all_lines: I) -> ParsedResult
    where
        I: IntoIterator<Item = &'a str>,
    {
        let prompt = self
            .best_candidate()
            .or_else(|| {
                all_lines
                    .into_iter()
                    .map(str::trim)
                    .find(|line| token_count(line) > FALLBACK_MIN_TOKENS)
            })
            .unwrap_or_default();

        ParsedResult {
            optimized_prompt: or_fallback(prompt.to_string(), FALLBACK_PROMPT),
            negative_prompt: or_fallback(self.negative.join(" "), FALLBACK_NEGATIVE),
            analysis: or_fallback(self.analysis.join(" "), FALLBACK_ANALYSIS),
        }
    }
}

fn or_fallback(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Parses a raw model reply into a `ParsedResult`. Never fails.
pub fn parse_reply(reply: &str) -> ParsedResult {
    let lines: Vec<&str> = reply.trim().split('\n').collect();
    let mut parser = ReplyParser::new();
    for &line in &lines {
        parser.feed(line);
    }
    parser.finish(lines)
}
