//! Insertion point location and template splicing.
//!
//! Two [`Locator`]s find where a member block goes:
//!
//! - [`StructuralLocator`] balances braces on a comment- and string-masked
//!   copy of the text and targets the primary type's closing brace.
//! - [`PatternLocator`] keeps the historical regex heuristic, which looks for
//!   a closing brace followed by a `/// <summary>`, a `public enum`, or the
//!   end of the text.
//!
//! Both place the block before the newline that precedes the brace line, so
//! the brace keeps its own line and indentation.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::scanner::primary_type_body;
use crate::contract::Contract;
use crate::error::Result;

/// Historical end-of-class heuristic.
pub const LEGACY_PATTERN: &str =
    r"(\s*)\n(\s*)}(\s*\n\s*/// <summary>|\s*\n\s*public enum|\s*\n\s*$)";

static LEGACY_REGEX: OnceLock<Regex> = OnceLock::new();

fn legacy_regex() -> Result<&'static Regex> {
    if let Some(re) = LEGACY_REGEX.get() {
        return Ok(re);
    }
    let re = Regex::new(LEGACY_PATTERN)?;
    Ok(LEGACY_REGEX.get_or_init(|| re))
}

/// Where a template is spliced into a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
    /// Byte offset the template is inserted at.
    pub offset: usize,
    /// The closing brace shares its line with code; a line break must follow
    /// the template to keep the brace on a line of its own.
    pub needs_line_break: bool,
}

impl InsertionPoint {
    /// Point right before the newline that precedes `close`, or at `close`
    /// itself when nothing but spaces separate it from earlier code.
    pub fn before_brace(text: &str, close: usize) -> Self {
        let bytes = text.as_bytes();
        let mut run_start = close;
        while run_start > 0 && bytes[run_start - 1].is_ascii_whitespace() {
            run_start -= 1;
        }

        match bytes[run_start..close].iter().rposition(|&b| b == b'\n') {
            Some(pos) => Self {
                offset: back_over_cr(bytes, run_start + pos, run_start),
                needs_line_break: false,
            },
            None => Self {
                offset: close,
                needs_line_break: true,
            },
        }
    }
}

fn back_over_cr(bytes: &[u8], offset: usize, floor: usize) -> usize {
    if offset > floor && bytes[offset - 1] == b'\r' {
        offset - 1
    } else {
        offset
    }
}

/// How the closing brace of the primary type is found.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InsertionStrategy {
    /// Brace balancing over masked source text.
    #[default]
    Structural,
    /// The legacy regular expression.
    Pattern,
}

impl InsertionStrategy {
    /// Locator implementing this strategy.
    pub fn locator(self) -> Box<dyn Locator> {
        match self {
            InsertionStrategy::Structural => Box::new(StructuralLocator),
            InsertionStrategy::Pattern => Box::new(PatternLocator),
        }
    }
}

/// Finds where a contract's template belongs in a file.
pub trait Locator {
    /// Name used in log output.
    fn name(&self) -> &str;

    /// Locate the insertion point, or `None` when the text has no
    /// recognizable end of type body.
    fn locate(&self, text: &str, contract: &Contract) -> Result<Option<InsertionPoint>>;
}

/// Brace-balancing locator.
pub struct StructuralLocator;

impl Locator for StructuralLocator {
    fn name(&self) -> &str {
        "structural"
    }

    fn locate(&self, text: &str, contract: &Contract) -> Result<Option<InsertionPoint>> {
        Ok(primary_type_body(text, contract.marker)
            .map(|body| InsertionPoint::before_brace(text, body.close)))
    }
}

/// Regex locator.
pub struct PatternLocator;

impl Locator for PatternLocator {
    fn name(&self) -> &str {
        "pattern"
    }

    fn locate(&self, text: &str, _contract: &Contract) -> Result<Option<InsertionPoint>> {
        let re = legacy_regex()?;
        Ok(re.captures(text).and_then(|caps| {
            let whole = caps.get(0)?;
            let lead = caps.get(1).map_or(0, |m| m.len());
            Some(InsertionPoint {
                offset: back_over_cr(text.as_bytes(), whole.start() + lead, whole.start()),
                needs_line_break: false,
            })
        }))
    }
}

/// Line terminator convention of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// CRLF if the text contains any, LF otherwise.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// Rewrite `\n` line breaks in `block` to this convention.
    pub fn apply(self, block: &str) -> String {
        match self {
            LineEnding::Lf => block.to_string(),
            LineEnding::CrLf => block.replace('\n', "\r\n"),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Splice `template` into `text` at `point`.
pub fn splice(text: &mut String, point: InsertionPoint, template: &str) {
    let ending = LineEnding::detect(text);
    let mut block = ending.apply(template);
    if point.needs_line_break {
        block.push_str(ending.as_str());
    }
    text.insert_str(point.offset, &block);
}
