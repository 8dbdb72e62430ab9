// path_access/pattern.rs — pattern-string → anchored regex compilation.
//
// Pattern syntax over `/`-separated segments:
//   literal     matches itself
//   *           exactly one segment
//   **          one or more trailing segments (last position only)
//   [i]         one integer segment
//   [i:a..b]    one integer segment N with a <= N <= b
//
// Ranges spanning more than MAX_EXPANSION values compile to `\d+` and are
// bounds-checked after the match instead of being expanded into an
// alternation, so `[i:0..4000000000]` stays cheap.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Widest range expanded into an explicit alternation.
const MAX_EXPANSION: u64 = 256;

static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[i:(\d+)\.\.(\d+)\]$").unwrap_or_else(|e| panic!("{e}")));

#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("empty pattern")]
    Empty,
    #[error("empty segment in pattern `{0}`")]
    EmptySegment(String),
    #[error("`**` must be the last segment in `{0}`")]
    RecursiveNotLast(String),
    #[error("malformed bracket segment `{0}`")]
    MalformedBracket(String),
    #[error("reversed range `{0}..{1}`")]
    ReversedRange(u64, u64),
    #[error("pattern `{0}` failed to compile")]
    Regex(String),
}

/// One compiled pattern segment.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    /// `*` — any one segment.
    Wildcard,
    /// `**` — one or more segments, trailing only.
    Recursive,
    /// `[i]` — any integer.
    Integer,
    /// `[i:a..b]` — integer within bounds. Checked after the regex match
    /// when the span exceeds MAX_EXPANSION.
    Range(u64, u64),
}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
    regex: Regex,
}

impl PathPattern {
    /// Compile a pattern string.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        let raw: Vec<&str> = pattern.split('/').collect();
        let mut segments = Vec::with_capacity(raw.len());
        for (i, seg) in raw.iter().enumerate() {
            let parsed = parse_segment(seg, pattern)?;
            if parsed == Segment::Recursive && i != raw.len() - 1 {
                return Err(PatternError::RecursiveNotLast(pattern.to_string()));
            }
            segments.push(parsed);
        }
        let regex = build_regex(&segments)
            .map_err(|_| PatternError::Regex(pattern.to_string()))?;
        Ok(Self { source: pattern.to_string(), segments, regex })
    }

    /// The pattern string this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when the pattern contains no wildcard/range segments.
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Match a concrete path. Never panics, any input string is acceptable.
    pub fn matches(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }

    /// Match a concrete path, returning the segments bound by
    /// wildcard/integer/range positions in pattern order. A trailing `**`
    /// binds the whole matched tail as one capture.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(path)?;
        let mut bound = Vec::new();
        let mut group = 1;
        for seg in &self.segments {
            match seg {
                Segment::Literal(_) => {}
                Segment::Wildcard | Segment::Integer | Segment::Recursive => {
                    bound.push(caps.get(group)?.as_str().to_string());
                    group += 1;
                }
                Segment::Range(lo, hi) => {
                    let text = caps.get(group)?.as_str();
                    group += 1;
                    // Wide ranges matched `\d+`; enforce bounds here.
                    let n: u64 = text.parse().ok()?;
                    if n < *lo || n > *hi {
                        return None;
                    }
                    bound.push(text.to_string());
                }
            }
        }
        Some(bound)
    }
}

fn parse_segment(seg: &str, pattern: &str) -> Result<Segment, PatternError> {
    match seg {
        "" => Err(PatternError::EmptySegment(pattern.to_string())),
        "*" => Ok(Segment::Wildcard),
        "**" => Ok(Segment::Recursive),
        "[i]" => Ok(Segment::Integer),
        _ if seg.starts_with('[') => {
            let caps = RANGE_RE
                .captures(seg)
                .ok_or_else(|| PatternError::MalformedBracket(seg.to_string()))?;
            let lo: u64 = caps[1]
                .parse()
                .map_err(|_| PatternError::MalformedBracket(seg.to_string()))?;
            let hi: u64 = caps[2]
                .parse()
                .map_err(|_| PatternError::MalformedBracket(seg.to_string()))?;
            if lo > hi {
                return Err(PatternError::ReversedRange(lo, hi));
            }
            Ok(Segment::Range(lo, hi))
        }
        _ => Ok(Segment::Literal(seg.to_string())),
    }
}

fn build_regex(segments: &[Segment]) -> Result<Regex, regex::Error> {
    let mut expr = String::from("^");
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            expr.push('/');
        }
        match seg {
            Segment::Literal(lit) => expr.push_str(&regex::escape(lit)),
            Segment::Wildcard => expr.push_str("([^/]+)"),
            Segment::Recursive => expr.push_str("(.+)"),
            Segment::Integer => expr.push_str(r"(\d+)"),
            Segment::Range(lo, hi) => {
                if hi - lo < MAX_EXPANSION {
                    let alts: Vec<String> = (*lo..=*hi).map(|n| n.to_string()).collect();
                    expr.push_str(&format!("({})", alts.join("|")));
                } else {
                    expr.push_str(r"(\d+)");
                }
            }
        }
    }
    expr.push('$');
    // Segment grammar only emits valid regex syntax; literals are escaped.
    Regex::new(&expr)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
