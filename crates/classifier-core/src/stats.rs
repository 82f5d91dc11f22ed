//! Statistics collectors.
//!
//! One collector exists per [`TokenKind`]. Every collector counts the tokens
//! it sees; collectors created in full mode additionally track min/max and
//! (for numbers) sum and average.

use std::cmp::Ordering;
use std::fmt;

use crate::config::StatsMode;
use crate::token::TokenKind;

/// Common interface of the per-kind collectors.
pub trait Statistics {
    /// Records a token already classified as this collector's kind.
    fn record(&mut self, token: &str);

    /// Number of tokens recorded.
    fn count(&self) -> u64;

    /// One-line report, e.g. `Integers: 3 | Min: 1 | ...`.
    fn report(&self) -> String;
}

// ============================================================================
// Exact integer ordering
// ============================================================================

/// An integer of arbitrary magnitude, kept in normalized decimal form.
///
/// Only comparison and display are needed, so no arithmetic is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalInt {
    negative: bool,
    digits: String,
}

impl DecimalInt {
    /// Parses an optionally signed run of ASCII digits.
    pub fn parse(token: &str) -> Option<Self> {
        let (negative, rest) = match token.as_bytes().first() {
            Some(b'-') => (true, &token[1..]),
            Some(b'+') => (false, &token[1..]),
            _ => (false, token),
        };
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let trimmed = rest.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self {
            negative: negative && digits != "0",
            digits: digits.to_string(),
        })
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl Ord for DecimalInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl PartialOrd for DecimalInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DecimalInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.digits)
    }
}

// ============================================================================
// IntegerStats
// ============================================================================

/// Statistics over integer tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerStats {
    full: bool,
    count: u64,
    min: Option<DecimalInt>,
    max: Option<DecimalInt>,
    /// `None` once the running sum no longer fits in an `i128`.
    sum: Option<i128>,
}

impl IntegerStats {
    /// Creates a collector; `full` enables min/max/sum tracking.
    pub fn new(full: bool) -> Self {
        Self {
            full,
            count: 0,
            min: None,
            max: None,
            sum: Some(0),
        }
    }

    /// Smallest value seen (full mode only).
    pub fn min(&self) -> Option<&DecimalInt> {
        self.min.as_ref()
    }

    /// Largest value seen (full mode only).
    pub fn max(&self) -> Option<&DecimalInt> {
        self.max.as_ref()
    }

    /// Exact sum, or `None` if it overflowed.
    pub fn sum(&self) -> Option<i128> {
        self.sum
    }

    /// Arithmetic mean, or `None` before any value or after overflow.
    pub fn average(&self) -> Option<f64> {
        match (self.sum, self.count) {
            (_, 0) | (None, _) => None,
            (Some(sum), count) => Some(sum as f64 / count as f64),
        }
    }
}

impl Statistics for IntegerStats {
    fn record(&mut self, token: &str) {
        let Some(value) = DecimalInt::parse(token) else {
            tracing::debug!(token, "Ignoring non-integer token in integer statistics");
            return;
        };
        self.count += 1;

        if !self.full {
            return;
        }
        self.sum = self
            .sum
            .zip(token.parse::<i128>().ok())
            .and_then(|(sum, n)| sum.checked_add(n));
        if self.min.as_ref().is_none_or(|min| value < *min) {
            self.min = Some(value.clone());
        }
        if self.max.as_ref().is_none_or(|max| value > *max) {
            self.max = Some(value);
        }
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn report(&self) -> String {
        let mut out = format!("{}: {}", TokenKind::Integer.label(), self.count);
        if let (true, Some(min), Some(max)) = (self.full, &self.min, &self.max) {
            let sum = self
                .sum
                .map_or_else(|| "overflow".to_string(), |s| s.to_string());
            let avg = self
                .average()
                .map_or_else(|| "overflow".to_string(), |a| format!("{a:.2}"));
            out.push_str(&format!(" | Min: {min} | Max: {max} | Sum: {sum} | Avg: {avg}"));
        }
        out
    }
}

// ============================================================================
// FloatStats
// ============================================================================

/// Statistics over float tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatStats {
    full: bool,
    count: u64,
    min: Option<f64>,
    max: Option<f64>,
    sum: f64,
}

impl FloatStats {
    /// Creates a collector; `full` enables min/max/sum tracking.
    pub fn new(full: bool) -> Self {
        Self {
            full,
            count: 0,
            min: None,
            max: None,
            sum: 0.0,
        }
    }

    /// Smallest value seen (full mode only).
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Largest value seen (full mode only).
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Running sum (full mode only).
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Arithmetic mean, or `None` before any value.
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl Statistics for FloatStats {
    fn record(&mut self, token: &str) {
        let Ok(value) = token.parse::<f64>() else {
            tracing::debug!(token, "Ignoring non-float token in float statistics");
            return;
        };
        self.count += 1;

        if !self.full {
            return;
        }
        self.sum += value;
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn report(&self) -> String {
        let mut out = format!("{}: {}", TokenKind::Float.label(), self.count);
        if let (true, Some(min), Some(max), Some(avg)) =
            (self.full, self.min, self.max, self.average())
        {
            out.push_str(&format!(
                " | Min: {min:.6} | Max: {max:.6} | Sum: {:.6} | Avg: {avg:.2}",
                self.sum
            ));
        }
        out
    }
}

// ============================================================================
// StringStats
// ============================================================================

/// Statistics over string tokens; lengths are measured in characters.
#[derive(Debug, Clone, PartialEq)]
pub struct StringStats {
    full: bool,
    count: u64,
    min_len: Option<usize>,
    max_len: Option<usize>,
}

impl StringStats {
    /// Creates a collector; `full` enables length tracking.
    pub fn new(full: bool) -> Self {
        Self {
            full,
            count: 0,
            min_len: None,
            max_len: None,
        }
    }

    /// Shortest token length (full mode only).
    pub fn min_len(&self) -> Option<usize> {
        self.min_len
    }

    /// Longest token length (full mode only).
    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }
}

impl Statistics for StringStats {
    fn record(&mut self, token: &str) {
        self.count += 1;

        if !self.full {
            return;
        }
        let len = token.chars().count();
        self.min_len = Some(self.min_len.map_or(len, |min| min.min(len)));
        self.max_len = Some(self.max_len.map_or(len, |max| max.max(len)));
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn report(&self) -> String {
        let mut out = format!("{}: {}", TokenKind::String.label(), self.count);
        if let (true, Some(min), Some(max)) = (self.full, self.min_len, self.max_len) {
            out.push_str(&format!(" | Min length: {min} | Max length: {max}"));
        }
        out
    }
}

// ============================================================================
// StatsSet
// ============================================================================

/// The three collectors of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSet {
    mode: StatsMode,
    integers: IntegerStats,
    floats: FloatStats,
    strings: StringStats,
}

impl StatsSet {
    /// Creates empty collectors for `mode`.
    pub fn new(mode: StatsMode) -> Self {
        let full = mode.is_full();
        Self {
            mode,
            integers: IntegerStats::new(full),
            floats: FloatStats::new(full),
            strings: StringStats::new(full),
        }
    }

    /// Mode the collectors were created for.
    pub fn mode(&self) -> StatsMode {
        self.mode
    }

    /// Records a classified token.
    pub fn record(&mut self, kind: TokenKind, token: &str) {
        self.get_mut(kind).record(token);
    }

    /// Collector for `kind`.
    pub fn get(&self, kind: TokenKind) -> &dyn Statistics {
        match kind {
            TokenKind::Integer => &self.integers,
            TokenKind::Float => &self.floats,
            TokenKind::String => &self.strings,
        }
    }

    fn get_mut(&mut self, kind: TokenKind) -> &mut dyn Statistics {
        match kind {
            TokenKind::Integer => &mut self.integers,
            TokenKind::Float => &mut self.floats,
            TokenKind::String => &mut self.strings,
        }
    }

    /// Number of tokens of `kind`.
    pub fn count(&self, kind: TokenKind) -> u64 {
        self.get(kind).count()
    }

    /// Integer collector.
    pub fn integers(&self) -> &IntegerStats {
        &self.integers
    }

    /// Float collector.
    pub fn floats(&self) -> &FloatStats {
        &self.floats
    }

    /// String collector.
    pub fn strings(&self) -> &StringStats {
        &self.strings
    }
}
