use crate::engine::diameter_table::DiameterTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Plausible width range (mm) for a clamp.
pub const DEFAULT_WIDTH_RANGE: (u32, u32) = (20, 300);
/// Plausible length range (mm) for a clamp.
pub const DEFAULT_LENGTH_RANGE: (u32, u32) = (100, 1200);

const WIDTH_DIGIT_CANDIDATES: [usize; 2] = [2, 3];
const PREFERRED_LENGTH_DIGITS: usize = 3;

/// Catalog knowledge that sharpens segmentation (both sets may be empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogHints {
    #[serde(default)]
    pub known_widths: BTreeSet<u32>,
    #[serde(default)]
    pub known_lengths: BTreeSet<u32>,
}

impl CatalogHints {
    pub fn new<W, L>(widths: W, lengths: L) -> Self
    where
        W: IntoIterator<Item = u32>,
        L: IntoIterator<Item = u32>,
    {
        Self {
            known_widths: widths.into_iter().collect(),
            known_lengths: lengths.into_iter().collect(),
        }
    }
}

/// One way of reading the digit run as diameter + width + length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCandidate {
    pub diameter_compact: String,
    pub width: u32,
    pub length: u32,
    pub width_digits: usize,
    pub length_digits: usize,
    pub score: i32,
    pub reasons: Vec<&'static str>,
}

impl SplitCandidate {
    /// Descending sort key: score, 3-digit length, 3-digit width, shorter diameter.
    fn rank_key(&self) -> (i32, bool, bool, i64) {
        (
            self.score,
            self.length_digits == PREFERRED_LENGTH_DIGITS,
            self.width_digits == 3,
            -(self.diameter_compact.len() as i64),
        )
    }
}

fn digit_count(value: u32) -> usize {
    value.to_string().len()
}

/// Length digit counts to try, in insertion order.
fn length_digit_candidates(hints: &CatalogHints) -> Vec<usize> {
    if hints.known_lengths.is_empty() {
        return vec![PREFERRED_LENGTH_DIGITS];
    }
    let counts: BTreeSet<usize> = hints.known_lengths.iter().map(|v| digit_count(*v)).collect();
    let mut ordered: Vec<usize> = counts.into_iter().rev().collect();
    if !ordered.contains(&PREFERRED_LENGTH_DIGITS) {
        ordered.push(PREFERRED_LENGTH_DIGITS);
    }
    ordered
}

fn in_range(value: u32, range: (u32, u32)) -> bool {
    range.0 <= value && value <= range.1
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn score_split(
    diameter_compact: &str,
    width: u32,
    length: u32,
    length_digits: usize,
    hints: &CatalogHints,
    table: &DiameterTable,
) -> (i32, Vec<&'static str>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    if table.contains_compact(diameter_compact) {
        score += 4;
        reasons.push("known diameter");
    } else {
        score -= 1;
        reasons.push("unmapped diameter");
    }

    if in_range(width, DEFAULT_WIDTH_RANGE) {
        score += 2;
        reasons.push("plausible width");
    }
    if in_range(length, DEFAULT_LENGTH_RANGE) {
        score += 2;
        reasons.push("plausible length");
    }
    if length_digits == PREFERRED_LENGTH_DIGITS {
        score += 2;
        reasons.push("3-digit length preferred");
    }

    if !hints.known_widths.is_empty() {
        if hints.known_widths.contains(&width) {
            score += 6;
            reasons.push("width in catalog");
        } else {
            score -= 2;
            reasons.push("width not in catalog");
        }
    }
    if !hints.known_lengths.is_empty() {
        if hints.known_lengths.contains(&length) {
            score += 6;
            reasons.push("length in catalog");
        } else {
            score -= 2;
            reasons.push("length not in catalog");
        }
    }

    (score, reasons)
}

/// Enumerate, score and rank every split of an undelimited digit run.
///
/// The returned list is ordered best first; an empty list means the run
/// cannot be segmented at all.
pub fn segment_numeric_core(
    numeric_core: &str,
    hints: &CatalogHints,
    table: &DiameterTable,
) -> Vec<SplitCandidate> {
    let mut candidates = Vec::new();
    if !is_digits(numeric_core) {
        return candidates;
    }

    for length_digits in length_digit_candidates(hints) {
        if numeric_core.len() <= length_digits + 2 {
            continue;
        }
        let (remaining, length_str) = numeric_core.split_at(numeric_core.len() - length_digits);
        let Ok(length) = length_str.parse::<u32>() else {
            continue;
        };

        for width_digits in WIDTH_DIGIT_CANDIDATES {
            if remaining.len() <= width_digits {
                continue;
            }
            let (diameter_compact, width_str) = remaining.split_at(remaining.len() - width_digits);
            if !is_digits(diameter_compact) {
                continue;
            }
            let Ok(width) = width_str.parse::<u32>() else {
                continue;
            };

            let (score, reasons) =
                score_split(diameter_compact, width, length, length_digits, hints, table);
            candidates.push(SplitCandidate {
                diameter_compact: diameter_compact.to_string(),
                width,
                length,
                width_digits,
                length_digits,
                score,
                reasons,
            });
        }
    }

    // stable: equal keys keep insertion order
    candidates.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
    candidates
}

/// More than one candidate shares the best score.
pub fn top_score_is_tied(candidates: &[SplitCandidate]) -> bool {
    match candidates.first() {
        Some(best) => candidates.iter().filter(|c| c.score == best.score).count() > 1,
        None => false,
    }
}
