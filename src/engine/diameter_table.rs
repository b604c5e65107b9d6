// ==========================================
// Abrazaderas - diameter equivalence table
// ==========================================
// Human diameter token ("9/16") <-> compacted digits ("916")
// Unmapped tokens fall back to digit stripping and are flagged
// ==========================================

use crate::domain::error::{ClampError, ClampResult};
use crate::domain::types::ClampField;
use crate::i18n::{t, t_with_args};
use std::collections::BTreeMap;
use tracing::debug;

/// Validated equivalences. Anything else is marked as requiring a mapping.
pub const STANDARD_DIAMETERS: [(&str, &str); 12] = [
    ("7/16", "716"),
    ("1/2", "12"),
    ("9/16", "916"),
    ("11/16", "1116"),
    ("5/8", "58"),
    ("3/4", "34"),
    ("7/8", "78"),
    ("1", "1"),
    ("18", "18"),
    ("20", "20"),
    ("22", "22"),
    ("24", "24"),
];

/// Trim, uppercase and collapse inner whitespace.
pub(crate) fn normalize_key(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Result of compacting a human diameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactDiameter {
    pub compact: String,
    pub requires_mapping: bool,
    pub warnings: Vec<String>,
}

// ==========================================
// DiameterTable
// ==========================================
// Immutable once built; extended tables are new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiameterTable {
    human_to_compact: BTreeMap<String, String>,
    compact_to_human: BTreeMap<String, String>,
}

impl Default for DiameterTable {
    fn default() -> Self {
        Self::with_entries(STANDARD_DIAMETERS.iter().copied())
    }
}

impl DiameterTable {
    /// Build a table from (human, compact) pairs. Later pairs win on conflicts.
    pub fn with_entries<I, H, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (H, C)>,
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let mut human_to_compact = BTreeMap::new();
        let mut compact_to_human = BTreeMap::new();
        for (human, compact) in entries {
            let human = normalize_key(human.as_ref());
            let compact = compact.as_ref().trim().to_string();
            if human.is_empty() || compact.is_empty() {
                continue;
            }
            human_to_compact.insert(human.clone(), compact.clone());
            compact_to_human.insert(compact, human);
        }
        Self {
            human_to_compact,
            compact_to_human,
        }
    }

    /// Copy of this table with extra pairs layered on top.
    pub fn extended<I, H, C>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = (H, C)>,
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let base = self
            .human_to_compact
            .iter()
            .map(|(h, c)| (h.clone(), c.clone()))
            .collect::<Vec<_>>();
        let extra = extra
            .into_iter()
            .map(|(h, c)| (h.as_ref().to_string(), c.as_ref().to_string()))
            .collect::<Vec<_>>();
        Self::with_entries(base.into_iter().chain(extra))
    }

    pub fn len(&self) -> usize {
        self.human_to_compact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.human_to_compact.is_empty()
    }

    pub fn contains_compact(&self, compact: &str) -> bool {
        self.compact_to_human.contains_key(compact)
    }

    pub fn compact_for(&self, human: &str) -> Option<&str> {
        self.human_to_compact
            .get(&normalize_key(human))
            .map(String::as_str)
    }

    pub fn human_for(&self, compact: &str) -> Option<&str> {
        self.compact_to_human.get(compact.trim()).map(String::as_str)
    }

    pub fn compact_keys(&self) -> impl Iterator<Item = &str> {
        self.compact_to_human.keys().map(String::as_str)
    }

    /// Compact a human diameter.
    ///
    /// # Behaviour
    /// - exact table hit: mapped value, no warnings
    /// - otherwise: digits only; tokens with `/` or a space are flagged as
    ///   requiring a mapping (a warning in lenient mode, an error in strict mode)
    pub fn to_compact(&self, human: &str, strict: bool) -> ClampResult<CompactDiameter> {
        let normalized = normalize_key(human);
        if normalized.is_empty() {
            return Err(ClampError::validation(
                ClampField::Diametro,
                t("clamp.diameter_required"),
            ));
        }

        if let Some(compact) = self.human_to_compact.get(&normalized) {
            return Ok(CompactDiameter {
                compact: compact.clone(),
                requires_mapping: false,
                warnings: Vec::new(),
            });
        }

        let compact: String = normalized.chars().filter(|c| c.is_ascii_digit()).collect();
        if compact.is_empty() {
            return Err(ClampError::validation(
                ClampField::Diametro,
                t("clamp.diameter_not_compactable"),
            ));
        }

        let requires_mapping = normalized.contains('/') || normalized.contains(' ');
        let mut warnings = Vec::new();
        if requires_mapping {
            if strict {
                return Err(ClampError::validation(
                    ClampField::Diametro,
                    t_with_args("clamp.diameter_requires_mapping", &[("diameter", human)]),
                ));
            }
            debug!(diameter = %human, compact = %compact, "unmapped diameter compacted by digit stripping");
            warnings.push(t_with_args(
                "clamp.diameter_unmapped_warning",
                &[("diameter", human), ("compact", &compact)],
            ));
        }

        Ok(CompactDiameter {
            compact,
            requires_mapping,
            warnings,
        })
    }

    /// Reverse lookup; unknown compact values come back unchanged.
    pub fn to_human(&self, compact: &str) -> String {
        self.human_for(compact)
            .map(str::to_string)
            .unwrap_or_else(|| compact.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_lookup() {
        let table = DiameterTable::default();
        let c = table.to_compact("9/16", false).unwrap();
        assert_eq!(c.compact, "916");
        assert!(!c.requires_mapping);
        assert!(c.warnings.is_empty());
        assert_eq!(table.to_human("916"), "9/16");
    }

    #[test]
    fn test_round_trip_all_standard_keys() {
        let table = DiameterTable::default();
        for (human, _) in STANDARD_DIAMETERS {
            let c = table.to_compact(human, true).unwrap();
            assert_eq!(table.to_human(&c.compact), human);
        }
    }

    #[test]
    fn test_whitespace_normalized() {
        let table = DiameterTable::default();
        assert_eq!(table.to_compact("  3/4 ", false).unwrap().compact, "34");
    }

    #[test]
    fn test_unmapped_fraction_lenient() {
        let table = DiameterTable::default();
        let c = table.to_compact("1 1/8", false).unwrap();
        assert_eq!(c.compact, "118");
        assert!(c.requires_mapping);
        assert_eq!(c.warnings.len(), 1);
    }

    #[test]
    fn test_unmapped_fraction_strict() {
        let table = DiameterTable::default();
        let err = table.to_compact("1 1/8", true).unwrap_err();
        assert_eq!(err.field(), Some(ClampField::Diametro));
    }

    #[test]
    fn test_unmapped_plain_number_not_flagged() {
        let table = DiameterTable::default();
        let c = table.to_compact("16", true).unwrap();
        assert_eq!(c.compact, "16");
        assert!(!c.requires_mapping);
    }

    #[test]
    fn test_empty_and_non_numeric() {
        let table = DiameterTable::default();
        assert!(table.to_compact("   ", false).is_err());
        assert!(table.to_compact("abc", false).is_err());
    }

    #[test]
    fn test_to_human_fallback() {
        let table = DiameterTable::default();
        assert_eq!(table.to_human("118"), "118");
    }

    #[test]
    fn test_extended_table() {
        let table = DiameterTable::default().extended([("1 1/8", "118")]);
        let c = table.to_compact("1 1/8", true).unwrap();
        assert_eq!(c.compact, "118");
        assert!(!c.requires_mapping);
        assert_eq!(table.to_human("118"), "1 1/8");
        // base table untouched
        assert!(!DiameterTable::default().contains_compact("118"));
    }
}
