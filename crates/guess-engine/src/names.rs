//! Bilingual country-name resolution.
//!
//! Free text is matched through [`normalize`], which is the single source of
//! truth for name equality: `"México"`, `"mexico"` and `"MEXICO"` all resolve
//! to the same country. Lookups hit precomputed normalized-key maps, one per
//! language, built once at load time.

use crate::CountryId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Trim, lowercase, NFD-decompose and drop combining marks. Idempotent.
pub fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Input language detected during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Spanish,
    English,
}

/// Bilingual name table. The English name is the canonical [`CountryId`].
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    /// normalized Spanish name -> id
    spanish: HashMap<String, CountryId>,
    /// normalized English name -> id
    english: HashMap<String, CountryId>,
    /// id -> properly capitalized Spanish name
    spanish_display: HashMap<CountryId, String>,
}

impl NameResolver {
    /// Build from `(spanish, english)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut resolver = Self::default();
        for (spanish, english) in pairs {
            let spanish = spanish.into();
            let english: String = english.into();
            resolver.spanish.insert(normalize(&spanish), english.clone());
            resolver.english.insert(normalize(&english), english.clone());
            resolver.spanish_display.insert(english, spanish);
        }
        resolver
    }

    /// Resolve free text to a country id, reporting which language matched.
    /// Spanish is tried first.
    pub fn resolve(&self, text: &str) -> Option<(CountryId, Language)> {
        let key = normalize(text);
        if let Some(id) = self.spanish.get(&key) {
            return Some((id.clone(), Language::Spanish));
        }
        self.english
            .get(&key)
            .map(|id| (id.clone(), Language::English))
    }

    /// Properly capitalized name in the requested language, falling back to
    /// the raw id when the table has no entry for it. Never fails.
    pub fn display_name(&self, id: &str, language: Language) -> String {
        match language {
            Language::English => id.to_string(),
            Language::Spanish => self
                .spanish_display
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string()),
        }
    }

    /// Number of countries in the table.
    pub fn len(&self) -> usize {
        self.spanish_display.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spanish_display.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> NameResolver {
        NameResolver::from_pairs([
            ("México", "Mexico"),
            ("Japón", "Japan"),
            ("Francia", "France"),
            ("España", "Spain"),
        ])
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["  MÉXICO ", "Perú", "côte d'ivoire", "plain"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_normalize_case_and_accents() {
        assert_eq!(normalize("México"), normalize("mexico"));
        assert_eq!(normalize("MEXICO"), normalize("  méxico "));
        assert_eq!(normalize("Japón"), "japon");
    }

    #[test]
    fn test_resolve_both_languages() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve("mexico"),
            Some(("Mexico".to_string(), Language::Spanish))
        );
        assert_eq!(
            resolver.resolve("JAPAN"),
            Some(("Japan".to_string(), Language::English))
        );
        assert_eq!(resolver.resolve("Atlantis"), None);
    }

    // "México" normalizes to "mexico", which is also the normalized English
    // name, so the Spanish table shadows the English one. Both still land
    // on the same id.
    #[test]
    fn test_resolution_symmetry_across_languages() {
        let resolver = resolver();
        for (spanish, english) in [("Francia", "France"), ("Japón", "Japan")] {
            let (from_spanish, _) = resolver.resolve(spanish).unwrap();
            let (from_english, _) = resolver.resolve(english).unwrap();
            assert_eq!(from_spanish, from_english);
        }
    }

    #[test]
    fn test_display_name_and_fallback() {
        let resolver = resolver();
        assert_eq!(resolver.display_name("Japan", Language::Spanish), "Japón");
        assert_eq!(resolver.display_name("Japan", Language::English), "Japan");
        // Unknown id falls back to the id itself, never errors.
        assert_eq!(
            resolver.display_name("Narnia", Language::Spanish),
            "Narnia"
        );
    }
}
