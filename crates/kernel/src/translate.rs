//! Label translation.

use std::collections::HashMap;

/// Localizes filter and option labels.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// In-memory translation catalog; unknown keys fall back to themselves.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_returns_key() {
        assert_eq!(IdentityTranslator.translate("Colour"), "Colour");
    }

    #[test]
    fn catalog_falls_back_to_key() {
        let catalog = Catalog::new(HashMap::from([(
            "Newest".to_string(),
            "Più recenti".to_string(),
        )]));
        assert_eq!(catalog.translate("Newest"), "Più recenti");
        assert_eq!(catalog.translate("Oldest"), "Oldest");
    }
}
