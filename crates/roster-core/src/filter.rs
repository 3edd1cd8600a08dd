use crate::normalizer::CanonicalRecord;

/// A named admission rule. The name is what shows up in rejection counts.
pub trait RecordPredicate: Send + Sync {
    fn name(&self) -> &'static str;
    fn admits(&self, record: &CanonicalRecord) -> bool;
}

/// Rows without a theme have nothing to put on the map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemePresent;

impl RecordPredicate for ThemePresent {
    fn name(&self) -> &'static str {
        "missing_theme"
    }

    fn admits(&self, record: &CanonicalRecord) -> bool {
        !record.theme.trim().is_empty()
    }
}

pub struct RowFilter {
    predicates: Vec<Box<dyn RecordPredicate>>,
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::empty().with_predicate(ThemePresent)
    }
}

impl RowFilter {
    /// A filter that admits everything.
    pub fn empty() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    pub fn with_predicate(mut self, predicate: impl RecordPredicate + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Name of the first predicate the record fails, if any.
    pub fn rejection(&self, record: &CanonicalRecord) -> Option<&'static str> {
        self.predicates
            .iter()
            .find(|predicate| !predicate.admits(record))
            .map(|predicate| predicate.name())
    }

    pub fn is_admissible(&self, record: &CanonicalRecord) -> bool {
        self.rejection(record).is_none()
    }

    pub fn predicate_names(&self) -> Vec<&'static str> {
        self.predicates.iter().map(|p| p.name()).collect()
    }
}

impl std::fmt::Debug for RowFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowFilter")
            .field("predicates", &self.predicate_names())
            .finish()
    }
}
