use tracing::debug;

use crate::fields::{CanonicalField, FieldSpec, FieldSpecs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub column: String,
    /// False when no header matched and the spec's fallback name was used.
    pub matched: bool,
}

/// Source column chosen for every canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKeyMap {
    keys: [ResolvedKey; 3],
}

impl ResolvedKeyMap {
    pub fn get(&self, field: CanonicalField) -> &ResolvedKey {
        &self.keys[field.index()]
    }

    pub fn column(&self, field: CanonicalField) -> &str {
        &self.get(field).column
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &ResolvedKey)> {
        CanonicalField::ALL.into_iter().zip(self.keys.iter())
    }
}

/// Pick a source column for each field by scanning `column_names` in order.
///
/// The first matching column wins. With no match the fallback name is used
/// as-is, whether or not it exists in the header.
pub fn resolve<I, S>(column_names: I, specs: &FieldSpecs) -> ResolvedKeyMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let columns: Vec<S> = column_names.into_iter().collect();
    let keys = std::array::from_fn(|idx| {
        let spec = specs.get(CanonicalField::ALL[idx]);
        resolve_field(&columns, spec)
    });
    ResolvedKeyMap { keys }
}

fn resolve_field<S: AsRef<str>>(columns: &[S], spec: &FieldSpec) -> ResolvedKey {
    match columns
        .iter()
        .map(|column| column.as_ref())
        .find(|column| spec.matches(column))
    {
        Some(column) => ResolvedKey {
            column: column.to_string(),
            matched: true,
        },
        None => {
            debug!(
                field = %spec.field,
                fallback = %spec.fallback,
                "no header matched, using fallback column"
            );
            ResolvedKey {
                column: spec.fallback.clone(),
                matched: false,
            }
        }
    }
}
