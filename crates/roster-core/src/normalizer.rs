use roster_parser::RawRow;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::fields::CanonicalField;
use crate::resolver::ResolvedKeyMap;

/// Header spelling with a trailing space that some form exports emit for the
/// address column. Consulted when the resolved address column is empty.
pub const LEGACY_ADDRESS_KEY: &str = "Address ";

/// A cleaned participant row. Empty string stands for "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub theme: String,
    pub address: String,
    pub household: String,
}

impl CanonicalRecord {
    pub fn get(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::Theme => &self.theme,
            CanonicalField::Address => &self.address,
            CanonicalField::Household => &self.household,
        }
    }
}

pub fn normalize(row: &RawRow, keys: &ResolvedKeyMap) -> CanonicalRecord {
    let address = row
        .get(keys.column(CanonicalField::Address))
        .filter(|value| !value.is_empty())
        .or_else(|| row.get(LEGACY_ADDRESS_KEY));

    CanonicalRecord {
        theme: clean(row.get(keys.column(CanonicalField::Theme))),
        address: clean(address),
        household: clean(row.get(keys.column(CanonicalField::Household))),
    }
}

/// Fields are emitted in [`CanonicalField::ALL`] order under their output headers.
impl Serialize for CanonicalRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("CanonicalRecord", CanonicalField::ALL.len())?;
        for field in CanonicalField::ALL {
            state.serialize_field(field.header(), self.get(field))?;
        }
        state.end()
    }
}

fn clean(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_string()
}
