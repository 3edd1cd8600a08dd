use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RosterError;

/// The three attributes every output record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    Theme,
    Address,
    Household,
}

impl CanonicalField {
    /// Output column order.
    pub const ALL: [CanonicalField; 3] = [
        CanonicalField::Theme,
        CanonicalField::Address,
        CanonicalField::Household,
    ];

    pub const fn header(&self) -> &'static str {
        match self {
            CanonicalField::Theme => "Trick-or-Treat Name",
            CanonicalField::Address => "Address",
            CanonicalField::Household => "Household Name",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            CanonicalField::Theme => 0,
            CanonicalField::Address => 1,
            CanonicalField::Household => 2,
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

pub const OUTPUT_HEADER: [&str; 3] = [
    CanonicalField::Theme.header(),
    CanonicalField::Address.header(),
    CanonicalField::Household.header(),
];

/// How to find one canonical field among drifting source headers.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field: CanonicalField,
    pattern: Regex,
    pub fallback: String,
}

impl FieldSpec {
    pub fn new(
        field: CanonicalField,
        pattern: &str,
        fallback: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            field,
            pattern: Regex::new(pattern)?,
            fallback: fallback.into(),
        })
    }

    /// Tests the column name only, never cell content.
    pub fn matches(&self, column: &str) -> bool {
        self.pattern.is_match(column)
    }
}

/// Exactly one [`FieldSpec`] per canonical field, iterated in output order.
#[derive(Debug, Clone)]
pub struct FieldSpecs {
    specs: [FieldSpec; 3],
}

impl FieldSpecs {
    /// Each spec is slotted by its own `field`; the argument order does not matter
    /// but all three fields must be covered.
    pub fn new(specs: [FieldSpec; 3]) -> Result<Self, RosterError> {
        for field in CanonicalField::ALL {
            let count = specs.iter().filter(|spec| spec.field == field).count();
            if count != 1 {
                return Err(RosterError::FieldSpecs { field, count });
            }
        }
        let mut specs = specs;
        specs.sort_by_key(|spec| spec.field);
        Ok(Self { specs })
    }

    pub fn get(&self, field: CanonicalField) -> &FieldSpec {
        &self.specs[field.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.iter()
    }
}

static CANONICAL_SPECS: Lazy<FieldSpecs> = Lazy::new(|| {
    let specs = [
        FieldSpec::new(
            CanonicalField::Theme,
            r"(?i)trick[-\s]?or[-\s]?treat\s+name",
            "Theme",
        ),
        FieldSpec::new(CanonicalField::Address, r"(?i)^\s*address\s*$", "Address"),
        FieldSpec::new(CanonicalField::Household, r"(?i)household\s+name", "Name"),
    ]
    .map(|spec| spec.expect("canonical header pattern is valid"));
    FieldSpecs::new(specs).expect("canonical specs cover every field")
});

pub fn canonical_field_specs() -> &'static FieldSpecs {
    &CANONICAL_SPECS
}
