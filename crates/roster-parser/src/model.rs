/// One source record keyed by the literal header names of its table.
///
/// Header order is preserved so callers can scan columns the way they
/// appeared in the export. Names are kept verbatim, trailing whitespace and
/// casing included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
    source_line: Option<u64>,
}

impl RawRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self {
            fields,
            source_line: None,
        }
    }

    pub(crate) fn with_source_line(mut self, line: u64) -> Self {
        self.source_line = Some(line);
        self
    }

    /// Value of the first column literally named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 1-based line in the source file, when the row came from a reader.
    pub fn source_line(&self) -> Option<u64> {
        self.source_line
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawRow::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
