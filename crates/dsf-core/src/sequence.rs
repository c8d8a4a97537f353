//! Sequence parser
//!
//! The companion sequence input is a flat list of lines read two at a time:
//!
//! ```text
//! >identifier
//! ACGTACGT
//! >another
//! TTGCA
//! ```
//!
//! Records are aligned by position with the rows of every measurement table.

/// Default marker in front of an identifier line
pub const DEFAULT_MARKER: char = '>';

/// One (identifier, sequence) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }
}

/// Ordered sequence records; index = record position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceList {
    records: Vec<SequenceRecord>,
    odd_trailing_line: bool,
}

impl SequenceList {
    /// Parse with the default `>` marker
    pub fn parse(text: &str) -> Self {
        Self::parse_with_marker(text, DEFAULT_MARKER)
    }

    /// Parse consecutive line pairs, stripping leading `marker` characters from each header.
    ///
    /// A header without the marker is used as-is. An odd trailing line becomes a
    /// record with an empty sequence. Empty input yields an empty list.
    pub fn parse_with_marker(text: &str, marker: char) -> Self {
        let lines: Vec<&str> = split_lines(text).collect();
        let records = lines
            .chunks(2)
            .map(|pair| {
                let id = pair[0].trim_start_matches(marker);
                let sequence = pair.get(1).copied().unwrap_or("");
                SequenceRecord::new(id, sequence)
            })
            .collect();

        Self {
            records,
            odd_trailing_line: lines.len() % 2 == 1,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the input ended with a header that had no sequence line
    pub fn has_odd_trailing_line(&self) -> bool {
        self.odd_trailing_line
    }

    /// Get a record by position
    pub fn get(&self, index: usize) -> Option<&SequenceRecord> {
        self.records.get(index)
    }

    /// Identifier at `index`, or `""` past the end
    pub fn id_at(&self, index: usize) -> &str {
        self.records.get(index).map_or("", |r| r.id.as_str())
    }

    /// Sequence at `index`, or `""` past the end
    pub fn sequence_at(&self, index: usize) -> &str {
        self.records.get(index).map_or("", |r| r.sequence.as_str())
    }

    /// Iterate over records in order
    pub fn iter(&self) -> impl Iterator<Item = &SequenceRecord> {
        self.records.iter()
    }

    /// Identifiers in order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    /// Sequence values in order
    pub fn sequences(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.sequence.as_str())
    }
}

impl FromIterator<SequenceRecord> for SequenceList {
    fn from_iter<I: IntoIterator<Item = SequenceRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
            odd_trailing_line: false,
        }
    }
}

/// Split on `\n`, `\r\n` and lone `\r`; a trailing terminator does not produce an empty line.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(pos) => {
                let line = &rest[..pos];
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}
