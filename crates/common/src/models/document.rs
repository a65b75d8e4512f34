//! Document metadata

use serde::{Deserialize, Serialize};

/// Earliest publication year accepted as valid
pub const MIN_YEAR: i32 = 1800;

/// Latest publication year accepted as valid
pub const MAX_YEAR: i32 = 2100;

/// Raw metadata for one corpus entry, as handed over by the record extractor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub title: String,

    /// Publication year as found in the source record ("2024", "2024-05", ...)
    #[serde(default)]
    pub year: Option<String>,

    #[serde(default)]
    pub journal: String,
}

/// Immutable reference to a corpus document.
///
/// Fields are read through accessors; a reference is only created from its
/// corpus position, so its id cannot drift from that position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Stable identifier derived from corpus order ("A0", "A1", ...)
    id: String,

    title: String,

    /// Publication year, only when within [`MIN_YEAR`]..=[`MAX_YEAR`]
    year: Option<i32>,

    journal: String,
}

impl DocumentRef {
    /// Create the reference for the document at `index` in corpus order.
    ///
    /// Years outside the accepted range are treated as unknown.
    pub fn new(index: usize, title: impl Into<String>, year: Option<i32>, journal: impl Into<String>) -> Self {
        Self {
            id: Self::id_for(index),
            title: title.into(),
            year: year.filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y)),
            journal: journal.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn journal(&self) -> &str {
        &self.journal
    }

    /// Identifier assigned to the document at `index`
    pub fn id_for(index: usize) -> String {
        format!("A{}", index)
    }

    /// Build references for a whole corpus, assigning ids by position
    pub fn from_records<I>(records: I) -> Vec<Self>
    where
        I: IntoIterator<Item = DocumentRecord>,
    {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let year = record.year.as_deref().and_then(parse_year);
                Self::new(index, record.title, year, record.journal)
            })
            .collect()
    }
}

/// Parse a publication year from a raw metadata field.
///
/// Only the first four characters are considered, so `"2024-05"` yields 2024.
/// Values outside [`MIN_YEAR`]..=[`MAX_YEAR`] or non-numeric input give `None`.
pub fn parse_year(raw: &str) -> Option<i32> {
    let prefix: String = raw.trim().chars().take(4).collect();
    let year: i32 = prefix.parse().ok()?;
    (MIN_YEAR..=MAX_YEAR).contains(&year).then_some(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2024"), Some(2024));
        assert_eq!(parse_year("2024-05"), Some(2024));
        assert_eq!(parse_year(" 1999 "), Some(1999));
        assert_eq!(parse_year("invalid"), None);
        assert_eq!(parse_year("1700"), None);
        assert_eq!(parse_year("2101"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn test_ids_follow_corpus_order() {
        let docs = DocumentRef::from_records(vec![
            DocumentRecord {
                title: "First".into(),
                year: Some("2020".into()),
                journal: "J1".into(),
            },
            DocumentRecord {
                title: "Second".into(),
                year: None,
                journal: String::new(),
            },
        ]);

        assert_eq!(docs[0].id(), "A0");
        assert_eq!(docs[0].year(), Some(2020));
        assert_eq!(docs[0].journal(), "J1");
        assert_eq!(docs[1].id(), "A1");
        assert_eq!(docs[1].title(), "Second");
        assert_eq!(docs[1].year(), None);
    }

    #[test]
    fn test_out_of_range_year_is_unknown() {
        let doc = DocumentRef::new(3, "Old", Some(1650), "");
        assert_eq!(doc.id(), "A3");
        assert_eq!(doc.year(), None);
    }
}
