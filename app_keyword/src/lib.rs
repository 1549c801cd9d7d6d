//! Keyword mapper for tweet batches.
//!
//! Each record is `<id>|<text>`. A record matches when the keyword occurs
//! anywhere in it, ignoring case; the result carries the ids of matching
//! records in input order.

mod counter;
mod error;
mod record;

use serde::Serialize;

pub use counter::{IdCase, KeywordCounter, MalformedPolicy};
pub use error::{Error, Result};
pub use record::{RecordId, SEPARATOR};

/// Summary of one scan. `count` always equals `ids().len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceResult {
    keyword: String,
    count: usize,
    ids: Vec<RecordId>,
}

impl OccurrenceResult {
    fn new(keyword: String, ids: Vec<RecordId>) -> Self {
        Self {
            keyword,
            count: ids.len(),
            ids,
        }
    }

    /// The keyword as the caller passed it, not the matched text.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn ids(&self) -> &[RecordId] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<RecordId> {
        self.ids
    }

    /// Ids that are really whole records lacking a separator.
    pub fn unseparated(&self) -> impl Iterator<Item = &RecordId> {
        self.ids.iter().filter(|id| !id.is_separated())
    }
}

/// Counts the records containing `keyword` and collects their ids.
///
/// Ids are cut from the lowercased record. A matching record without a
/// separator contributes its whole lowercased text as a
/// [`RecordId::Unseparated`] id. An empty keyword matches every record.
pub fn count_occurrences<I, S>(records: I, keyword: &str) -> OccurrenceResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    KeywordCounter::unchecked(keyword.to_owned()).count(records)
}
