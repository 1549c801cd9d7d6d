use common::{KeyValue, Mapper};
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{Error, OccurrenceResult, RecordId, Result};

/// Which form of the record the id is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdCase {
    /// From the lowercased record, so `ID2|...` yields `id2`.
    #[default]
    Lowercased,
    /// From the record as given. Only matching is case-folded.
    Preserved,
}

/// What `try_count` does with a matching record that has no separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    #[default]
    Tolerate,
    Reject,
}

/// Scans tweet records of the form `<id>|<text>` for a keyword,
/// case-insensitively.
#[derive(Debug, Clone)]
pub struct KeywordCounter {
    keyword: String,
    needle: String,
    id_case: IdCase,
    malformed: MalformedPolicy,
}

impl KeywordCounter {
    pub fn new(keyword: impl Into<String>) -> Result<Self> {
        let keyword = keyword.into();
        if keyword.is_empty() {
            return Err(Error::EmptyKeyword);
        }
        Ok(Self::unchecked(keyword))
    }

    pub(crate) fn unchecked(keyword: String) -> Self {
        let needle = keyword.to_lowercase();
        Self {
            keyword,
            needle,
            id_case: IdCase::default(),
            malformed: MalformedPolicy::default(),
        }
    }

    pub fn id_case(mut self, id_case: IdCase) -> Self {
        self.id_case = id_case;
        self
    }

    pub fn malformed(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Never fails; records without a separator come back as
    /// [`RecordId::Unseparated`] whatever the malformed policy.
    pub fn count<I, S>(&self, records: I) -> OccurrenceResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = records
            .into_iter()
            .filter_map(|record| self.match_record(record.as_ref()))
            .collect_vec();
        self.finish(ids)
    }

    /// Like [`count`](Self::count), but under [`MalformedPolicy::Reject`] the
    /// first matching record without a separator is an error.
    pub fn try_count<I, S>(&self, records: I) -> Result<OccurrenceResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                self.match_record(record.as_ref()).map(|id| (index, id))
            })
            .map(|(index, id)| match id {
                RecordId::Unseparated(record) if self.malformed == MalformedPolicy::Reject => {
                    Err(Error::MalformedRecord { index, record })
                }
                id => Ok(id),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.finish(ids))
    }

    fn match_record(&self, record: &str) -> Option<RecordId> {
        let folded = record.to_lowercase();
        if !folded.contains(self.needle.as_str()) {
            return None;
        }
        let id = match self.id_case {
            IdCase::Lowercased => RecordId::extract(&folded),
            IdCase::Preserved => RecordId::extract(record),
        };
        if id.is_separated() {
            trace!(%id, "record matched");
        } else {
            debug!(record, "matching record has no separator, using whole record as id");
        }
        Some(id)
    }

    fn finish(&self, ids: Vec<RecordId>) -> OccurrenceResult {
        let result = OccurrenceResult::new(self.keyword.clone(), ids);
        debug!(keyword = %self.keyword, count = result.count(), "scan finished");
        result
    }
}

impl Mapper for KeywordCounter {
    /// One `(keyword, id)` pair per matching line of `contents`.
    fn map(&self, filename: &str, contents: &str) -> Vec<KeyValue> {
        let kvs = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| self.match_record(line))
            .map(|id| KeyValue {
                key: self.keyword.clone(),
                value: id.into_string(),
            })
            .collect_vec();
        debug!(filename, keyword = %self.keyword, emitted = kvs.len(), "map finished");
        kvs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(result: &OccurrenceResult) -> Vec<&str> {
        result.ids().iter().map(RecordId::as_str).collect()
    }

    #[test]
    fn test_new_rejects_empty_keyword() {
        assert_eq!(KeywordCounter::new("").unwrap_err(), Error::EmptyKeyword);
        assert_eq!(KeywordCounter::new("shot").unwrap().keyword(), "shot");
    }

    #[test]
    fn test_preserved_id_case() {
        let _ = common::init_logger();
        let counter = KeywordCounter::new("vaccine")
            .unwrap()
            .id_case(IdCase::Preserved);
        let result = counter.count(["ID2|I love vaccines", "xY|no match", "AbC|VACCINE"]);
        assert_eq!(ids(&result), ["ID2", "AbC"]);
    }

    #[test]
    fn test_preserved_unseparated_keeps_original_text() {
        let counter = KeywordCounter::new("vaccine")
            .unwrap()
            .id_case(IdCase::Preserved);
        let result = counter.count(["OnlyVaccineText"]);
        assert_eq!(
            result.into_ids(),
            vec![RecordId::Unseparated("OnlyVaccineText".to_string())]
        );
    }

    #[test]
    fn test_reject_reports_first_malformed_match() {
        let counter = KeywordCounter::new("vaccine")
            .unwrap()
            .malformed(MalformedPolicy::Reject);
        let records = [
            "1|vaccine",
            "no separator, no keyword",
            "vaccine without id",
            "also vaccine without id",
        ];
        assert_eq!(
            counter.try_count(records).unwrap_err(),
            Error::MalformedRecord {
                index: 2,
                record: "vaccine without id".to_string(),
            }
        );
    }

    #[test]
    fn test_reject_ignores_non_matching_malformed() {
        let counter = KeywordCounter::new("vaccine")
            .unwrap()
            .malformed(MalformedPolicy::Reject);
        let result = counter.try_count(["junk", "7|Vaccine"]).unwrap();
        assert_eq!(ids(&result), ["7"]);
    }

    #[test]
    fn test_tolerate_try_count_matches_count() {
        let counter = KeywordCounter::new("vaccine").unwrap();
        let records = ["1|vaccine", "onlyvaccinetext"];
        assert_eq!(counter.try_count(records).unwrap(), counter.count(records));
    }

    #[test]
    fn test_count_ignores_reject_policy() {
        let counter = KeywordCounter::new("vaccine")
            .unwrap()
            .malformed(MalformedPolicy::Reject);
        let result = counter.count(["onlyvaccinetext"]);
        assert_eq!(result.count(), 1);
        assert!(!result.ids()[0].is_separated());
    }

    #[test]
    fn test_map_emits_keyword_id_pairs() {
        let counter = KeywordCounter::new("Vaccine").unwrap();
        let contents = "101|I got my vaccine today\n102|I hate shots\n\n103|Vaccines save lives\r\n";
        let kvs = counter.map("tweets-0.txt", contents);
        let pairs: Vec<_> = kvs.iter().map(|kv| (kv.key.as_str(), kv.value.as_str())).collect();
        assert_eq!(pairs, [("Vaccine", "101"), ("Vaccine", "103")]);
    }

    #[test]
    fn test_map_empty_contents() {
        let counter = KeywordCounter::new("vaccine").unwrap();
        assert!(counter.map("empty.txt", "").is_empty());
    }

    #[test]
    fn test_concurrent_invocations_agree() {
        let counter = KeywordCounter::new("vaccine").unwrap();
        let records: Vec<String> = (0..200)
            .map(|i| {
                if i % 3 == 0 {
                    format!("{i}|Vaccine day")
                } else {
                    format!("{i}|nothing here")
                }
            })
            .collect();
        let expected = counter.count(&records);

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| counter.count(&records)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
        assert_eq!(expected.count(), 67);
    }
}
