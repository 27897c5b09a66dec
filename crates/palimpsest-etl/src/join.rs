//! Cross-Reference Joiner: posts held by a member of parliament on a date.
//!
//! The postings table is loaded once per run and only read afterwards. A
//! missing key is the normal case and yields empty post lists.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use palimpsest_core::{Error, Result};

use crate::error::Warning;

/// Composite join key: member id and the calendar date at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoinKey {
    pub member_id: u64,
    pub date: NaiveDateTime,
}

impl JoinKey {
    #[must_use]
    pub fn new(member_id: u64, date: NaiveDateTime) -> Self {
        Self { member_id, date }
    }

    /// Build a key from the raw text fields of a primary record.
    ///
    /// Returns `None` when the member id is not numeric or the date cannot
    /// be read.
    pub fn parse(member_id: &str, date: &str) -> Option<Self> {
        let member_id = member_id.trim().parse::<u64>().ok()?;
        let date = parse_date(date)?;
        Some(Self { member_id, date })
    }
}

/// Read a date or datetime and pin it to midnight of that day.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let date = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()?;
    date.and_hms_opt(0, 0, 0)
}

/// Posts held on one day, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postings {
    pub parliamentary: Vec<String>,
    pub government: Vec<String>,
    pub opposition: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDate {
    EpochMillis(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(
        default,
        alias = "parl_post_name",
        alias = "gov_post_name",
        alias = "opp_post_name"
    )]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPostingRow {
    mnis_id: Option<RawId>,
    date: Option<RawDate>,
    #[serde(default)]
    parliamentary_posts: Option<Vec<RawPost>>,
    #[serde(default)]
    government_posts: Option<Vec<RawPost>>,
    #[serde(default)]
    opposition_posts: Option<Vec<RawPost>>,
}

impl RawPostingRow {
    fn key(&self) -> Option<JoinKey> {
        let member_id = match self.mnis_id.as_ref()? {
            RawId::Number(id) => *id,
            RawId::Text(text) => text.trim().parse().ok()?,
        };
        let date = match self.date.as_ref()? {
            RawDate::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms)?
                .naive_utc()
                .date()
                .and_hms_opt(0, 0, 0)?,
            RawDate::Text(text) => parse_date(text)?,
        };
        Some(JoinKey::new(member_id, date))
    }

    fn names(posts: Option<Vec<RawPost>>) -> Vec<String> {
        posts
            .unwrap_or_default()
            .into_iter()
            .filter_map(|post| post.name)
            .collect()
    }

    fn into_postings(self) -> Postings {
        Postings {
            parliamentary: Self::names(self.parliamentary_posts),
            government: Self::names(self.government_posts),
            opposition: Self::names(self.opposition_posts),
        }
    }
}

/// The auxiliary lookup table, keyed by [`JoinKey`].
#[derive(Debug, Clone, Default)]
pub struct PostingsTable {
    entries: HashMap<JoinKey, Postings>,
}

impl PostingsTable {
    /// Load the table from a JSON array of posting rows.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::not_found("postings table", path));
        }
        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded {} posting entries from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let rows: Vec<RawPostingRow> = serde_json::from_reader(reader)?;
        let mut entries = HashMap::with_capacity(rows.len());
        let mut unusable = 0_usize;

        for row in rows {
            let Some(key) = row.key() else {
                unusable += 1;
                continue;
            };
            // The first row for a key wins.
            entries.entry(key).or_insert_with(|| row.into_postings());
        }

        if unusable > 0 {
            log::debug!("Ignored {} posting rows without a usable key", unusable);
        }

        Ok(Self { entries })
    }

    /// Posts for an exact key; `None` when nothing was recorded.
    pub fn get(&self, key: &JoinKey) -> Option<&Postings> {
        self.entries.get(key)
    }

    /// Parliamentary post names for `key`, empty when there is no match.
    pub fn parliamentary_posts(&self, key: &JoinKey) -> &[String] {
        self.get(key)
            .map(|postings| postings.parliamentary.as_slice())
            .unwrap_or(&[])
    }

    /// Join a primary record's raw id and date fields.
    ///
    /// Never fails: blank fields mean no join was attempted, and fields that
    /// cannot form a key come back as a warning next to empty postings.
    pub fn join(&self, member_id: &str, date: &str) -> (Postings, Option<Warning>) {
        if member_id.trim().is_empty() || date.trim().is_empty() {
            return (Postings::default(), None);
        }
        match JoinKey::parse(member_id, date) {
            Some(key) => (self.get(&key).cloned().unwrap_or_default(), None),
            None => (
                Postings::default(),
                Some(Warning::JoinUnavailable {
                    member_id: member_id.to_string(),
                    date: date.to_string(),
                }),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTS: &str = r#"[
        {
            "mnis_id": 172,
            "date": "2019-01-01 00:00:00",
            "parliamentary_posts": [{"parl_post_name": "Chair, Treasury Committee"}],
            "government_posts": [],
            "opposition_posts": [{"opp_post_name": "Shadow Chancellor"}]
        },
        {
            "mnis_id": 172,
            "date": "2019-01-01 00:00:00",
            "parliamentary_posts": [{"parl_post_name": "Duplicate"}]
        },
        {
            "mnis_id": "8",
            "date": "2020-03-04",
            "parliamentary_posts": null,
            "government_posts": [{"gov_post_name": "Prime Minister"}]
        },
        {
            "mnis_id": "not a number",
            "date": "2020-03-04"
        }
    ]"#;

    fn table() -> PostingsTable {
        PostingsTable::from_reader(POSTS.as_bytes()).unwrap()
    }

    fn key(member_id: u64, date: &str) -> JoinKey {
        JoinKey::new(member_id, parse_date(date).unwrap())
    }

    #[test]
    fn test_parse_date_forms() {
        let midnight = NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date("2019-01-01"), Some(midnight));
        assert_eq!(parse_date("2019-01-01 00:00:00"), Some(midnight));
        assert_eq!(parse_date("2019-01-01T00:00:00"), Some(midnight));
        assert_eq!(parse_date("01/01/2019"), None);
    }

    #[test]
    fn test_first_row_for_a_key_wins() {
        let table = table();
        assert_eq!(
            table.parliamentary_posts(&key(172, "2019-01-01")),
            ["Chair, Treasury Committee".to_string()]
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_all_post_kinds_are_collected() {
        let table = table();
        let postings = table.get(&key(172, "2019-01-01")).unwrap();
        assert_eq!(postings.opposition, vec!["Shadow Chancellor"]);
        assert!(postings.government.is_empty());

        let postings = table.get(&key(8, "2020-03-04")).unwrap();
        assert!(postings.parliamentary.is_empty());
        assert_eq!(postings.government, vec!["Prime Minister"]);
    }

    #[test]
    fn test_missing_key_yields_empty_postings() {
        let (postings, warning) = table().join("172", "1999-12-31");
        assert_eq!(postings, Postings::default());
        assert!(warning.is_none());
    }

    #[test]
    fn test_blank_fields_skip_the_join() {
        let (postings, warning) = table().join("", "2019-01-01");
        assert_eq!(postings, Postings::default());
        assert!(warning.is_none());
    }

    #[test]
    fn test_non_numeric_member_id_warns() {
        let (postings, warning) = table().join("abc", "2019-01-01");
        assert_eq!(postings, Postings::default());
        assert_eq!(
            warning,
            Some(Warning::JoinUnavailable {
                member_id: "abc".to_string(),
                date: "2019-01-01".to_string(),
            })
        );
    }

    #[test]
    fn test_epoch_millis_dates() {
        let table = PostingsTable::from_reader(
            r#"[{"mnis_id": 1, "date": 1546300800000, "parliamentary_posts": [{"parl_post_name": "Speaker"}]}]"#
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(
            table.parliamentary_posts(&key(1, "2019-01-01")),
            ["Speaker".to_string()]
        );
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let result = PostingsTable::load(Path::new("/nonexistent/parliamentary_posts.json"));
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
