use std::collections::HashSet;

use crate::types::ArticleRecord;

/// Dedup key used when printing or exporting a batch: the article id when
/// present, the `(title, link)` pair otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ReportKey {
    Aid(String),
    TitleLink(String, String),
}

impl ReportKey {
    fn of(record: &ArticleRecord) -> Self {
        if record.aid.is_empty() {
            ReportKey::TitleLink(record.title.clone(), record.link.clone())
        } else {
            ReportKey::Aid(record.aid.clone())
        }
    }
}

/// Drops records whose identity key (`aid`, else `link`) was already seen,
/// keeping first occurrences in order.
pub fn dedupe_by_identity(records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.identity_key().to_string()))
        .collect()
}

/// Batch-report variant: same first-wins rule, but records without an `aid`
/// are keyed by `(title, link)` instead of the bare link.
pub fn dedupe_for_report(records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(ReportKey::of(r)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(aid: &str, title: &str, link: &str) -> ArticleRecord {
        ArticleRecord {
            aid: aid.to_string(),
            title: title.to_string(),
            link: link.to_string(),
            press: String::new(),
            time: String::new(),
        }
    }

    #[test]
    fn same_aid_different_link_keeps_first() {
        let records = vec![
            record("0001", "A", "https://news.naver.com/a"),
            record("0001", "B", "https://news.naver.com/b"),
        ];
        let unique = dedupe_by_identity(records);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].title, "A");
    }

    #[test]
    fn missing_aid_falls_back_to_link() {
        let records = vec![
            record("", "A", "https://news.naver.com/a"),
            record("", "A", "https://news.naver.com/a"),
            record("", "B", "https://news.naver.com/b"),
        ];
        let unique = dedupe_by_identity(records);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn dedup_is_idempotent() {
        let records = vec![
            record("0001", "A", "https://news.naver.com/a"),
            record("", "B", "https://news.naver.com/b"),
            record("0001", "C", "https://news.naver.com/c"),
        ];
        let once = dedupe_by_identity(records);
        let twice = dedupe_by_identity(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn report_dedup_keys_on_title_link_pair() {
        let records = vec![
            record("", "A", "https://news.naver.com/a"),
            record("", "B", "https://news.naver.com/a"),
        ];
        // Same link but different titles: both survive the report policy.
        let unique = dedupe_for_report(records);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn report_dedup_still_prefers_aid() {
        let records = vec![
            record("0001", "A", "https://news.naver.com/a"),
            record("0001", "B", "https://news.naver.com/b"),
        ];
        let unique = dedupe_for_report(records);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].title, "A");
    }

    #[test]
    fn preserves_first_seen_order() {
        let records = vec![
            record("0002", "B", "https://news.naver.com/b"),
            record("0001", "A", "https://news.naver.com/a"),
            record("0002", "B2", "https://news.naver.com/b2"),
        ];
        let unique = dedupe_by_identity(records);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].aid, "0002");
        assert_eq!(unique[1].aid, "0001");
    }
}
