use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info};

use eldorado_core::{ArticleRecord, Result};

use crate::Crawler;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Upper bound on remembered identity keys before the oldest are forgotten.
pub const DEFAULT_SEEN_CAPACITY: usize = 10_000;

/// Insertion-ordered set of identity keys with FIFO eviction.
///
/// A watch loop left running would otherwise grow its seen set without
/// bound; past `capacity` insertions the oldest keys are dropped and their
/// articles may be reported again.
#[derive(Debug)]
pub struct SeenSet {
    capacity: usize,
    keys: HashSet<String>,
    order: VecDeque<String>,
}

impl SeenSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            keys: HashSet::new(),
            order: VecDeque::new(),
        }
    }

    /// Marks `key` as seen. Returns `false` when it already was.
    pub fn insert(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.to_string());
        self.order.push_back(key.to_string());
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.keys.remove(&oldest);
            }
        }
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for SeenSet {
    fn default() -> Self {
        Self::new(DEFAULT_SEEN_CAPACITY)
    }
}

/// Repeatedly fetches the listing and reports articles not seen before.
pub struct Watcher {
    crawler: Crawler,
    date: Option<String>,
    interval: Duration,
    debug: bool,
    seen: SeenSet,
}

impl Watcher {
    pub fn new(crawler: Crawler, interval: Duration) -> Self {
        Self {
            crawler,
            date: None,
            interval,
            debug: false,
            seen: SeenSet::default(),
        }
    }

    /// Pin the listing date instead of following KST today.
    pub fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Keeps the records whose identity key is new, marking them seen.
    pub fn sift_new(&mut self, records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
        records
            .into_iter()
            .filter(|record| self.seen.insert(record.identity_key()))
            .collect()
    }

    /// One fetch cycle: whatever the listing shows that we have not yet
    /// reported, in document order. Fetch errors propagate.
    pub async fn poll_once(&mut self) -> Result<Vec<ArticleRecord>> {
        let records = self
            .crawler
            .fetch_titles(self.date.as_deref(), self.debug)
            .await?;
        Ok(self.sift_new(records))
    }

    /// Polls until the process is interrupted. A failed cycle is logged and
    /// the loop keeps going; the interval sleep runs either way.
    pub async fn run(&mut self) -> Result<()> {
        info!(interval_secs = self.interval.as_secs(), "starting watch loop");
        loop {
            match self.poll_once().await {
                Ok(new_records) if new_records.is_empty() => {
                    info!("no new articles");
                }
                Ok(new_records) => {
                    info!(count = new_records.len(), "new articles");
                    for record in &new_records {
                        println!("- {} | {} | {}", record.title, record.press, record.time);
                        println!("  {}", record.link);
                    }
                }
                Err(e) => error!(error = %e, "scrape cycle failed"),
            }
            sleep(self.interval).await;
        }
    }
}
