pub mod csv;
pub mod dump;
pub mod extract;
pub mod fetch;
pub mod watch;

use tracing::{debug, info};

use eldorado_core::{ArticleRecord, Result};

use dump::{DumpSink, FileDump, DOM_DUMP, RESPONSE_DUMP};
use fetch::{build_list_url, ensure_success, NewsFetcher};

pub use watch::Watcher;

/// Fetch-parse-extract pipeline against the portal's listing page.
pub struct Crawler {
    fetcher: NewsFetcher,
    dump: Box<dyn DumpSink>,
}

impl Crawler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fetcher: NewsFetcher::new()?,
            dump: Box::new(FileDump::default()),
        })
    }

    /// Replace the diagnostic sink; the default writes files next to the
    /// process.
    pub fn with_dump_sink(mut self, dump: Box<dyn DumpSink>) -> Self {
        self.dump = dump;
        self
    }

    /// Fetches the listing for `date` (today in KST when `None`) and
    /// returns its article records in document order.
    ///
    /// A non-200 response fails with `Error::Fetch`, transport problems
    /// with `Error::Transport`. Zero extracted records is a valid result;
    /// with `debug` set the raw HTML of such a page (or of a failed
    /// response) goes to the dump sink for offline inspection.
    pub async fn fetch_titles(&self, date: Option<&str>, debug: bool) -> Result<Vec<ArticleRecord>> {
        let url = build_list_url(date);
        debug!(%url, "fetching listing page");

        let (status, body) = self.fetcher.get(&url).await?;
        if let Err(e) = ensure_success(status) {
            if debug {
                self.dump.dump(RESPONSE_DUMP, &body);
            }
            return Err(e);
        }

        let records = extract::extract_records(&body);
        if records.is_empty() && debug {
            self.dump.dump(DOM_DUMP, &body);
        }
        info!(count = records.len(), "extracted listing records");
        Ok(records)
    }
}

pub mod prelude {
    pub use super::{Crawler, Watcher};
    pub use eldorado_core::{ArticleRecord, Error, Result};
}
