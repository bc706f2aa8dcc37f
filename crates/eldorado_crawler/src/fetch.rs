use std::time::Duration;

use chrono::{FixedOffset, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use url::Url;

use eldorado_core::{Error, Result};

/// Section listing page of the portal.
pub const BASE_URL: &str = "https://news.naver.com/main/list.naver";

/// Origin used to absolutize root-relative article links.
pub const PORTAL_ORIGIN: &str = "https://news.naver.com";

/// Fixed query parameters selecting the title-only front section listing.
const DEFAULT_PARAMS: [(&str, &str); 4] = [
    ("mode", "LSD"),
    ("mid", "sec"),
    ("sid1", "001"),
    ("listType", "title"),
];

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/123.0.0.0 Safari/537.36";
const REFERER_URL: &str = "https://news.naver.com/";
const ACCEPT_LANGUAGE_VALUE: &str = "ko,en;q=0.9";

const FETCH_TIMEOUT: Duration = Duration::from_secs(12);

/// Today in Korea Standard Time as `YYYYMMDD`. The portal's listing day
/// rolls over on KST midnight regardless of where we run.
pub fn today_yyyymmdd_kst() -> String {
    let kst = FixedOffset::east_opt(9 * 3600).unwrap();
    Utc::now().with_timezone(&kst).format("%Y%m%d").to_string()
}

/// Builds the listing URL for `date`, defaulting to today in KST.
/// The date value is taken as-is; format checks belong to the API boundary.
pub fn build_list_url(date: Option<&str>) -> String {
    let date = date.map(str::to_string).unwrap_or_else(today_yyyymmdd_kst);
    let mut url = Url::parse(BASE_URL).unwrap();
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in DEFAULT_PARAMS {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("date", &date);
    }
    url.into()
}

/// HTTP client against the portal, configured once with the browser-like
/// headers the listing page expects.
pub struct NewsFetcher {
    client: Client,
}

impl NewsFetcher {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(REFERER_URL));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(FETCH_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    /// One GET against the portal. Transport failures (timeout, DNS,
    /// refused connection) surface as `Error::Transport`; the caller decides
    /// what a non-200 status means for the body.
    pub async fn get(&self, url: &str) -> Result<(u16, String)> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Maps a non-200 listing response to `Error::Fetch` carrying the status.
pub fn ensure_success(status: u16) -> Result<()> {
    if status == 200 {
        Ok(())
    } else {
        Err(Error::Fetch { status })
    }
}
