use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use eldorado_core::ArticleRecord;

use crate::fetch::PORTAL_ORIGIN;

fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Container candidates, most specific first. The portal's markup drifts;
/// when nothing matches we fall back to the whole document.
static CONTAINER_RULES: Lazy<Vec<Selector>> = Lazy::new(|| {
    vec![
        sel("#main_content .list_body.newsflash_body"),
        sel("#main_content .list_body"),
        sel("#main_content"),
    ]
});

/// The two known listing layouts, as one selector so matches come back in
/// document order.
static ITEM_PRIMARY: Lazy<Selector> =
    Lazy::new(|| sel("ul.type06_headline li, ul.type06 li"));

/// Broad fallback when neither listing layout is present.
static ITEM_FALLBACK: Lazy<Selector> = Lazy::new(|| sel("li"));

static PRESS_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".writing"));
static TIME_SELECTOR: Lazy<Selector> = Lazy::new(|| sel(".date"));

/// One step of the anchor-selection cascade. Rules run in order and the
/// first hit wins.
enum AnchorRule {
    /// Any matching anchor with a non-empty href; text may still be empty
    /// and is filtered later.
    DetailLink(Selector),
    /// First matching anchor with both non-empty text and non-empty href.
    FirstWithText(Selector),
}

static ANCHOR_RULES: Lazy<Vec<AnchorRule>> = Lazy::new(|| {
    vec![
        // Anchors pointing at the article detail page take priority.
        AnchorRule::DetailLink(sel("a[href*='read.naver']")),
        AnchorRule::DetailLink(sel("dt > a[href*='read.naver']")),
        AnchorRule::DetailLink(sel("dd > a[href*='read.naver']")),
        // Otherwise the first anchor that actually carries a title.
        AnchorRule::FirstWithText(sel("dt > a")),
        AnchorRule::FirstWithText(sel("a")),
    ]
});

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn anchor_href(anchor: ElementRef<'_>) -> Option<String> {
    anchor
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}

/// Walks the anchor cascade for one list item, returning `(title, raw
/// href)` of the representative anchor, or `None` when no rule matches.
fn pick_title_anchor(item: ElementRef<'_>) -> Option<(String, String)> {
    for rule in ANCHOR_RULES.iter() {
        match rule {
            AnchorRule::DetailLink(selector) => {
                if let Some(anchor) = item.select(selector).next() {
                    if let Some(href) = anchor_href(anchor) {
                        return Some((element_text(anchor), href));
                    }
                }
            }
            AnchorRule::FirstWithText(selector) => {
                for anchor in item.select(selector) {
                    let text = element_text(anchor);
                    if text.is_empty() {
                        continue;
                    }
                    if let Some(href) = anchor_href(anchor) {
                        return Some((text, href));
                    }
                }
            }
        }
    }
    None
}

/// Absolute links pass through, root-relative ones get the portal origin
/// prefixed, anything else is rejected.
fn normalize_link(raw: &str) -> Option<String> {
    if raw.starts_with("http") {
        Some(raw.to_string())
    } else if raw.starts_with('/') {
        Some(format!("{}{}", PORTAL_ORIGIN, raw))
    } else {
        None
    }
}

/// First `aid` query parameter of the link. An unparseable link means "no
/// id", never an error.
fn extract_article_id(link: &str) -> String {
    Url::parse(link)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "aid")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}

fn extract_record(item: ElementRef<'_>) -> Option<ArticleRecord> {
    let (title, raw_link) = pick_title_anchor(item)?;
    let link = normalize_link(&raw_link)?;
    if title.is_empty() || !link.starts_with("http") {
        return None;
    }

    let press = item
        .select(&PRESS_SELECTOR)
        .next()
        .map(element_text)
        .unwrap_or_default();
    let time = item
        .select(&TIME_SELECTOR)
        .next()
        .map(element_text)
        .unwrap_or_default();

    Some(ArticleRecord {
        aid: extract_article_id(&link),
        title,
        link,
        press,
        time,
    })
}

/// Parses a listing page body and extracts its article records in document
/// order. Items without a usable anchor or link are dropped; a page with no
/// recognizable items yields an empty vector, not an error.
pub fn extract_records(html: &str) -> Vec<ArticleRecord> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let container = CONTAINER_RULES
        .iter()
        .find_map(|selector| root.select(selector).next())
        .unwrap_or(root);

    let mut items: Vec<ElementRef<'_>> = container.select(&ITEM_PRIMARY).collect();
    if items.is_empty() {
        items = container.select(&ITEM_FALLBACK).collect();
    }

    items.into_iter().filter_map(extract_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(items: &str) -> String {
        format!(
            r#"<html><body>
                 <div id="main_content">
                   <div class="list_body newsflash_body">
                     <ul class="type06_headline">{}</ul>
                   </div>
                 </div>
               </body></html>"#,
            items
        )
    }

    #[test]
    fn extracts_absolute_and_relative_links_in_order() {
        let html = listing(
            r#"<li><dl><dt><a href="https://news.naver.com/read.naver?aid=0001">Title A</a></dt></dl></li>
               <li><dl><dt><a href="/read.naver?aid=0002">Title B</a></dt></dl></li>"#,
        );
        let records = extract_records(&html);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].aid, "0001");
        assert_eq!(records[0].title, "Title A");
        assert_eq!(records[0].link, "https://news.naver.com/read.naver?aid=0001");
        assert_eq!(records[1].aid, "0002");
        assert_eq!(records[1].title, "Title B");
        assert_eq!(records[1].link, "https://news.naver.com/read.naver?aid=0002");
    }

    #[test]
    fn picks_up_press_and_time() {
        let html = listing(
            r#"<li><dl>
                 <dt><a href="/read.naver?aid=0003">Title</a></dt>
                 <dd><span class="writing">연합뉴스</span><span class="date">1시간전</span></dd>
               </dl></li>"#,
        );
        let records = extract_records(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].press, "연합뉴스");
        assert_eq!(records[0].time, "1시간전");
    }

    #[test]
    fn missing_press_and_time_become_empty() {
        let html = listing(r#"<li><a href="/read.naver?aid=0004">Title</a></li>"#);
        let records = extract_records(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].press, "");
        assert_eq!(records[0].time, "");
    }

    #[test]
    fn detail_anchor_wins_over_other_anchors() {
        let html = listing(
            r#"<li>
                 <a href="https://news.naver.com/photo?aid=9999">Photo</a>
                 <dt><a href="/read.naver?aid=0005">Real title</a></dt>
               </li>"#,
        );
        let records = extract_records(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Real title");
        assert_eq!(records[0].aid, "0005");
    }

    #[test]
    fn falls_back_to_first_anchor_with_text() {
        let html = listing(
            r#"<li>
                 <a href="/section/100"></a>
                 <a href="/some/article">Fallback title</a>
               </li>"#,
        );
        let records = extract_records(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Fallback title");
        assert_eq!(records[0].link, "https://news.naver.com/some/article");
        assert_eq!(records[0].aid, "");
    }

    #[test]
    fn item_without_any_anchor_is_skipped() {
        let html = listing(
            r#"<li><span>no link here</span></li>
               <li><a href="/read.naver?aid=0006">Kept</a></li>"#,
        );
        let records = extract_records(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Kept");
    }

    #[test]
    fn non_rooted_relative_link_is_discarded() {
        let html = listing(
            r#"<li><a href="javascript:void(0)">Scripted</a></li>
               <li><a href="read.naver?aid=0007">Bare relative</a></li>"#,
        );
        assert!(extract_records(&html).is_empty());
    }

    #[test]
    fn empty_title_is_discarded() {
        let html = listing(r#"<li><a href="/read.naver?aid=0008"><img src="x.jpg"></a></li>"#);
        assert!(extract_records(&html).is_empty());
    }

    #[test]
    fn type06_list_is_also_matched() {
        let html = r#"<html><body><div id="main_content">
              <div class="list_body">
                <ul class="type06"><li><a href="/read.naver?aid=0009">Plain item</a></li></ul>
              </div>
            </div></body></html>"#;
        let records = extract_records(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].aid, "0009");
    }

    #[test]
    fn broad_li_fallback_handles_unknown_lists() {
        let html = r#"<html><body><div id="main_content">
              <ul class="totally_new_layout">
                <li><a href="/read.naver?aid=0010">Drifted markup</a></li>
              </ul>
            </div></body></html>"#;
        let records = extract_records(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Drifted markup");
    }

    #[test]
    fn container_falls_back_to_document_root() {
        let html = r#"<html><body>
              <ul class="type06_headline">
                <li><a href="/read.naver?aid=0011">No main_content wrapper</a></li>
              </ul>
            </body></html>"#;
        let records = extract_records(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].aid, "0011");
    }

    #[test]
    fn zero_items_yield_empty_not_error() {
        assert!(extract_records("<html><body><p>nothing</p></body></html>").is_empty());
        assert!(extract_records("").is_empty());
    }

    #[test]
    fn aid_parse_failure_means_empty_id() {
        assert_eq!(extract_article_id("http://[broken"), "");
        assert_eq!(extract_article_id("https://news.naver.com/read.naver"), "");
        assert_eq!(
            extract_article_id("https://news.naver.com/read.naver?oid=1&aid=0012&aid=0013"),
            "0012"
        );
    }

    #[test]
    fn anchor_text_is_trimmed() {
        let html = listing(r#"<li><a href="/read.naver?aid=0014">  Padded title
            </a></li>"#);
        let records = extract_records(&html);
        assert_eq!(records[0].title, "Padded title");
    }
}
