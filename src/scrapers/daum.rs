//! Daum news search listing scraper.
//!
//! The search results page at `https://search.daum.net/search?w=news` has shipped
//! several markup generations. Every field is therefore read through a
//! [`SelectorChain`]: an ordered list of CSS selectors where the first one that
//! matches anything wins. A field that matches nothing degrades to a placeholder
//! instead of failing the item, except the title, without which the item is
//! dropped.
//!
//! # Selector chains
//!
//! | Field | Selectors (in order) | Fallback |
//! |-------|----------------------|----------|
//! | item | `li[data-docid]`, `ul.c-list-basic > li`, `div.item-bundle-news` | none |
//! | title + link | `div.item-title strong.tit-g a`, `a.el-title` | item dropped |
//! | press | `span.txt_info`, `span.el-info` | [`UNKNOWN_PRESS`] |
//! | summary | `p.conts-desc`, `div.el-desc` | [`NO_SUMMARY`] |
//! | date | `span.gem-subinfo span.txt_info` | [`UNKNOWN_DATE`] |

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::{NO_SUMMARY, UNKNOWN_DATE, UNKNOWN_PRESS};

/// Default search endpoint.
pub const SEARCH_BASE_URL: &str = "https://search.daum.net/search";

static ITEMS: Lazy<SelectorChain> = Lazy::new(|| {
    SelectorChain::parse(&["li[data-docid]", "ul.c-list-basic > li", "div.item-bundle-news"])
});
static TITLE: Lazy<SelectorChain> =
    Lazy::new(|| SelectorChain::parse(&["div.item-title strong.tit-g a", "a.el-title"]));
static PRESS: Lazy<SelectorChain> =
    Lazy::new(|| SelectorChain::parse(&["span.txt_info", "span.el-info"]));
static SUMMARY: Lazy<SelectorChain> =
    Lazy::new(|| SelectorChain::parse(&["p.conts-desc", "div.el-desc"]));
static DATE: Lazy<SelectorChain> =
    Lazy::new(|| SelectorChain::parse(&["span.gem-subinfo span.txt_info"]));

/// Ordered selector alternatives for one field.
#[derive(Debug)]
pub struct SelectorChain(Vec<Selector>);

impl SelectorChain {
    /// Parse a chain from selector literals.
    ///
    /// # Panics
    ///
    /// Panics if a literal is not valid CSS. Chains are built from constants.
    pub fn parse(rules: &[&str]) -> Self {
        Self(
            rules
                .iter()
                .map(|rule| Selector::parse(rule).unwrap())
                .collect(),
        )
    }

    /// First element matched by the first selector that matches anything.
    pub fn first_match<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.0.iter().find_map(|selector| scope.select(selector).next())
    }

    /// Every element matched by the first selector that matches anything.
    pub fn all_matches<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        self.0
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|found| !found.is_empty())
            .unwrap_or_default()
    }

    /// Trimmed text of [`Self::first_match`], or `placeholder` when nothing matched.
    fn text_or(&self, scope: ElementRef<'_>, placeholder: &str) -> String {
        self.first_match(scope)
            .map(element_text)
            .unwrap_or_else(|| placeholder.to_string())
    }
}

/// Fields pulled from one listing item before its date is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    pub title: String,
    pub link: String,
    pub press: String,
    pub summary: String,
    pub raw_date_token: String,
}

/// Build the URL for one page of most-recent-first results.
pub fn search_url(base: &str, keyword: &str, page: u32) -> String {
    format!(
        "{}?w=news&q={}&p={}&sort=recency",
        base,
        urlencoding::encode(keyword),
        page
    )
}

/// All listing items on a results page, in document order.
pub fn listing_items(document: &Html) -> Vec<ElementRef<'_>> {
    ITEMS.all_matches(document)
}

/// Extract one listing item.
///
/// Returns `None` when neither title selector matches or the title text is
/// empty. Relative `href`s are resolved against `page_url` when one is given.
pub fn extract(item: ElementRef<'_>, page_url: Option<&Url>) -> Option<ExtractedItem> {
    let title_el = TITLE.first_match(item)?;
    let title = element_text(title_el);
    if title.is_empty() {
        return None;
    }

    let link = title_el
        .value()
        .attr("href")
        .map(str::trim)
        .map(|href| {
            page_url
                .and_then(|base| base.join(href).ok())
                .map(|u| u.to_string())
                .unwrap_or_else(|| href.to_string())
        })
        .unwrap_or_default();

    Some(ExtractedItem {
        title,
        link,
        press: PRESS.text_or(item, UNKNOWN_PRESS),
        summary: SUMMARY.text_or(item, NO_SUMMARY),
        raw_date_token: DATE.text_or(item, UNKNOWN_DATE),
    })
}

/// Descendant text, whitespace-trimmed at both ends.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://search.daum.net/search?w=news&q=test&p=1&sort=recency").unwrap()
    }

    fn extract_all(html: &str) -> Vec<Option<ExtractedItem>> {
        let document = Html::parse_document(html);
        listing_items(&document)
            .into_iter()
            .map(|item| extract(item, Some(&page_url())))
            .collect()
    }

    const CURRENT_LAYOUT: &str = r#"
        <ul class="c-list-basic">
          <li data-docid="1">
            <div class="item-title"><strong class="tit-g"><a href="https://v.daum.net/v/1">  첫 번째 기사 </a></strong></div>
            <span class="txt_info">연합뉴스</span>
            <p class="conts-desc">  요약 내용입니다. </p>
            <span class="gem-subinfo"><span class="txt_info">3분전</span></span>
          </li>
          <li data-docid="2">
            <div class="item-title"><strong class="tit-g"><a href="/v/2">두 번째 기사</a></strong></div>
          </li>
        </ul>"#;

    #[test]
    fn test_search_url_encodes_keyword() {
        assert_eq!(
            search_url(SEARCH_BASE_URL, "삼성 라이온즈", 3),
            "https://search.daum.net/search?w=news&q=%EC%82%BC%EC%84%B1%20%EB%9D%BC%EC%9D%B4%EC%98%A8%EC%A6%88&p=3&sort=recency"
        );
    }

    #[test]
    fn test_primary_selectors() {
        let items = extract_all(CURRENT_LAYOUT);
        assert_eq!(items.len(), 2);

        let first = items[0].clone().unwrap();
        assert_eq!(first.title, "첫 번째 기사");
        assert_eq!(first.link, "https://v.daum.net/v/1");
        assert_eq!(first.press, "연합뉴스");
        assert_eq!(first.summary, "요약 내용입니다.");
        assert_eq!(first.raw_date_token, "3분전");
    }

    #[test]
    fn test_missing_fields_degrade_to_placeholders() {
        let second = extract_all(CURRENT_LAYOUT)[1].clone().unwrap();
        assert_eq!(second.title, "두 번째 기사");
        assert_eq!(second.link, "https://search.daum.net/v/2");
        assert_eq!(second.press, UNKNOWN_PRESS);
        assert_eq!(second.summary, NO_SUMMARY);
        assert_eq!(second.raw_date_token, UNKNOWN_DATE);
    }

    #[test]
    fn test_fallback_selectors() {
        let html = r#"
            <div class="item-bundle-news">
              <a class="el-title" href="https://news.example.com/a">Fallback title</a>
              <span class="el-info">Example Press</span>
              <div class="el-desc">Fallback summary</div>
            </div>"#;
        let items = extract_all(html);
        assert_eq!(items.len(), 1);

        let item = items[0].clone().unwrap();
        assert_eq!(item.title, "Fallback title");
        assert_eq!(item.link, "https://news.example.com/a");
        assert_eq!(item.press, "Example Press");
        assert_eq!(item.summary, "Fallback summary");
        assert_eq!(item.raw_date_token, UNKNOWN_DATE);
    }

    #[test]
    fn test_primary_item_selector_wins_over_fallback() {
        let html = r#"
            <li data-docid="x"><a class="el-title" href="/x">Primary</a></li>
            <div class="item-bundle-news"><a class="el-title" href="/y">Ignored</a></div>"#;
        let items = extract_all(html);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap().title, "Primary");
    }

    #[test]
    fn test_item_without_title_produces_nothing() {
        let html = r#"
            <ul class="c-list-basic">
              <li><span class="txt_info">Press only</span><p class="conts-desc">No headline</p></li>
              <li><a class="el-title" href="/empty">   </a></li>
            </ul>"#;
        let items = extract_all(html);
        assert_eq!(items, vec![None, None]);
    }

    #[test]
    fn test_title_without_href_has_empty_link() {
        let html = r#"<li data-docid="1"><a class="el-title">No link</a></li>"#;
        let item = extract_all(html)[0].clone().unwrap();
        assert_eq!(item.title, "No link");
        assert!(item.link.is_empty());
    }

    #[test]
    fn test_relative_link_kept_without_base() {
        let document = Html::parse_document(r#"<li data-docid="1"><a class="el-title" href="/v/7">T</a></li>"#);
        let item = extract(listing_items(&document)[0], None).unwrap();
        assert_eq!(item.link, "/v/7");
    }

    #[test]
    fn test_page_without_items() {
        assert!(extract_all("<html><body><p>검색결과가 없습니다</p></body></html>").is_empty());
    }
}
