//! On-demand full-body fetch for a single listing record.
//!
//! Article pages linked from the listing come from many publishers. The body is
//! taken from the first container selector that yields text, falling back to
//! every `<p>` on the page.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{info, instrument, warn};

use super::daum::{SelectorChain, element_text};
use super::{FetchError, ListingSource};

static BODY: Lazy<SelectorChain> = Lazy::new(|| {
    SelectorChain::parse(&["div.article_view", "section[dmcf-sid]", "article", "#articleBody"])
});
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Fetch `link` and return its article text.
///
/// An empty link is a [`FetchError::MissingLink`] and makes no request. A page
/// with no recognizable body yields an empty string.
#[instrument(level = "info", skip(source))]
pub async fn fetch_body<S: ListingSource>(source: &S, link: &str) -> Result<String, FetchError> {
    if link.is_empty() {
        return Err(FetchError::MissingLink);
    }

    let html = source.fetch(link).await?;
    let body = body_text(&html);
    if body.is_empty() {
        warn!("No article body found");
    } else {
        info!(chars = body.chars().count(), "Parsed article body");
    }
    Ok(body)
}

/// Extract article text from a full HTML document.
pub fn body_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = document.root_element();

    if let Some(container) = BODY.first_match(root) {
        let text = paragraphs_or_text(container);
        if !text.is_empty() {
            return text;
        }
    }

    paragraphs_or_text(root)
}

fn paragraphs_or_text(scope: scraper::ElementRef<'_>) -> String {
    let paragraphs: Vec<String> = scope
        .select(&PARAGRAPH)
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() && scope.value().name() != "html" {
        element_text(scope)
    } else {
        paragraphs.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::FakeSource;
    use reqwest::StatusCode;

    #[test]
    fn test_body_from_article_view() {
        let html = r#"
            <html><body>
              <p>사이드바 문단</p>
              <div class="article_view">
                <p> 첫 문단. </p>
                <p></p>
                <p>둘째 문단.</p>
              </div>
            </body></html>"#;
        assert_eq!(body_text(html), "첫 문단.\n둘째 문단.");
    }

    #[test]
    fn test_body_container_without_paragraphs() {
        let html = r#"<article>  Plain article text  </article>"#;
        assert_eq!(body_text(html), "Plain article text");
    }

    #[test]
    fn test_body_falls_back_to_all_paragraphs() {
        let html = r#"<html><body><p>One</p><div><p>Two</p></div></body></html>"#;
        assert_eq!(body_text(html), "One\nTwo");
    }

    #[test]
    fn test_body_of_empty_page() {
        assert_eq!(body_text("<html><body><div>nav</div></body></html>"), "");
    }

    #[tokio::test]
    async fn test_fetch_body_without_link_makes_no_request() {
        let source = FakeSource::new();
        let result = fetch_body(&source, "").await;
        assert!(matches!(result, Err(FetchError::MissingLink)));
        assert_eq!(source.request_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_body_propagates_transport_failure() {
        let source = FakeSource::new().failing("v.daum.net", StatusCode::BAD_GATEWAY);
        let result = fetch_body(&source, "https://v.daum.net/v/1").await;
        assert!(matches!(result, Err(FetchError::Status(StatusCode::BAD_GATEWAY))));
    }

    #[tokio::test]
    async fn test_fetch_body_success() {
        let source = FakeSource::new().page(
            "v.daum.net/v/1",
            r#"<div class="article_view"><p>본문</p></div>"#,
        );
        let body = fetch_body(&source, "https://v.daum.net/v/1").await.unwrap();
        assert_eq!(body, "본문");
    }
}
