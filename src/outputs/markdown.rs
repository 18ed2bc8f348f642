//! Markdown rendering of a finished search run.

use std::fmt::Write;

use crate::models::Digest;
use crate::outputs::json::file_stem;

/// Filename (without directory) for the Markdown digest.
pub fn markdown_filename(digest: &Digest) -> String {
    format!("{}_{}.md", digest.collected_at.date(), file_stem(&digest.keyword))
}

/// Render `digest` as Markdown, one section per article in collection order.
pub fn digest_to_markdown(digest: &Digest) -> String {
    let mut md = String::new();

    writeln!(md, "# {}", digest.keyword).unwrap();
    writeln!(
        md,
        "\n_{} ~ {} · {} articles · collected {}_\n",
        digest.since,
        digest.until,
        digest.articles.len(),
        digest.collected_at.format("%Y-%m-%d %H:%M")
    )
    .unwrap();

    if digest.articles.is_empty() {
        writeln!(md, "No articles matched the date range.\n").unwrap();
    }

    for entry in &digest.articles {
        let record = &entry.record;
        writeln!(md, "### [{}] {}\n", record.press, record.title).unwrap();

        let when = record
            .resolved_timestamp
            .map(|ts| format!("{} ({})", record.raw_date_token, ts.format("%Y-%m-%d %H:%M")))
            .unwrap_or_else(|| record.raw_date_token.clone());
        writeln!(md, "- **Published**: {}", when).unwrap();
        if record.has_link() {
            writeln!(md, "- **Link**: <{}>", record.link).unwrap();
        }
        writeln!(md, "\n{}\n", record.summary).unwrap();

        if let Some(narration) = &entry.narration {
            writeln!(md, "#### Narration\n\n{}\n", narration).unwrap();
        }
        if let Some(body) = &entry.body {
            writeln!(md, "<details>\n<summary>Body</summary>\n\n{}\n\n</details>\n", body).unwrap();
        }
    }

    if !digest.warnings.is_empty() {
        writeln!(md, "---\n\n#### Skipped pages\n").unwrap();
        for warning in &digest.warnings {
            writeln!(md, "- Page {}: {}", warning.page, warning.message).unwrap();
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleRecord, DigestEntry, PageWarning, UNKNOWN_DATE};
    use chrono::NaiveDate;

    fn digest(articles: Vec<DigestEntry>, warnings: Vec<PageWarning>) -> Digest {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        Digest {
            keyword: "삼성라이온즈".to_string(),
            collected_at: day.and_hms_opt(10, 0, 0).unwrap(),
            since: NaiveDate::from_ymd_opt(2024, 5, 30).unwrap(),
            until: day,
            articles,
            warnings,
        }
    }

    fn entry(title: &str, link: &str, ts_hour: Option<u32>) -> DigestEntry {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        DigestEntry {
            record: ArticleRecord {
                title: title.to_string(),
                press: "연합뉴스".to_string(),
                summary: "요약".to_string(),
                link: link.to_string(),
                raw_date_token: if ts_hour.is_some() { "1시간전" } else { UNKNOWN_DATE }.to_string(),
                resolved_timestamp: ts_hour.and_then(|h| day.and_hms_opt(h, 0, 0)),
            },
            body: None,
            narration: None,
        }
    }

    #[test]
    fn test_markdown_filename() {
        assert_eq!(markdown_filename(&digest(vec![], vec![])), "2024-06-01_삼성라이온즈.md");
    }

    #[test]
    fn test_article_section() {
        let mut first = entry("연장 끝 승리", "https://v.daum.net/v/1", Some(9));
        first.narration = Some("삼성이 연장 끝에 이겼습니다.".to_string());
        first.body = Some("본문 전체".to_string());
        let md = digest_to_markdown(&digest(vec![first], vec![]));

        assert!(md.starts_with("# 삼성라이온즈\n"));
        assert!(md.contains("### [연합뉴스] 연장 끝 승리"));
        assert!(md.contains("- **Published**: 1시간전 (2024-06-01 09:00)"));
        assert!(md.contains("- **Link**: <https://v.daum.net/v/1>"));
        assert!(md.contains("#### Narration\n\n삼성이 연장 끝에 이겼습니다."));
        assert!(md.contains("<summary>Body</summary>\n\n본문 전체"));
        assert!(!md.contains("Skipped pages"));
    }

    #[test]
    fn test_missing_link_and_unresolved_date() {
        let md = digest_to_markdown(&digest(vec![entry("No link", "", None)], vec![]));
        assert!(md.contains(&format!("- **Published**: {UNKNOWN_DATE}\n")));
        assert!(!md.contains("**Link**"));
    }

    #[test]
    fn test_empty_digest_with_warnings() {
        let warnings = vec![PageWarning {
            page: 2,
            url: "https://search.daum.net/search?p=2".to_string(),
            message: "request failed: timed out".to_string(),
        }];
        let md = digest_to_markdown(&digest(vec![], warnings));
        assert!(md.contains("No articles matched the date range."));
        assert!(md.contains("- Page 2: request failed: timed out"));
    }
}
