use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::PredictionResult;

pub const FALLBACK_VERDICT: &str = "No classification returned";

static RESULT_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result h2").expect("valid result heading selector"));
static ANY_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2").expect("valid heading selector"));
static REASON_LINES: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".reason-line").expect("valid reason line selector"));
static LIST_ITEMS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#detailsBox li, .result li, ul li").expect("valid list item selector")
});
static TEXT_BLOCKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, span, div").expect("valid text block selector"));

// Keyword set matched by the upstream templates' reason wording. Heuristic:
// unrelated page text containing one of these words is also picked up.
static REASON_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(SSL|https|Anchor|domain|subdomain|shorten|shortening|favicon|redirect|form|iframe|traffic|rank|google|links|age|registration|mailto|popup)",
    )
    .expect("valid reason keyword regex")
});

/// Best-effort extraction of a verdict and its supporting reasons from the
/// HTML fragment the classification endpoint returns.
///
/// The response carries no structured schema, so extraction is an ordered
/// fallback chain: a heading inside the result container, then any heading,
/// then a literal placeholder; reasons from tagged lines, then list items,
/// then a keyword scan over plain text blocks.
pub fn parse_prediction(html: &str) -> PredictionResult {
    let doc = Html::parse_document(html);

    let verdict = doc
        .select(&RESULT_HEADING)
        .next()
        .or_else(|| doc.select(&ANY_HEADING).next())
        .map(element_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| FALLBACK_VERDICT.to_string());

    let mut reasons: Vec<String> = Vec::new();
    for el in doc.select(&REASON_LINES) {
        let text = element_text(el);
        if !text.is_empty() {
            reasons.push(text);
        }
    }

    if reasons.is_empty() {
        for el in doc.select(&LIST_ITEMS) {
            push_unique(&mut reasons, element_text(el));
        }
    }

    if reasons.is_empty() {
        for el in doc.select(&TEXT_BLOCKS) {
            let text = element_text(el);
            if REASON_KEYWORDS.is_match(&text) {
                push_unique(&mut reasons, text);
            }
        }
    }

    PredictionResult::new(verdict, reasons)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn push_unique(reasons: &mut Vec<String>, text: String) {
    if !text.is_empty() && !reasons.contains(&text) {
        reasons.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MAX_REASONS;

    #[test]
    fn verdict_prefers_result_container_heading() {
        let html = r#"
            <h2>Page Title</h2>
            <div class="result"><h2>Phishing Website Detected ⚠️</h2></div>
        "#;
        let result = parse_prediction(html);
        assert_eq!(result.verdict, "Phishing Website Detected ⚠️");
    }

    #[test]
    fn verdict_falls_back_to_any_heading() {
        let html = "<body><h2>Legitimate Website! ✅</h2></body>";
        let result = parse_prediction(html);
        assert_eq!(result.verdict, "Legitimate Website! ✅");
    }

    #[test]
    fn verdict_falls_back_to_placeholder_without_heading() {
        let html = "<p>nothing here</p>";
        let result = parse_prediction(html);
        assert_eq!(result.verdict, FALLBACK_VERDICT);
    }

    #[test]
    fn reason_lines_extracted_in_document_order() {
        let html = r#"
            <div class="result"><h2>Phishing Detected</h2></div>
            <p class="reason-line">Website lacks secure HTTPS/SSL certification.</p>
            <p class="reason-line">Too many subdomains detected, often used to hide phishing.</p>
        "#;
        let result = parse_prediction(html);
        assert_eq!(
            result.reasons,
            vec![
                "Website lacks secure HTTPS/SSL certification.".to_string(),
                "Too many subdomains detected, often used to hide phishing.".to_string(),
            ]
        );
    }

    #[test]
    fn list_items_used_only_when_no_reason_lines() {
        let html = r#"
            <h2>Phishing Detected</h2>
            <div id="detailsBox"><ul>
                <li>Domain is newly created, potentially untrustworthy.</li>
                <li>Domain is newly created, potentially untrustworthy.</li>
                <li>Popups detected, may capture sensitive info.</li>
            </ul></div>
        "#;
        let result = parse_prediction(html);
        assert_eq!(result.reasons.len(), 2);
        assert_eq!(
            result.reasons[0],
            "Domain is newly created, potentially untrustworthy."
        );
    }

    #[test]
    fn reason_lines_suppress_list_item_scan() {
        let html = r#"
            <h2>Phishing Detected</h2>
            <span class="reason-line">Anchor links redirect to different domains.</span>
            <ul><li>Should not appear</li></ul>
        "#;
        let result = parse_prediction(html);
        assert_eq!(
            result.reasons,
            vec!["Anchor links redirect to different domains.".to_string()]
        );
    }

    #[test]
    fn keyword_scan_is_last_resort() {
        let html = r#"
            <h2>Phishing Detected</h2>
            <p>The URL uses a shortening service.</p>
            <p>Completely unrelated sentence.</p>
            <span>Suspicious favicon loaded externally.</span>
        "#;
        let result = parse_prediction(html);
        assert!(result
            .reasons
            .contains(&"The URL uses a shortening service.".to_string()));
        assert!(result
            .reasons
            .contains(&"Suspicious favicon loaded externally.".to_string()));
        assert!(!result
            .reasons
            .contains(&"Completely unrelated sentence.".to_string()));
    }

    #[test]
    fn reasons_capped_at_six_in_extraction_order() {
        let items: String = (0..9)
            .map(|i| format!("<li>signal {i} redirect</li>"))
            .collect();
        let html = format!("<h2>Phishing Detected</h2><ul>{items}</ul>");
        let result = parse_prediction(&html);
        assert_eq!(result.reasons.len(), MAX_REASONS);
        assert_eq!(result.reasons[0], "signal 0 redirect");
        assert_eq!(result.reasons[5], "signal 5 redirect");
    }
}
