//! Built-in checks
//!
//! Pattern checks scan the raw body text and match attribute literals
//! case-sensitively. Patterns use `[^"]` rather than `.` so values that span
//! lines still match without running past the closing quote.

use crate::checks::{Check, CheckResult, Classification, FetchedResponse};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Identifiers of every built-in check, in canonical order
pub const BUILTIN_CHECK_IDS: [&str; 17] = [
    "status_code",
    "html_title",
    "meta_description",
    "meta_keywords",
    "rel_canonical",
    "android_theme_color",
    "meta_charset",
    "meta_viewport",
    "mobile_homescreen",
    "ios_homescreen",
    "html5_doctype",
    "allow_header",
    "csp_header",
    "frame_options_header",
    "content_type_options_header",
    "rel_home",
    "schemaorg_breadcrumbs",
];

/// Returns every built-in check in canonical order
pub fn builtin_checks() -> Vec<Check> {
    vec![
        Check::new("status_code", STATUS_CODE, check_status_code),
        Check::new("html_title", HTML_TITLE, check_html_title),
        Check::new("meta_description", META_DESCRIPTION, check_meta_description),
        Check::new("meta_keywords", META_KEYWORDS, check_meta_keywords),
        Check::new("rel_canonical", REL_CANONICAL, check_rel_canonical),
        Check::new("android_theme_color", THEME_COLOR, check_android_theme_color),
        Check::new("meta_charset", META_CHARSET, check_meta_charset),
        Check::new("meta_viewport", META_VIEWPORT, check_meta_viewport),
        Check::new("mobile_homescreen", MOBILE_HOMESCREEN, check_mobile_homescreen),
        Check::new("ios_homescreen", IOS_HOMESCREEN, check_ios_homescreen),
        Check::new("html5_doctype", HTML5_DOCTYPE, check_html5_doctype),
        Check::new("allow_header", ALLOW_HEADER, check_allow_header),
        Check::new("csp_header", CSP_HEADER, check_csp_header),
        Check::new("frame_options_header", FRAME_OPTIONS, check_frame_options_header),
        Check::new(
            "content_type_options_header",
            CONTENT_TYPE_OPTIONS,
            check_content_type_options_header,
        ),
        Check::new("rel_home", REL_HOME, check_rel_home),
        Check::new("schemaorg_breadcrumbs", BREADCRUMBS, check_schemaorg_breadcrumbs),
    ]
}

const STATUS_CODE: &str = "Status code";
const HTML_TITLE: &str = "HTML title";
const META_DESCRIPTION: &str = "HTML meta description";
const META_KEYWORDS: &str = "HTML meta keywords";
const REL_CANONICAL: &str = "rel=canonical";
const THEME_COLOR: &str = "Android theme colour";
const META_CHARSET: &str = "HTML meta charset";
const META_VIEWPORT: &str = "HTML meta viewport";
const MOBILE_HOMESCREEN: &str = "May be added to Android homescreen";
const IOS_HOMESCREEN: &str = "May be added to iOS homescreen";
const HTML5_DOCTYPE: &str = "HTML5 doctype";
const ALLOW_HEADER: &str = "Allow header";
const CSP_HEADER: &str = "Content-Security-Policy header";
const FRAME_OPTIONS: &str = "X-Frame-Options header";
const CONTENT_TYPE_OPTIONS: &str = "X-Content-Type-Options header";
const REL_HOME: &str = "rel=\"home\" microformat";
const BREADCRUMBS: &str = "schema.org breadcrumbs";

const HTML5_DOCTYPE_TOKEN: &[u8] = b"<!doctype html>";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| meta_name_regex("description"));
static KEYWORDS_RE: LazyLock<Regex> = LazyLock::new(|| meta_name_regex("keywords"));
static VIEWPORT_RE: LazyLock<Regex> = LazyLock::new(|| meta_name_regex("viewport"));
static MOBILE_CAPABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| meta_name_regex("mobile-web-app-capable"));
static APPLE_CAPABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| meta_name_regex("apple-mobile-web-app-capable"));
static THEME_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"<meta\s+name="theme-color"\s+content="#([a-fA-F0-9]{6})"\s*/?>"##).unwrap()
});
static CANONICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<link\s+rel="canonical"\s+href="([^"]+)"\s*/?>"#).unwrap()
});
static CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta\s+charset="([^"]+)"\s*/?>"#).unwrap());
static BREADCRUMB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"itemtype="https?://schema\.org/Breadcrumb(?:List)?""#).unwrap()
});

fn meta_name_regex(name: &str) -> Regex {
    Regex::new(&format!(
        r#"<meta\s+name="{}"\s+content="([^"]+)"\s*/?>"#,
        regex::escape(name)
    ))
    .unwrap()
}

/// Applies a single-capture pattern: the capture is the success message
fn pattern_check(
    name: &str,
    pattern: &Regex,
    response: &FetchedResponse,
    missing: Classification,
    missing_message: &str,
) -> CheckResult {
    let text = response.text();
    match pattern
        .captures(&text)
        .and_then(|captures| captures.get(1))
    {
        Some(found) => CheckResult::new(name, Classification::Success, found.as_str()),
        None => CheckResult::new(name, missing, missing_message),
    }
}

/// Reports a header's value, or the given classification when it is absent
fn header_check(
    name: &str,
    header: &str,
    response: &FetchedResponse,
    missing: Classification,
    missing_message: &str,
) -> CheckResult {
    match response.header(header) {
        Some(value) => CheckResult::new(name, Classification::Success, value),
        None => CheckResult::new(name, missing, missing_message),
    }
}

/// Reports how many times something occurs in the page
fn count_check(name: &str, count: usize, missing_message: &str) -> CheckResult {
    if count == 0 {
        CheckResult::new(name, Classification::Info, missing_message)
    } else {
        CheckResult::new(name, Classification::Success, format!("{} found", count))
    }
}

fn check_status_code(response: &FetchedResponse) -> Option<CheckResult> {
    let code = response.status_code;
    let result = match code {
        200 => CheckResult::new(STATUS_CODE, Classification::Success, "OK!"),
        300..=399 => CheckResult::new(
            STATUS_CODE,
            Classification::Warning,
            format!("Performs a redirect ({})", code),
        ),
        _ => CheckResult::new(
            STATUS_CODE,
            Classification::Error,
            format!("Unexpected ({})", code),
        ),
    };
    Some(result)
}

fn check_html_title(response: &FetchedResponse) -> Option<CheckResult> {
    let document = Html::parse_document(&response.text());
    let title = Selector::parse("title").ok().and_then(|selector| {
        document
            .select(&selector)
            .next()
            .map(|element| collapse_whitespace(element.text()))
    });

    let result = match title {
        Some(title) if !title.is_empty() => {
            CheckResult::new(HTML_TITLE, Classification::Success, title)
        }
        _ => CheckResult::new(HTML_TITLE, Classification::Error, "Missing <title>"),
    };
    Some(result)
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let joined: String = parts.collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn check_meta_description(response: &FetchedResponse) -> Option<CheckResult> {
    Some(pattern_check(
        META_DESCRIPTION,
        &DESCRIPTION_RE,
        response,
        Classification::Warning,
        r#"Missing <meta name="description">"#,
    ))
}

fn check_meta_keywords(response: &FetchedResponse) -> Option<CheckResult> {
    Some(pattern_check(
        META_KEYWORDS,
        &KEYWORDS_RE,
        response,
        Classification::Warning,
        r#"Missing <meta name="keywords">"#,
    ))
}

fn check_rel_canonical(response: &FetchedResponse) -> Option<CheckResult> {
    Some(pattern_check(
        REL_CANONICAL,
        &CANONICAL_RE,
        response,
        Classification::Warning,
        r#"Missing <link rel="canonical">"#,
    ))
}

fn check_android_theme_color(response: &FetchedResponse) -> Option<CheckResult> {
    Some(pattern_check(
        THEME_COLOR,
        &THEME_COLOR_RE,
        response,
        Classification::Warning,
        r#"Missing <meta name="theme-color">"#,
    ))
}

fn check_meta_charset(response: &FetchedResponse) -> Option<CheckResult> {
    Some(pattern_check(
        META_CHARSET,
        &CHARSET_RE,
        response,
        Classification::Warning,
        r#"Missing <meta charset="...">"#,
    ))
}

fn check_meta_viewport(response: &FetchedResponse) -> Option<CheckResult> {
    Some(pattern_check(
        META_VIEWPORT,
        &VIEWPORT_RE,
        response,
        Classification::Warning,
        r#"Missing <meta name="viewport">"#,
    ))
}

fn check_mobile_homescreen(response: &FetchedResponse) -> Option<CheckResult> {
    Some(pattern_check(
        MOBILE_HOMESCREEN,
        &MOBILE_CAPABLE_RE,
        response,
        Classification::Warning,
        "no",
    ))
}

fn check_ios_homescreen(response: &FetchedResponse) -> Option<CheckResult> {
    Some(pattern_check(
        IOS_HOMESCREEN,
        &APPLE_CAPABLE_RE,
        response,
        Classification::Warning,
        "no",
    ))
}

fn check_html5_doctype(response: &FetchedResponse) -> Option<CheckResult> {
    let body = response.body.as_slice();
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body).trim_ascii_start();

    let leads_with_doctype = body.len() >= HTML5_DOCTYPE_TOKEN.len()
        && body[..HTML5_DOCTYPE_TOKEN.len()].eq_ignore_ascii_case(HTML5_DOCTYPE_TOKEN);

    let result = if leads_with_doctype {
        CheckResult::new(HTML5_DOCTYPE, Classification::Success, "yes")
    } else {
        CheckResult::new(
            HTML5_DOCTYPE,
            Classification::Error,
            "Missing the HTML5 doctype, or it is not the first element in the document",
        )
    };
    Some(result)
}

fn check_allow_header(response: &FetchedResponse) -> Option<CheckResult> {
    Some(header_check(
        ALLOW_HEADER,
        "Allow",
        response,
        Classification::Info,
        "Unknown",
    ))
}

fn check_csp_header(response: &FetchedResponse) -> Option<CheckResult> {
    let result = match response.header("Content-Security-Policy") {
        None => CheckResult::new(
            CSP_HEADER,
            Classification::Warning,
            "Missing Content-Security-Policy header, anything is permitted",
        ),
        Some(policy) if policy.contains("'unsafe-inline'") || policy.contains("'unsafe-eval'") => {
            CheckResult::new(
                CSP_HEADER,
                Classification::Warning,
                format!("'unsafe-inline' or 'unsafe-eval' was found in `{}`", policy),
            )
        }
        Some(policy) => CheckResult::new(CSP_HEADER, Classification::Success, policy),
    };
    Some(result)
}

fn check_frame_options_header(response: &FetchedResponse) -> Option<CheckResult> {
    Some(header_check(
        FRAME_OPTIONS,
        "X-Frame-Options",
        response,
        Classification::Error,
        "No X-Frame-Options set.",
    ))
}

fn check_content_type_options_header(response: &FetchedResponse) -> Option<CheckResult> {
    Some(header_check(
        CONTENT_TYPE_OPTIONS,
        "X-Content-Type-Options",
        response,
        Classification::Info,
        "No X-Content-Type-Options set, browsers may sniff the stream to decide on a content-type",
    ))
}

fn check_rel_home(response: &FetchedResponse) -> Option<CheckResult> {
    let count = response.text().matches(r#"rel="home""#).count();
    Some(count_check(
        REL_HOME,
        count,
        r#"Missing rel="home" microformat"#,
    ))
}

fn check_schemaorg_breadcrumbs(response: &FetchedResponse) -> Option<CheckResult> {
    let count = BREADCRUMB_RE.find_iter(&response.text()).count();
    Some(count_check(
        BREADCRUMBS,
        count,
        "Doesn't have breadcrumbs itemtype",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(body: &str) -> FetchedResponse {
        FetchedResponse::new("/", 200).with_body(body)
    }

    fn run(
        check: fn(&FetchedResponse) -> Option<CheckResult>,
        response: &FetchedResponse,
    ) -> CheckResult {
        check(response).expect("built-in checks always apply")
    }

    const EMPTY_PAGE: &str = "\n        <html><head></head><body>yay</body></html>\n        ";

    #[test]
    fn test_builtin_ids_match_checks() {
        let ids: Vec<_> = builtin_checks().iter().map(|check| check.id).collect();
        assert_eq!(ids, BUILTIN_CHECK_IDS.to_vec());
    }

    #[test]
    fn test_status_code_success() {
        let checked = run(check_status_code, &FetchedResponse::new("/", 200));
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "OK!");
    }

    #[test]
    fn test_status_code_redirect_range() {
        for code in [300, 301, 302, 307, 399] {
            let checked = run(check_status_code, &FetchedResponse::new("/", code));
            assert_eq!(checked.classification, Classification::Warning, "code {}", code);
        }
        let checked = run(check_status_code, &FetchedResponse::new("/", 302));
        assert_eq!(checked.message, "Performs a redirect (302)");
    }

    #[test]
    fn test_status_code_errors() {
        for code in [201, 204, 401, 404, 503] {
            let checked = run(check_status_code, &FetchedResponse::new("/", code));
            assert_eq!(checked.classification, Classification::Error, "code {}", code);
        }
        let checked = run(check_status_code, &FetchedResponse::new("/", 503));
        assert_eq!(checked.message, "Unexpected (503)");
    }

    #[test]
    fn test_has_title() {
        let checked = run(
            check_html_title,
            &html("<html><head><title>test</title></head><body>yay</body></html>"),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "test");
    }

    #[test]
    fn test_multiline_title_is_collapsed() {
        let checked = run(
            check_html_title,
            &html("<html><head><title>\n  Hello\n\t   World  \n</title></head></html>"),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "Hello World");
    }

    #[test]
    fn test_has_no_title() {
        let checked = run(check_html_title, &html(EMPTY_PAGE));
        assert_eq!(checked.classification, Classification::Error);
        assert_eq!(checked.message, "Missing <title>");
    }

    #[test]
    fn test_blank_title_is_missing() {
        let checked = run(check_html_title, &html("<html><head><title>   </title></head></html>"));
        assert_eq!(checked.classification, Classification::Error);
    }

    #[test]
    fn test_has_description() {
        let checked = run(
            check_meta_description,
            &html(r#"<html><head><meta name="description" content="test"></head><body>yay</body></html>"#),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "test");
    }

    #[test]
    fn test_multiline_description() {
        let checked = run(
            check_meta_description,
            &html("<meta name=\"description\" content=\"first line\nsecond line\">"),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "first line\nsecond line");
    }

    #[test]
    fn test_has_no_description() {
        let checked = run(
            check_meta_description,
            &html("<html><head></head><body>yay</body></html>"),
        );
        assert_eq!(checked.classification, Classification::Warning);
        assert_eq!(checked.message, r#"Missing <meta name="description">"#);
    }

    #[test]
    fn test_description_attribute_is_case_sensitive() {
        let checked = run(
            check_meta_description,
            &html(r#"<meta name="Description" content="test">"#),
        );
        assert_eq!(checked.classification, Classification::Warning);
    }

    #[test]
    fn test_keywords() {
        let checked = run(
            check_meta_keywords,
            &html(r#"<html><head><meta name="keywords" content="test, more test"></head></html>"#),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "test, more test");

        let checked = run(check_meta_keywords, &html(EMPTY_PAGE));
        assert_eq!(checked.classification, Classification::Warning);
        assert_eq!(checked.message, r#"Missing <meta name="keywords">"#);
    }

    #[test]
    fn test_canonical() {
        let checked = run(
            check_rel_canonical,
            &html(r#"<html><head><link rel="canonical" href="https://google.com/"></head></html>"#),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "https://google.com/");

        let checked = run(check_rel_canonical, &html(EMPTY_PAGE));
        assert_eq!(checked.classification, Classification::Warning);
        assert_eq!(checked.message, r#"Missing <link rel="canonical">"#);
    }

    #[test]
    fn test_theme_color() {
        let checked = run(
            check_android_theme_color,
            &html(r##"<html><head><meta name="theme-color" content="#EEECCC"></head></html>"##),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "EEECCC");

        let checked = run(
            check_android_theme_color,
            &html(r##"<meta name="theme-color" content="#FFF">"##),
        );
        assert_eq!(checked.classification, Classification::Warning);
        assert_eq!(checked.message, r#"Missing <meta name="theme-color">"#);
    }

    #[test]
    fn test_charset() {
        let checked = run(
            check_meta_charset,
            &html(r#"<html><head><meta charset="hello-test"></head></html>"#),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "hello-test");

        let checked = run(check_meta_charset, &html(EMPTY_PAGE));
        assert_eq!(checked.classification, Classification::Warning);
        assert_eq!(checked.message, r#"Missing <meta charset="...">"#);
    }

    #[test]
    fn test_viewport() {
        let checked = run(
            check_meta_viewport,
            &html(r#"<meta name="viewport" content="width=device-width" />"#),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "width=device-width");

        let checked = run(check_meta_viewport, &html(EMPTY_PAGE));
        assert_eq!(checked.message, r#"Missing <meta name="viewport">"#);
    }

    #[test]
    fn test_mobile_homescreen() {
        let checked = run(
            check_mobile_homescreen,
            &html(r#"<meta name="mobile-web-app-capable" content="yes">"#),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "yes");

        let checked = run(check_mobile_homescreen, &html(EMPTY_PAGE));
        assert_eq!(checked.classification, Classification::Warning);
        assert_eq!(checked.message, "no");
    }

    #[test]
    fn test_apple_tag_does_not_satisfy_android_check() {
        let page = html(r#"<meta name="apple-mobile-web-app-capable" content="yes">"#);
        assert_eq!(
            run(check_mobile_homescreen, &page).classification,
            Classification::Warning
        );
        let checked = run(check_ios_homescreen, &page);
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "yes");
    }

    #[test]
    fn test_ios_homescreen_missing() {
        let checked = run(check_ios_homescreen, &html(EMPTY_PAGE));
        assert_eq!(checked.classification, Classification::Warning);
        assert_eq!(checked.message, "no");
    }

    #[test]
    fn test_has_html5_doctype() {
        let checked = run(
            check_html5_doctype,
            &html("\n        <!doctype html>\n        <html><head><title>...</title></head></html>"),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "yes");
    }

    #[test]
    fn test_uppercase_doctype_and_bom() {
        let mut body = UTF8_BOM.to_vec();
        body.extend_from_slice(b"  <!DOCTYPE html><html></html>");
        let checked = run(check_html5_doctype, &FetchedResponse::new("/", 200).with_body(body));
        assert_eq!(checked.classification, Classification::Success);
    }

    #[test]
    fn test_non_html5_doctype() {
        let checked = run(
            check_html5_doctype,
            &html(r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd"><html></html>"#),
        );
        assert_eq!(checked.classification, Classification::Error);
        assert_eq!(
            checked.message,
            "Missing the HTML5 doctype, or it is not the first element in the document"
        );
    }

    #[test]
    fn test_misplaced_doctype_same_message_as_missing() {
        let misplaced = run(
            check_html5_doctype,
            &html("<html><head></head><body>...</body></html>\n<!doctype html>"),
        );
        let missing = run(check_html5_doctype, &html(EMPTY_PAGE));
        assert_eq!(misplaced.classification, Classification::Error);
        assert_eq!(misplaced, missing);
    }

    #[test]
    fn test_allow_header() {
        let checked = run(
            check_allow_header,
            &FetchedResponse::new("/", 200).with_header("Allow", "WAT, YAY"),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "WAT, YAY");

        let checked = run(check_allow_header, &FetchedResponse::new("/", 200));
        assert_eq!(checked.classification, Classification::Info);
        assert_eq!(checked.message, "Unknown");
    }

    #[test]
    fn test_csp_header() {
        let checked = run(
            check_csp_header,
            &FetchedResponse::new("/", 200).with_header("Content-Security-Policy", "'self'"),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "'self'");

        let checked = run(check_csp_header, &FetchedResponse::new("/", 200));
        assert_eq!(checked.classification, Classification::Warning);
        assert_eq!(
            checked.message,
            "Missing Content-Security-Policy header, anything is permitted"
        );
    }

    #[test]
    fn test_csp_unsafe_directives_warn() {
        let checked = run(
            check_csp_header,
            &FetchedResponse::new("/", 200).with_header("Content-Security-Policy", "'unsafe-eval'"),
        );
        assert_eq!(checked.classification, Classification::Warning);
        assert_eq!(
            checked.message,
            "'unsafe-inline' or 'unsafe-eval' was found in `'unsafe-eval'`"
        );

        let checked = run(
            check_csp_header,
            &FetchedResponse::new("/", 200)
                .with_header("content-security-policy", "script-src 'self' 'unsafe-inline'"),
        );
        assert_eq!(checked.classification, Classification::Warning);
    }

    #[test]
    fn test_frame_options_header() {
        let checked = run(
            check_frame_options_header,
            &FetchedResponse::new("/", 200).with_header("X-Frame-Options", "DENY"),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "DENY");

        let checked = run(check_frame_options_header, &FetchedResponse::new("/", 200));
        assert_eq!(checked.classification, Classification::Error);
        assert_eq!(checked.message, "No X-Frame-Options set.");
    }

    #[test]
    fn test_content_type_options_header() {
        let checked = run(
            check_content_type_options_header,
            &FetchedResponse::new("/", 200).with_header("X-Content-Type-Options", "nosniff"),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "nosniff");

        let checked = run(check_content_type_options_header, &FetchedResponse::new("/", 200));
        assert_eq!(checked.classification, Classification::Info);
        assert_eq!(
            checked.message,
            "No X-Content-Type-Options set, browsers may sniff the stream to decide on a content-type"
        );
    }

    #[test]
    fn test_rel_home() {
        let checked = run(
            check_rel_home,
            &html(
                r##"<html><head>
                </head><body>
                <a href="#" rel="home">test</a>
                <a href="#" rel="home">test2</a>
                </body></html>"##,
            ),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "2 found");

        let checked = run(check_rel_home, &html(EMPTY_PAGE));
        assert_eq!(checked.classification, Classification::Info);
        assert_eq!(checked.message, r#"Missing rel="home" microformat"#);
    }

    #[test]
    fn test_schemaorg_breadcrumbs() {
        let checked = run(
            check_schemaorg_breadcrumbs,
            &html(r#"<body><a itemtype="http://schema.org/Breadcrumb">...</a></body>"#),
        );
        assert_eq!(checked.classification, Classification::Success);
        assert_eq!(checked.message, "1 found");

        let checked = run(
            check_schemaorg_breadcrumbs,
            &html(r#"<ol itemtype="https://schema.org/BreadcrumbList"></ol><li itemtype="http://schema.org/Breadcrumb"></li>"#),
        );
        assert_eq!(checked.message, "2 found");

        let checked = run(check_schemaorg_breadcrumbs, &html(EMPTY_PAGE));
        assert_eq!(checked.classification, Classification::Info);
        assert_eq!(checked.message, "Doesn't have breadcrumbs itemtype");
    }
}
