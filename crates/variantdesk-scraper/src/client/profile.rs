//! Fixed browser header and cookie profile sent with every variants request.
//!
//! The storefront API answers 400/403 to clients that do not look like a
//! desktop Chrome session on the Turkish storefront.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";

pub(crate) const STOREFRONT_ORIGIN: &str = "https://www.trendyol.com";

/// Locale/platform/region cookies, in `Cookie` header form.
pub(crate) const COOKIES: [(&str, &str); 4] = [
    ("platform", "web"),
    ("storefrontId", "1"),
    ("countryCode", "TR"),
    ("language", "tr"),
];

pub(crate) const BROWSER_HEADERS: [(&str, &str); 14] = [
    ("accept", "application/json"),
    ("accept-language", "tr-TR,tr;q=0.9,en-US;q=0.8,en;q=0.7"),
    ("content-type", "application/json"),
    ("origin", STOREFRONT_ORIGIN),
    ("priority", "u=1, i"),
    ("referer", "https://www.trendyol.com/"),
    (
        "sec-ch-ua",
        "\"Chromium\";v=\"142\", \"Google Chrome\";v=\"142\", \"Not_A Brand\";v=\"99\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-site"),
    ("user-agent", BROWSER_USER_AGENT),
    ("x-request-source", "single-search-result"),
];

#[must_use]
pub(crate) fn cookie_header() -> String {
    COOKIES
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Default headers installed on the underlying `reqwest::Client`.
#[must_use]
pub(crate) fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(BROWSER_HEADERS.len() + 1);
    for (name, value) in BROWSER_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    if let Ok(cookie) = HeaderValue::from_str(&cookie_header()) {
        headers.insert(reqwest::header::COOKIE, cookie);
    }
    headers
}
