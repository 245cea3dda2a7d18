use crate::domain::params::QueryParams;
use crate::error::Result;
use url::{Url, form_urlencoded};

/// Reads the query string of a landing page URL.
///
/// Accepts an absolute URL (`https://pay.example/success?transaction_id=tx_1`)
/// or a bare query string, with or without the leading `?`. Pairs keep their
/// order and duplicates; decoding follows `application/x-www-form-urlencoded`.
pub fn read_query(input: &str) -> Result<QueryParams> {
    let input = input.trim();
    let query: QueryParams = if is_absolute_url(input) {
        Url::parse(input)?.query_pairs().collect()
    } else {
        let query = input.strip_prefix('?').unwrap_or(input);
        let query = query.split_once('#').map_or(query, |(query, _)| query);
        form_urlencoded::parse(query.as_bytes()).collect()
    };

    if query.is_empty() {
        tracing::debug!("landing URL carries no query");
    } else {
        tracing::debug!(pairs = query.len(), "landing query read");
    }
    Ok(query)
}

// Only the part before the query decides; values may carry unencoded URLs.
fn is_absolute_url(input: &str) -> bool {
    !input.starts_with('?')
        && input
            .split_once('?')
            .map_or(input, |(base, _)| base)
            .contains("://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_full_url() {
        let query =
            read_query("https://pay.example.com/success?transaction_id=tx_1&plan_name=Pro%20Plan")
                .unwrap();
        assert_eq!(query.get("transaction_id"), Some("tx_1"));
        assert_eq!(query.get("plan_name"), Some("Pro Plan"));
    }

    #[test]
    fn test_reads_bare_query() {
        let query = read_query("?code=abc&state=x%2By+z").unwrap();
        assert_eq!(query.get("code"), Some("abc"));
        assert_eq!(query.get("state"), Some("x+y z"));

        let query = read_query("code=abc#fragment").unwrap();
        assert_eq!(query.get("code"), Some("abc"));
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn test_bare_query_with_url_valued_field() {
        let query = read_query("?code=abc&state=https://app.example/next").unwrap();
        assert_eq!(query.get("code"), Some("abc"));
        assert_eq!(query.get("state"), Some("https://app.example/next"));

        let query = read_query("code=abc&redirect=vealthx://app").unwrap();
        assert_eq!(query.get("redirect"), Some("vealthx://app"));
    }

    #[test]
    fn test_full_url_with_url_valued_field() {
        let query =
            read_query("https://auth.vealthx.com/done?state=https://app.example/next").unwrap();
        assert_eq!(query.get("state"), Some("https://app.example/next"));
    }

    #[test]
    fn test_keeps_empty_values() {
        let query = read_query("?plan_name=&email").unwrap();
        assert_eq!(query.get("plan_name"), Some(""));
        assert_eq!(query.get("email"), Some(""));
        assert_eq!(query.get("transaction_id"), None);
    }

    #[test]
    fn test_url_without_query_is_empty() {
        assert!(read_query("https://pay.example.com/success").unwrap().is_empty());
        assert!(read_query("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_url_is_an_error() {
        assert!(read_query("https://exa mple.com/?code=abc").is_err());
    }
}
