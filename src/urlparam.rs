//! Query-parameter manipulation on endpoint URLs
//!
//! The search endpoint URL may already carry parameters; setting the query
//! parameter must replace an existing value in place (keeping its position)
//! or append when absent, leaving every other parameter untouched.

use url::Url;

/// Return `url` with `key` set to `value` in its query string.
///
/// Replaces the first existing occurrence in place, otherwise appends.
/// Values are percent-encoded by the `Url` serializer.
#[must_use]
pub fn set_query_param(url: &Url, key: &str, value: &str) -> Url {
    let mut out = url.clone();
    let mut replaced = false;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == key && !replaced {
                replaced = true;
                (key.to_string(), value.to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();

    {
        let mut q = out.query_pairs_mut();
        q.clear();
        q.extend_pairs(pairs);
        if !replaced {
            q.append_pair(key, value);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_when_absent() {
        let url = Url::parse("https://example.net/search/").unwrap();
        let out = set_query_param(&url, "qa", "trident wiki");
        assert_eq!(out.as_str(), "https://example.net/search/?qa=trident+wiki");
    }

    #[test]
    fn replaces_in_place_keeping_other_params() {
        let url = Url::parse("https://example.net/search/?qa=old&limit=10").unwrap();
        let out = set_query_param(&url, "qa", "new");
        assert_eq!(out.as_str(), "https://example.net/search/?qa=new&limit=10");
    }

    #[test]
    fn preserves_unrelated_parameters() {
        let url = Url::parse("https://example.net/search/?scope=wiki").unwrap();
        let out = set_query_param(&url, "qa", "x");
        assert_eq!(out.as_str(), "https://example.net/search/?scope=wiki&qa=x");
    }

    #[test]
    fn encodes_reserved_characters() {
        let url = Url::parse("https://example.net/search/").unwrap();
        let out = set_query_param(&url, "qa", "a&b=c");
        assert!(out.query().unwrap().contains("qa=a%26b%3Dc"));
    }
}
