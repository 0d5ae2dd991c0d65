//! Absolute endpoint URL composition: base + relative path + optional query.

use url::form_urlencoded;

use crate::endpoint::{Endpoint, UnknownEndpoint};

/// Composes absolute HAAPI URLs from a configured base.
///
/// Pure string composition: the base is expected to end with `/` (config
/// validation enforces it) and is concatenated with the endpoint path as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base_url: String,
}

impl UrlBuilder {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base + path`, without a query string.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        let mut url = String::with_capacity(self.base_url.len() + endpoint.path().len());
        url.push_str(&self.base_url);
        url.push_str(endpoint.path());
        url
    }

    /// `base + path`, plus `?k=v&...` when `query` is non-empty.
    ///
    /// Pairs keep their order; names and values are form-urlencoded.
    #[must_use]
    pub fn build_url<K, V>(&self, endpoint: Endpoint, query: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = self.endpoint_url(endpoint);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(query));
        }
        url
    }

    /// Same as [`UrlBuilder::build_url`], keyed by the endpoint's logical name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEndpoint`] if `key` is not in the endpoint table.
    pub fn build_url_for_key<K, V>(
        &self,
        key: &str,
        query: &[(K, V)],
    ) -> Result<String, UnknownEndpoint>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let endpoint: Endpoint = key.parse()?;
        Ok(self.build_url(endpoint, query))
    }
}

fn encode_query<K, V>(query: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    query
        .iter()
        .map(|(name, value)| format!("{}={}", encode(name.as_ref()), encode(value.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encode one query component. `byte_serialize` writes a space as
/// `+` and a literal `+` as `%2B`, so swapping `+` for `%20` is lossless.
fn encode(component: &str) -> String {
    form_urlencoded::byte_serialize(component.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const BASE: &str = "https://haapi.ankama.com/";

    fn builder() -> UrlBuilder {
        UrlBuilder::new(BASE)
    }

    #[test]
    fn empty_query_has_no_trailing_question_mark() {
        let url = builder().build_url::<&str, &str>(Endpoint::AccountStatus, &[]);
        assert_eq!(url, format!("{BASE}json/Ankama/v2/Account/Status"));
    }

    #[test]
    fn single_pair_is_appended() {
        let url = builder().build_url(Endpoint::AccountStatus, &[("a", "1")]);
        assert_eq!(url, format!("{BASE}json/Ankama/v2/Account/Status?a=1"));
    }

    #[test]
    fn pairs_keep_order_and_join_with_ampersand() {
        let url = builder().build_url(
            Endpoint::ShieldValidateCode,
            &[("game_id", "1"), ("code", "ABC123"), ("name", "laptop")],
        );
        assert!(url.ends_with("ValidateCode?game_id=1&code=ABC123&name=laptop"));
    }

    #[test]
    fn reserved_characters_are_encoded() {
        let url = builder().build_url(Endpoint::LegalsTou, &[("q", "a&b=c/é")]);
        assert!(url.ends_with("Tou?q=a%26b%3Dc%2F%C3%A9"), "{url}");
    }

    #[test]
    fn spaces_are_percent_encoded_and_plus_is_escaped() {
        let url = builder().build_url(Endpoint::LegalsTou, &[("q", "a b+c")]);
        assert!(url.ends_with("Tou?q=a%20b%2Bc"), "{url}");
    }

    #[test]
    fn lookup_by_key_matches_enum() {
        let by_key = builder()
            .build_url_for_key("ANKAMA_ACCOUNT_STATUS", &[("a", "1")])
            .unwrap();
        assert_eq!(by_key, builder().build_url(Endpoint::AccountStatus, &[("a", "1")]));
    }

    #[test]
    fn lookup_by_unknown_key_fails() {
        let err = builder()
            .build_url_for_key::<&str, &str>("ANKAMA_NOPE", &[])
            .unwrap_err();
        assert_eq!(err, UnknownEndpoint("ANKAMA_NOPE".to_string()));
    }

    proptest! {
        #[test]
        fn query_decodes_back_to_the_same_pairs(
            pairs in proptest::collection::vec(("[a-z_]{1,8}", "\\PC{0,12}"), 1..6)
        ) {
            let url = builder().build_url(Endpoint::AccountCreateToken, &pairs);
            let parsed = url::Url::parse(&url).unwrap();
            let decoded: Vec<(String, String)> = parsed
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            prop_assert_eq!(decoded, pairs);
            prop_assert!(url.starts_with(BASE));
        }
    }
}
