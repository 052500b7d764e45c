use super::store::TokenStore;
use std::fmt;

pub const TOKEN_QUERY_PARAM: &str = "token";
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Bearer credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"***").finish()
    }
}

/// Picks the credential for the catalog request from the page query string,
/// falling back to the persisted store.
pub struct TokenResolver<S> {
    query_params: Vec<(String, String)>,
    store: S,
}

impl<S: TokenStore> TokenResolver<S> {
    pub fn new(query_params: Vec<(String, String)>, store: S) -> Self {
        Self { query_params, store }
    }

    /// The first usable `token` parameter wins; unusable ones are skipped.
    pub fn resolve(&self) -> Option<Token> {
        let from_query = self
            .query_params
            .iter()
            .filter(|(k, _)| k == TOKEN_QUERY_PARAM)
            .find_map(|(_, v)| usable(v));

        if let Some(token) = from_query {
            tracing::debug!("access token taken from query parameter");
            return Some(token);
        }

        let from_store = self.store.get(ACCESS_TOKEN_KEY).and_then(|v| usable(&v));
        if from_store.is_some() {
            tracing::debug!("access token taken from persisted store");
        }
        from_store
    }
}

/// Decoded query pairs of a page URL, in order.
pub fn page_query_params(url: &reqwest::Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

// Upstream redirects sometimes stringify a missing value.
fn usable(raw: &str) -> Option<Token> {
    let value = raw.trim();
    match value {
        "" | "null" | "undefined" => None,
        _ => Some(Token(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn store_with(token: Option<&str>) -> HashMap<String, String> {
        let mut store = HashMap::new();
        if let Some(t) = token {
            store.insert(ACCESS_TOKEN_KEY.to_string(), t.to_string());
        }
        store
    }

    fn query(token: &str) -> Vec<(String, String)> {
        vec![(TOKEN_QUERY_PARAM.to_string(), token.to_string())]
    }

    #[test]
    fn query_parameter_wins_over_store() {
        let resolver = TokenResolver::new(query("from-url"), store_with(Some("from-store")));
        assert_eq!(resolver.resolve().unwrap().expose(), "from-url");
    }

    #[test]
    fn stringified_nulls_fall_back_to_store() {
        for bogus in ["null", "undefined", "", "   "] {
            let resolver = TokenResolver::new(query(bogus), store_with(Some("from-store")));
            assert_eq!(resolver.resolve().unwrap().expose(), "from-store", "query value {bogus:?}");
        }
    }

    #[test]
    fn stringified_null_in_store_is_absent() {
        let resolver = TokenResolver::new(vec![], store_with(Some("undefined")));
        assert!(resolver.resolve().is_none());
    }

    #[test]
    fn nothing_anywhere_is_absent() {
        let resolver = TokenResolver::new(vec![], store_with(None));
        assert!(resolver.resolve().is_none());
    }

    #[test]
    fn resolution_is_idempotent() {
        let resolver = TokenResolver::new(query("abc"), store_with(Some("def")));
        assert_eq!(resolver.resolve(), resolver.resolve());

        let empty = TokenResolver::new(vec![], store_with(None));
        assert_eq!(empty.resolve(), empty.resolve());
    }

    #[test]
    fn reads_token_from_page_url() {
        let url = reqwest::Url::parse("http://admin.local/docs?tab=api&token=xyz%3D").unwrap();
        let resolver = TokenResolver::new(page_query_params(&url), store_with(None));
        assert_eq!(resolver.resolve().unwrap().expose(), "xyz=");
    }

    #[test]
    fn unusable_token_pair_does_not_hide_a_later_one() {
        let url = reqwest::Url::parse("http://admin.local/docs?token=abc").unwrap();
        let mut params = query("null");
        params.extend(page_query_params(&url));

        let resolver = TokenResolver::new(params, store_with(Some("from-store")));
        assert_eq!(resolver.resolve().unwrap().expose(), "abc");
    }

    #[test]
    fn debug_output_hides_secret() {
        let resolver = TokenResolver::new(query("super-secret"), store_with(None));
        let printed = format!("{:?}", resolver.resolve().unwrap());
        assert!(!printed.contains("super-secret"));
    }
}
