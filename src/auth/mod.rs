pub mod store;
pub mod token_resolver;

pub use store::{JsonFileStore, TokenStore};
pub use token_resolver::{ACCESS_TOKEN_KEY, TOKEN_QUERY_PARAM, Token, TokenResolver, page_query_params};
