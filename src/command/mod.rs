pub mod curl;

pub use curl::{TOKEN_PLACEHOLDER, synthesize};
