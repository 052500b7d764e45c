use crate::models::{Endpoint, HttpMethod, JSON_CONTENT_TYPE};

/// Substituted for the credential in every generated example. The live
/// session token is never written into a command.
pub const TOKEN_PLACEHOLDER: &str = "YOUR_TOKEN";

const LINE_CONTINUATION: &str = " \\\n  ";

/// Builds a copy-pasteable `curl` invocation for one endpoint.
pub fn synthesize(endpoint: &Endpoint, base_url: &str) -> String {
    let mut lines = vec![format!(
        "curl -X {} \"{}\"",
        endpoint.method,
        endpoint.full_url(base_url)
    )];

    if endpoint.requires_auth {
        lines.push(format!("-H \"Authorization: Bearer {}\"", TOKEN_PLACEHOLDER));
    }

    if endpoint.method != HttpMethod::Get {
        if let Some(body) = &endpoint.body {
            lines.push(format!("-H \"Content-Type: {}\"", JSON_CONTENT_TYPE));
            lines.push(format!("-d '{}'", shell_single_quote(&body.to_string())));
        }
    }

    lines.join(LINE_CONTINUATION)
}

// Closes the quote, emits an escaped quote, reopens.
fn shell_single_quote(raw: &str) -> String {
    raw.replace('\'', "'\\''")
}
