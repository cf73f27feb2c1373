//! Utility functions for common operations.

use crate::error::FetchError;

/// Longest response body excerpt carried inside an error message.
const MAX_BODY_EXCERPT: usize = 300;

/// Shortens a response body for inclusion in an error message.
///
/// Whitespace runs are collapsed and the result is cut at `max_chars`
/// characters, with an ellipsis marking the cut.
pub fn body_excerpt(body: &str, max_chars: usize) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

/// Describes a failed response as `HTTP <status>: <body excerpt>`.
///
/// Consumes the response; a body that cannot be read is reported as empty.
pub async fn failure_detail(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let excerpt = body_excerpt(&text, MAX_BODY_EXCERPT);
    if excerpt.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, excerpt)
    }
}

/// Checks if an HTTP response is successful, and if not, returns a detailed error.
pub async fn check_response_status(
    response: reqwest::Response,
    url: &str,
) -> Result<reqwest::Response, FetchError> {
    if !response.status().is_success() {
        let status = response.status();
        let detail = failure_detail(response).await;
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
            detail,
        });
    }
    Ok(response)
}
