//! Web utility functions

use axum::http::{Method, Uri};
use tracing::info;

use super::extractors::RequestContext;

/// Log an incoming HTTP request
pub fn log_request(method: &Method, uri: &Uri, context: &RequestContext) {
    info!(
        method = %method,
        uri = %uri,
        request_id = %context.request_id,
        user_agent = ?context.user_agent,
        real_ip = ?context.real_ip,
        "HTTP request"
    );
}

/// Trim a search term and drop it when empty, capping its length
pub fn sanitize_search(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().chars().take(255).collect::<String>())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_terms_are_trimmed() {
        assert_eq!(sanitize_search(Some("  juan ".to_string())), Some("juan".to_string()));
        assert_eq!(sanitize_search(Some("   ".to_string())), None);
        assert_eq!(sanitize_search(None), None);
        assert_eq!(sanitize_search(Some("x".repeat(300))).map(|s| s.len()), Some(255));
    }
}
