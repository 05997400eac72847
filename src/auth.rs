use actix_web::http::header;
use actix_web::HttpRequest;

/// Source of the bearer credential forwarded to upstream calls. The OAuth
/// session store lives outside this service; injecting the lookup keeps
/// handlers deterministic under test.
pub trait CredentialProvider: Send + Sync {
    fn credential(&self, req: &HttpRequest) -> Option<String>;
}

/// Reads the caller's `Authorization: Bearer <token>` header. The session
/// layer in front of this service terminates the OAuth flow and forwards
/// the access token this way.
pub struct BearerHeaderCredentials;

impl CredentialProvider for BearerHeaderCredentials {
    fn credential(&self, req: &HttpRequest) -> Option<String> {
        let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}

/// Fixed credential, or none. Used by tests and by deployments that pin a
/// server-side token instead of per-user sessions.
pub struct StaticCredentials(pub Option<String>);

impl CredentialProvider for StaticCredentials {
    fn credential(&self, _req: &HttpRequest) -> Option<String> {
        self.0.clone()
    }
}

/// Production lookup: the caller's own bearer header wins, falling back to
/// the configured server-side token when the request is anonymous.
pub struct SessionCredentials {
    pub fallback: Option<String>,
}

impl CredentialProvider for SessionCredentials {
    fn credential(&self, req: &HttpRequest) -> Option<String> {
        BearerHeaderCredentials
            .credential(req)
            .or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn bearer_header_token_is_extracted() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer gho_abc123"))
            .to_http_request();
        assert_eq!(
            BearerHeaderCredentials.credential(&req),
            Some("gho_abc123".to_string())
        );
    }

    #[test]
    fn non_bearer_and_empty_headers_yield_nothing() {
        let basic = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwdw=="))
            .to_http_request();
        assert_eq!(BearerHeaderCredentials.credential(&basic), None);

        let empty = TestRequest::default()
            .insert_header(("Authorization", "Bearer "))
            .to_http_request();
        assert_eq!(BearerHeaderCredentials.credential(&empty), None);

        let missing = TestRequest::default().to_http_request();
        assert_eq!(BearerHeaderCredentials.credential(&missing), None);
    }

    #[test]
    fn session_lookup_prefers_the_header_over_the_fallback() {
        let provider = SessionCredentials {
            fallback: Some("server-token".into()),
        };

        let with_header = TestRequest::default()
            .insert_header(("Authorization", "Bearer user-token"))
            .to_http_request();
        assert_eq!(
            provider.credential(&with_header),
            Some("user-token".to_string())
        );

        let anonymous = TestRequest::default().to_http_request();
        assert_eq!(
            provider.credential(&anonymous),
            Some("server-token".to_string())
        );
    }
}
