//! Server-side Token Interceptor
//!
//! Authenticates incoming gRPC requests and stores the subject in request
//! extensions.

use crate::subject::AuthenticatedSubject;
use token_core::TokenValidator;
use tonic::metadata::MetadataMap;
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Server-side interceptor that validates credentials and extracts the subject
///
/// This interceptor:
/// 1. Reads `authorization: Token <credential>` from gRPC metadata
/// 2. Runs [`TokenValidator::authenticate`] at the current instant
/// 3. Stores [`AuthenticatedSubject`] in request extensions for handler access
///
/// ## Security
///
/// - Forged, malformed and mis-signed tokens all surface as the same
///   `Status::unauthenticated("invalid token")`
/// - Expired and missing credentials get their own unauthenticated messages
/// - Misconfiguration (empty secret) surfaces as `Status::internal`
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_token_propagation::TokenServerInterceptor;
/// use token_core::TokenSettings;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = TokenSettings::load()?;
/// let interceptor = TokenServerInterceptor::new(settings.validator());
///
/// // let service = MyServiceServer::with_interceptor(MyService, interceptor);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TokenServerInterceptor {
    validator: TokenValidator,
}

impl TokenServerInterceptor {
    pub fn new(validator: TokenValidator) -> Self {
        Self { validator }
    }

    fn authenticate(&self, metadata: &MetadataMap) -> Result<AuthenticatedSubject, Status> {
        // Rejections are already logged by the validator
        self.validator
            .authenticate_now(metadata)
            .map(AuthenticatedSubject)
            .map_err(|e| e.to_status())
    }
}

impl Interceptor for TokenServerInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let subject = self.authenticate(request.metadata())?;

        request.extensions_mut().insert(subject);

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use token_core::{SigningSecret, TokenIssuer};
    use tonic::metadata::MetadataValue;

    const SECRET: &str = "server-interceptor-secret";

    fn interceptor() -> TokenServerInterceptor {
        TokenServerInterceptor::new(TokenValidator::new(SigningSecret::new(SECRET)))
    }

    #[test]
    fn test_missing_header() {
        let result = interceptor().authenticate(&MetadataMap::new());

        let status = result.unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
        assert_eq!(status.message(), "missing credential");
    }

    #[test]
    fn test_bearer_scheme_is_rejected() {
        let mut metadata = MetadataMap::new();
        metadata.insert("authorization", MetadataValue::from_static("Bearer abc.def.ghi"));

        let status = interceptor().authenticate(&metadata).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn test_valid_token() {
        let token = TokenIssuer::new(SigningSecret::new(SECRET))
            .issue_now(1234)
            .expect("Failed to issue token");

        let mut metadata = MetadataMap::new();
        metadata.insert("authorization", format!("Token {}", token).parse().unwrap());

        let subject = interceptor()
            .authenticate(&metadata)
            .expect("Should authenticate");
        assert_eq!(subject, AuthenticatedSubject(1234));
    }

    #[test]
    fn test_tampered_token() {
        let token = TokenIssuer::new(SigningSecret::new("some-other-secret"))
            .issue_now(1234)
            .unwrap();

        let mut metadata = MetadataMap::new();
        metadata.insert("authorization", format!("Token {}", token).parse().unwrap());

        let status = interceptor().authenticate(&metadata).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
        assert_eq!(status.message(), "invalid token");
    }

    #[test]
    fn test_empty_secret_is_internal() {
        let interceptor =
            TokenServerInterceptor::new(TokenValidator::new(SigningSecret::new("")));

        let mut metadata = MetadataMap::new();
        metadata.insert("authorization", MetadataValue::from_static("Token a.b.c"));

        let status = interceptor.authenticate(&metadata).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Internal);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_misconfiguration_is_logged_once() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let interceptor =
            TokenServerInterceptor::new(TokenValidator::new(SigningSecret::new("")));
        let mut metadata = MetadataMap::new();
        metadata.insert("authorization", MetadataValue::from_static("Token a.b.c"));

        tracing::subscriber::with_default(subscriber, || {
            assert!(interceptor.authenticate(&metadata).is_err());
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("configuration_error").count(), 1, "{}", output);
    }

    #[test]
    fn test_interceptor_stores_subject_in_extensions() {
        let token = TokenIssuer::new(SigningSecret::new(SECRET))
            .issue_now(42)
            .unwrap();

        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert("authorization", format!("Token {}", token).parse().unwrap());

        let request = interceptor()
            .call(request)
            .expect("Should pass interceptor");

        assert_eq!(
            request.extensions().get::<AuthenticatedSubject>(),
            Some(&AuthenticatedSubject(42))
        );
    }
}
