//! Client-side Token Interceptor
//!
//! Injects credentials into outgoing gRPC requests via metadata.

use token_core::{AuthError, AUTHORIZATION_KEY, TOKEN_SCHEME_PREFIX};
use tonic::metadata::{AsciiMetadataValue, MetadataMap};
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Client-side interceptor that adds `authorization: Token <credential>`
///
/// The header value is parsed once at construction and cloned per request.
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_token_propagation::TokenClientInterceptor;
/// use tonic::transport::Channel;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credential = "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9..."; // From login
/// let interceptor = TokenClientInterceptor::new(credential)?;
///
/// let channel = Channel::from_static("http://[::1]:50051")
///     .connect()
///     .await?;
///
/// // let mut client = SomeServiceClient::with_interceptor(channel, interceptor);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TokenClientInterceptor {
    /// Pre-formatted `Token {credential}` value
    auth_header: AsciiMetadataValue,
}

impl TokenClientInterceptor {
    /// Create an interceptor for a credential (without the `Token ` prefix)
    ///
    /// ## Errors
    ///
    /// [`AuthError::MalformedToken`] if the credential cannot be carried as
    /// ASCII metadata. Issued credentials are base64url and always fit.
    pub fn new(credential: impl AsRef<str>) -> Result<Self, AuthError> {
        let value = format!("{}{}", TOKEN_SCHEME_PREFIX, credential.as_ref());

        let auth_header =
            AsciiMetadataValue::try_from(value).map_err(|_| AuthError::MalformedToken)?;

        Ok(Self { auth_header })
    }

    /// Create interceptor from an already formatted header value
    pub fn from_header(auth_header: AsciiMetadataValue) -> Self {
        Self { auth_header }
    }

    /// Forward the caller's `authorization` value unchanged
    ///
    /// Gateway services use this to pass a client's credential on to backends.
    pub fn from_metadata(metadata: &MetadataMap) -> Result<Self, Status> {
        metadata
            .get(AUTHORIZATION_KEY)
            .cloned()
            .map(Self::from_header)
            .ok_or_else(|| AuthError::MissingCredential.to_status())
    }
}

impl Interceptor for TokenClientInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert(AUTHORIZATION_KEY, self.auth_header.clone());

        Ok(request)
    }
}
