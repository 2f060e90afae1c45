//! Subject Token Propagation for gRPC Microservices
//!
//! Carries `Token <credential>` authorization metadata between gRPC services
//! and turns it into an authenticated subject id on the receiving side.
//!
//! ## Core Components
//!
//! - **TokenClientInterceptor**: injects the credential into outgoing metadata
//! - **TokenServerInterceptor**: validates incoming credentials via `token_core::TokenValidator`
//! - **AuthenticatedSubject**: the subject id stored in request extensions
//! - **SubjectExt**: request extension trait for handlers
//!
//! ## Usage Example
//!
//! ```rust
//! use grpc_token_propagation::{SubjectExt, TokenClientInterceptor, TokenServerInterceptor};
//! use token_core::{SigningSecret, TokenIssuer, TokenValidator};
//! use tonic::service::Interceptor;
//! use tonic::Request;
//!
//! let secret = SigningSecret::new("a-long-random-shared-secret");
//! let credential = TokenIssuer::new(secret.clone()).issue_now(1234)?;
//!
//! // Client side
//! let mut client = TokenClientInterceptor::new(&credential)?;
//! let request = client.call(Request::new(())).unwrap();
//!
//! // Server side
//! let mut server = TokenServerInterceptor::new(TokenValidator::new(secret));
//! let request = server.call(request).unwrap();
//!
//! assert_eq!(request.subject().unwrap().id(), 1234);
//! # Ok::<(), token_core::AuthError>(())
//! ```
//!
//! ## Status Mapping
//!
//! - No credential = `Status::unauthenticated("missing credential")`
//! - Malformed, forged or mis-signed = `Status::unauthenticated("invalid token")`
//! - Expired = `Status::unauthenticated("token expired")`
//! - Empty signing secret = `Status::internal`
//! - Wrong owner = `Status::permission_denied`

mod client;
mod extensions;
mod server;
mod subject;

pub use client::TokenClientInterceptor;
pub use extensions::SubjectExt;
pub use server::TokenServerInterceptor;
pub use subject::AuthenticatedSubject;

// Re-export tonic Status for convenience
pub use tonic::Status;
