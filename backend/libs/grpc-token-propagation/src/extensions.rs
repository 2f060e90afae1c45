//! Request Extension Trait for Subject Access
//!
//! Provides ergonomic helpers for reading the authenticated subject from gRPC
//! request handlers.

use crate::AuthenticatedSubject;
use tonic::{Request, Status};

/// Extension trait for accessing the authenticated subject from gRPC requests
///
/// Implemented for all `Request<T>`; reads the [`AuthenticatedSubject`] stored
/// by [`TokenServerInterceptor`](crate::TokenServerInterceptor).
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_token_propagation::SubjectExt;
/// use tonic::{Request, Response, Status};
///
/// async fn delete_post(request: Request<()>) -> Result<Response<()>, Status> {
///     let post_author_id = 1234; // From database
///     request.require_subject(post_author_id)?;
///
///     Ok(Response::new(()))
/// }
/// ```
pub trait SubjectExt {
    /// Subject stored by the server interceptor
    ///
    /// ## Errors
    ///
    /// `Status::unauthenticated` if the interceptor was not attached
    fn subject(&self) -> Result<AuthenticatedSubject, Status>;

    /// Require that the authenticated subject owns a resource
    ///
    /// ## Errors
    ///
    /// - `Status::unauthenticated` if no subject found
    /// - `Status::permission_denied` if the subject is not the owner
    fn require_subject(&self, resource_owner_id: u64) -> Result<AuthenticatedSubject, Status>;
}

impl<T> SubjectExt for Request<T> {
    fn subject(&self) -> Result<AuthenticatedSubject, Status> {
        self.extensions()
            .get::<AuthenticatedSubject>()
            .copied()
            .ok_or_else(|| {
                Status::unauthenticated(
                    "No authenticated subject found. Ensure TokenServerInterceptor is attached.",
                )
            })
    }

    fn require_subject(&self, resource_owner_id: u64) -> Result<AuthenticatedSubject, Status> {
        let subject = self.subject()?;

        if !subject.is_owner(resource_owner_id) {
            return Err(Status::permission_denied(
                "You do not have permission to access this resource",
            ));
        }

        Ok(subject)
    }
}
