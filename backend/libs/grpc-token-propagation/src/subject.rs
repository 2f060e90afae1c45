//! Authenticated subject stored in request extensions

/// Subject identifier recovered by
/// [`TokenServerInterceptor`](crate::TokenServerInterceptor)
///
/// Handlers read it through [`SubjectExt`](crate::SubjectExt) rather than
/// touching extensions directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthenticatedSubject(pub u64);

impl AuthenticatedSubject {
    pub fn id(&self) -> u64 {
        self.0
    }

    /// Check if the subject matches a resource owner id
    pub fn is_owner(&self, resource_owner_id: u64) -> bool {
        self.0 == resource_owner_id
    }
}

impl From<AuthenticatedSubject> for u64 {
    fn from(subject: AuthenticatedSubject) -> Self {
        subject.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_owner() {
        let subject = AuthenticatedSubject(1234);

        assert!(subject.is_owner(1234));
        assert!(!subject.is_owner(1235));
        assert_eq!(u64::from(subject), 1234);
    }

    #[test]
    fn test_zero_is_an_ordinary_subject() {
        assert!(AuthenticatedSubject(0).is_owner(0));
    }
}
