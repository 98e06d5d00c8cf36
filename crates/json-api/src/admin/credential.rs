//! Admin credential.

use sha2::{Digest, Sha256};

/// Digest of the configured admin secret. Presented secrets are compared by digest.
#[derive(Clone)]
pub(crate) struct AdminCredential {
    digest: [u8; 32],
}

impl AdminCredential {
    pub(crate) fn new(secret: &str) -> Self {
        Self {
            digest: hash_secret(secret),
        }
    }

    /// Whether `presented` matches the configured secret. Blank secrets never match.
    pub(crate) fn verify(&self, presented: &str) -> bool {
        let presented = presented.trim();

        !presented.is_empty() && hash_secret(presented) == self.digest
    }
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential").finish_non_exhaustive()
    }
}

fn hash_secret(secret: &str) -> [u8; 32] {
    Sha256::digest(secret.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_matches_configured_secret() {
        let credential = AdminCredential::new("door-secret");

        assert!(credential.verify("door-secret"));
        assert!(credential.verify(" door-secret "));
        assert!(!credential.verify("door-secret2"));
    }

    #[test]
    fn blank_secret_never_matches() {
        let credential = AdminCredential::new("");

        assert!(!credential.verify(""));
        assert!(!credential.verify("   "));
    }

    #[test]
    fn debug_hides_digest() {
        let credential = AdminCredential::new("door-secret");

        assert_eq!(format!("{credential:?}"), "AdminCredential { .. }");
    }
}
