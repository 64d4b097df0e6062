//! The shared viewer password.
//!
//! The operator picks a password with the `hash_password` binary, which checks
//! that it is hard to guess before printing its bcrypt hash. The server is then
//! configured with that hash and checks log in attempts against it.

use std::fmt::Display;

use bcrypt::{hash, verify};
use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::Error;

/// A password that has been checked for strength, but not yet hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Check the strength of `raw_password_string`.
    ///
    /// # Errors
    ///
    /// Returns [Error::TooWeak] with suggestions for a stronger password if
    /// the password is easy to guess.
    pub fn new(raw_password_string: &str) -> Result<Self, Error> {
        let password_analysis = zxcvbn(raw_password_string, &[]);

        match password_analysis.score() {
            Score::Three | Score::Four => Ok(Self(raw_password_string.to_owned())),
            _ => Err(Error::TooWeak(
                password_analysis
                    .feedback()
                    .unwrap_or(&Feedback::default())
                    .to_string(),
            )),
        }
    }
}

impl Display for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", str::repeat("*", 8))
    }
}

/// A bcrypt hash of the viewer password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash `password` with the specified `cost`.
    ///
    /// Pass in [PasswordHash::DEFAULT_COST] to use the recommended cost.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the password could not be hashed.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        hash(&password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Read a hash produced by `hash_password`, e.g. from the environment.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidPasswordHash] if `raw_password_hash` does not look
    /// like a bcrypt hash.
    pub fn parse(raw_password_hash: &str) -> Result<Self, Error> {
        let raw_password_hash = raw_password_hash.trim();
        let is_bcrypt = raw_password_hash.len() == 60
            && ["$2a$", "$2b$", "$2x$", "$2y$"]
                .iter()
                .any(|prefix| raw_password_hash.starts_with(prefix));

        if is_bcrypt {
            Ok(Self(raw_password_hash.to_owned()))
        } else {
            Err(Error::InvalidPasswordHash)
        }
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid bcrypt hash.
    #[cfg(test)]
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_owned())
    }

    /// Hash a raw password string after checking its strength.
    pub fn from_raw_password(raw_password: &str, cost: u32) -> Result<Self, Error> {
        let validated_password = ValidatedPassword::new(raw_password)?;
        PasswordHash::new(validated_password, cost)
    }

    /// Check that `raw_password` matches the hashed password.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the stored hash is malformed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        verify(raw_password, &self.0).map_err(|error| Error::HashingError(error.to_string()))
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod password_hash_tests {
    use crate::{Error, password::PasswordHash};

    const OKON_HASH: &str = "$2b$12$Gwf0uvxH3L7JLfo0CC/NCOoijK2vQ/wbgP.LeNup8vj6gg31IiFkm";

    #[test]
    fn verify_password_succeeds_for_valid_password() {
        let hash = PasswordHash::parse(OKON_HASH).unwrap();

        assert!(hash.verify("okon").unwrap());
    }

    #[test]
    fn verify_password_fails_for_invalid_password() {
        let hash = PasswordHash::parse(OKON_HASH).unwrap();

        assert!(!hash.verify("thewrongpassword").unwrap());
    }

    #[test]
    fn parse_trims_whitespace() {
        let hash = PasswordHash::parse(&format!("  {OKON_HASH}\n")).unwrap();

        assert_eq!(hash.to_string(), OKON_HASH);
    }

    #[test]
    fn parse_rejects_plain_text() {
        assert_eq!(
            PasswordHash::parse("hunter2"),
            Err(Error::InvalidPasswordHash)
        );
    }

    #[test]
    fn hash_password_produces_verifiable_hash() {
        let password = "roostersgocockledoodledoo";
        let hash = PasswordHash::from_raw_password(password, 4).unwrap();

        assert!(hash.verify(password).unwrap());
        assert!(!hash.verify("the_wrong_password").unwrap());
    }

    #[test]
    fn new_unchecked_accepts_hash_of_weak_password() {
        let hash = PasswordHash::new_unchecked(&bcrypt::hash("okon", 4).unwrap());

        assert!(hash.verify("okon").unwrap());
        assert!(!hash.verify("test").unwrap());
    }

    #[test]
    fn from_raw_password_fails_on_weak_password() {
        let hash = PasswordHash::from_raw_password("password1234", 4);

        assert!(matches!(hash, Err(Error::TooWeak(_))));
    }
}
