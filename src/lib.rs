use serde::{Deserialize, Serialize};

pub mod charset;
mod options;
pub mod password_generation;
mod policy;
mod rng;
pub mod verify;

pub use charset::CharClass;
pub use options::{PassOptions, MAX_LENGTH};
pub use password_generation::generate_random_password;
pub use policy::PasswordPolicy;
pub use verify::Verifier;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct GenerationError(GenerationErrorRepr);

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self.0 {
            GenerationErrorRepr::IterationsExhausted(_) => ErrorKind::IterationsExhausted,
            GenerationErrorRepr::RandomSource(_) => ErrorKind::RandomSource,
            GenerationErrorRepr::NoCharacterClasses
            | GenerationErrorRepr::EmptyCharacterClass(_)
            | GenerationErrorRepr::LengthTooLarge(_)
            | GenerationErrorRepr::ZeroIterations => ErrorKind::InvalidOptions,
        }
    }
}

impl From<GenerationErrorRepr> for GenerationError {
    fn from(err: GenerationErrorRepr) -> GenerationError {
        GenerationError(err)
    }
}

/// The broad category of a [`GenerationError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// No candidate passed every verifier within the retry budget. Relaxing the rules or raising
    /// the budget may help.
    IterationsExhausted,
    /// The random source failed. This is never retried.
    RandomSource,
    /// The options can never produce a password: no classes, an empty class, a zero budget, or a
    /// length above [`MAX_LENGTH`].
    InvalidOptions,
}

#[derive(Debug, thiserror::Error)]
enum GenerationErrorRepr {
    #[error("password iterations exhausted after {0} attempts")]
    IterationsExhausted(u32),
    #[error("the random source failed: {0}")]
    RandomSource(#[source] rand::Error),
    #[error("no character classes were configured")]
    NoCharacterClasses,
    #[error("character class #{0} is empty")]
    EmptyCharacterClass(usize),
    #[error("a password length of {0} is above the limit of {}", MAX_LENGTH)]
    LengthTooLarge(usize),
    #[error("the retry budget must allow at least one attempt")]
    ZeroIterations,
}

#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_debug_is_opaque() {
        let secret = Secret::from("hunter2".to_owned());
        assert!(!format!("{secret:?}").contains("hunter2"));
        assert_eq!(secret.as_str(), "hunter2");
    }

    #[test]
    fn error_kinds() {
        let err = GenerationError::from(GenerationErrorRepr::IterationsExhausted(3));
        assert_eq!(err.kind(), ErrorKind::IterationsExhausted);
        assert_eq!(err.to_string(), "password iterations exhausted after 3 attempts");

        let err = GenerationError::from(GenerationErrorRepr::EmptyCharacterClass(1));
        assert_eq!(err.kind(), ErrorKind::InvalidOptions);
    }
}
