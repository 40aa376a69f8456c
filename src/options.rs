use std::fmt;

use rand::rngs::OsRng;

use crate::charset::CharClass;
use crate::verify::{self, Verifier};
use crate::{GenerationError, GenerationErrorRepr, Secret};

const DEFAULT_ITERATIONS: u32 = 50;

/// Longest password that can be generated. Anything longer is rejected up front rather than
/// attempting to allocate it.
pub const MAX_LENGTH: usize = 1 << 16;

/// Options for a single password generation.
///
/// Every builder method only ever adds to the options (classes and verifiers are appended in
/// call order); the one exception is [`PassOptions::correctness_iterations`], which replaces the
/// retry budget.
///
/// ```
/// let password = passrule::PassOptions::new(16)
///     .include_lowercase()
///     .include_uppercase()
///     .include_special()
///     .no_repeating_characters()
///     .generate()
///     .unwrap();
/// assert_eq!(password.as_str().chars().count(), 16);
/// ```
pub struct PassOptions {
    pub(crate) classes: Vec<CharClass>,
    pub(crate) length: usize,
    pub(crate) iterations: u32,
    pub(crate) verifiers: Vec<Verifier>,
}

impl PassOptions {
    pub fn new(length: usize) -> PassOptions {
        PassOptions {
            classes: Vec::new(),
            length,
            iterations: DEFAULT_ITERATIONS,
            verifiers: Vec::new(),
        }
    }

    pub fn include_class(mut self, class: CharClass) -> PassOptions {
        self.classes.push(class);
        self
    }

    pub fn include_numbers(self) -> PassOptions {
        self.include_class(CharClass::numbers())
    }

    pub fn include_lowercase(self) -> PassOptions {
        self.include_class(CharClass::lowercase())
    }

    pub fn include_uppercase(self) -> PassOptions {
        self.include_class(CharClass::uppercase())
    }

    pub fn include_special(self) -> PassOptions {
        self.include_class(CharClass::special())
    }

    /// Include an arbitrary set of characters, e.g. a limited set of symbols a site accepts.
    pub fn include_custom(self, chars: &str) -> PassOptions {
        self.include_class(CharClass::new(chars))
    }

    pub fn no_repeating_characters(self) -> PassOptions {
        self.custom_verifier(verify::no_adjacent_repeats)
    }

    pub fn custom_verifier<F>(mut self, verifier: F) -> PassOptions
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.verifiers.push(Box::new(verifier));
        self
    }

    /// Number of passwords to try before giving up when the verifiers keep rejecting them.
    pub fn correctness_iterations(mut self, iterations: u32) -> PassOptions {
        self.iterations = iterations;
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn classes(&self) -> &[CharClass] {
        &self.classes
    }

    /// Generate a password using the operating system's random source.
    pub fn generate(&self) -> Result<Secret, GenerationError> {
        crate::generate_random_password(&mut OsRng, self)
    }

    pub(crate) fn validate(&self) -> Result<(), GenerationErrorRepr> {
        if self.classes.is_empty() {
            return Err(GenerationErrorRepr::NoCharacterClasses);
        }
        if let Some(idx) = self.classes.iter().position(CharClass::is_empty) {
            return Err(GenerationErrorRepr::EmptyCharacterClass(idx));
        }
        if self.length > MAX_LENGTH {
            return Err(GenerationErrorRepr::LengthTooLarge(self.length));
        }
        if self.iterations == 0 {
            return Err(GenerationErrorRepr::ZeroIterations);
        }
        Ok(())
    }
}

impl fmt::Debug for PassOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassOptions")
            .field("classes", &self.classes)
            .field("length", &self.length)
            .field("iterations", &self.iterations)
            .field("verifiers", &self.verifiers.len())
            .finish()
    }
}
