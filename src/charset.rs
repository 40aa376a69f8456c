//! Character classes that passwords are drawn from.

use rand::Rng;

pub static NUMBERS: &str = "0123456789";
pub static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub static SPECIAL: &str = "!@#$%^&*()`=+-_";

/// An ordered set of characters. At least one character of every class in a [`PassOptions`] ends
/// up in the generated password.
///
/// Duplicates are kept: a character listed twice is drawn twice as often.
///
/// [`PassOptions`]: crate::PassOptions
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharClass {
    chars: Vec<char>,
}

impl CharClass {
    pub fn new(chars: &str) -> CharClass {
        CharClass {
            chars: chars.chars().collect(),
        }
    }

    pub fn numbers() -> CharClass {
        CharClass::new(NUMBERS)
    }

    pub fn lowercase() -> CharClass {
        CharClass::new(LOWERCASE)
    }

    pub fn uppercase() -> CharClass {
        CharClass::new(UPPERCASE)
    }

    pub fn special() -> CharClass {
        CharClass::new(SPECIAL)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Draw one character, uniformly by position.
    ///
    /// `rand`'s uniform range sampler re-samples instead of taking a modulus, so no position is
    /// favoured. The class must not be empty.
    pub(crate) fn sample<R>(&self, rng: &mut R) -> char
    where
        R: Rng + ?Sized,
    {
        self.chars[rng.gen_range(0..self.chars.len())]
    }
}
