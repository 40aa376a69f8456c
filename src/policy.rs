use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{verify, PassOptions};

/// A password rule set that can be stored in a file, e.g.
///
/// ```yaml
/// length: 24
/// lowercase: true
/// uppercase: true
/// custom: ["-_."]
/// no_repeats: true
/// exclude: ["$"]
/// ```
///
/// Arbitrary verifiers can't be written down, so a policy is limited to substring exclusions.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PasswordPolicy {
    pub length: usize,
    #[serde(default, skip_serializing_if = "is_false")]
    pub numbers: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub lowercase: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub uppercase: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub special: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_repeats: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
}

impl PasswordPolicy {
    pub fn from_yaml(rdr: impl Read) -> Result<PasswordPolicy, serde_yaml::Error> {
        serde_yaml::from_reader(rdr)
    }

    /// Build generation options. Classes are added in a fixed order (numbers, lowercase,
    /// uppercase, special, then the custom sets as listed), followed by the verifiers.
    pub fn to_options(&self) -> PassOptions {
        let mut opts = PassOptions::new(self.length);
        if self.numbers {
            opts = opts.include_numbers();
        }
        if self.lowercase {
            opts = opts.include_lowercase();
        }
        if self.uppercase {
            opts = opts.include_uppercase();
        }
        if self.special {
            opts = opts.include_special();
        }
        for chars in &self.custom {
            opts = opts.include_custom(chars);
        }
        if self.no_repeats {
            opts = opts.no_repeating_characters();
        }
        for needle in &self.exclude {
            opts = opts.custom_verifier(verify::excluding(needle));
        }
        if let Some(iterations) = self.iterations {
            opts = opts.correctness_iterations(iterations);
        }
        opts
    }
}

fn is_false(b: &bool) -> bool {
    !b
}
