//! Utilities for generating passwords.

use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};

use crate::rng::CheckedRng;
use crate::{GenerationError, GenerationErrorRepr, PassOptions, Secret};

/// Generate a password from `options`, retrying until every verifier accepts it.
///
/// Each attempt draws one character from every class in turn until the requested length is
/// reached, then shuffles the result, so every class appears at least once as long as the length
/// is at least the number of classes. When it is shorter, the classes added first win.
///
/// Correctness is traded for speed: a candidate rejected by any verifier is thrown away whole and
/// a new one generated, up to the retry budget. A failing random source is reported immediately
/// and never retried.
pub fn generate_random_password<R>(
    rng: &mut R,
    options: &PassOptions,
) -> Result<Secret, GenerationError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    options.validate()?;
    let mut rng = CheckedRng::new(rng);

    'attempts: for attempt in 1..=options.iterations {
        let candidate = new_candidate(&mut rng, options)?;
        for (idx, verifier) in options.verifiers.iter().enumerate() {
            if !verifier(candidate.as_str()) {
                log::debug!("attempt {attempt}: candidate rejected by verifier #{idx}");
                continue 'attempts;
            }
        }
        log::trace!("attempt {attempt}: candidate accepted");
        return Ok(Secret(candidate));
    }

    log::debug!(
        "no candidate passed verification in {} attempts",
        options.iterations
    );
    Err(GenerationErrorRepr::IterationsExhausted(options.iterations).into())
}

fn new_candidate<R>(
    rng: &mut CheckedRng<'_, R>,
    options: &PassOptions,
) -> Result<String, GenerationErrorRepr>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut password = Vec::with_capacity(options.length);
    let mut round = Vec::with_capacity(options.classes.len());

    while password.len() < options.length {
        round.clear();
        round.extend(options.classes.iter().map(|class| class.sample(&mut *rng)));
        rng.check().map_err(GenerationErrorRepr::RandomSource)?;

        for &ch in &round {
            if password.len() == options.length {
                break;
            }
            password.push(ch);
        }
    }

    password.shuffle(rng);
    rng.check().map_err(GenerationErrorRepr::RandomSource)?;

    Ok(password.into_iter().collect())
}
