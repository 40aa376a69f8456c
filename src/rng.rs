use rand::{CryptoRng, RngCore};

/// Wraps a random source so that its failures can be surfaced.
///
/// `rand`'s samplers and shuffles go through the infallible `RngCore` methods, which either panic
/// or cannot report an error. This adapter routes every request through `try_fill_bytes`; when
/// the inner source fails the request is answered with zeros and the first error is held until
/// [`CheckedRng::check`] is called. Zeros are always accepted by the uniform range sampler, so a
/// failing source never makes a draw loop forever.
pub(crate) struct CheckedRng<'a, R: ?Sized> {
    inner: &'a mut R,
    failure: Option<rand::Error>,
}

impl<'a, R> CheckedRng<'a, R>
where
    R: RngCore + ?Sized,
{
    pub(crate) fn new(inner: &'a mut R) -> CheckedRng<'a, R> {
        CheckedRng {
            inner,
            failure: None,
        }
    }

    /// Returns the first failure since the last check, if any. Anything drawn since then must be
    /// discarded.
    pub(crate) fn check(&mut self) -> Result<(), rand::Error> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<R> RngCore for CheckedRng<'_, R>
where
    R: RngCore + ?Sized,
{
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.inner.try_fill_bytes(dest) {
            dest.fill(0);
            if self.failure.is_none() {
                self.failure = Some(err);
            }
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

impl<R> CryptoRng for CheckedRng<'_, R> where R: CryptoRng + ?Sized {}

#[cfg(test)]
pub(crate) mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    use super::*;

    /// A random source that always fails, like an unavailable entropy device.
    pub(crate) struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            panic!("infallible method called on a broken source")
        }

        fn next_u64(&mut self) -> u64 {
            panic!("infallible method called on a broken source")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("infallible method called on a broken source")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    impl CryptoRng for BrokenRng {}

    /// A healthy source that starts failing after a number of requests.
    pub(crate) struct FlakyRng {
        inner: ChaCha20Rng,
        remaining: usize,
    }

    impl FlakyRng {
        pub(crate) fn failing_after(requests: usize) -> FlakyRng {
            FlakyRng {
                inner: ChaCha20Rng::seed_from_u64(99),
                remaining: requests,
            }
        }
    }

    impl RngCore for FlakyRng {
        fn next_u32(&mut self) -> u32 {
            panic!("infallible method called on a flaky source")
        }

        fn next_u64(&mut self) -> u64 {
            panic!("infallible method called on a flaky source")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("infallible method called on a flaky source")
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            if self.remaining == 0 {
                return Err(rand::Error::new("entropy source went away"));
            }
            self.remaining -= 1;
            self.inner.try_fill_bytes(dest)
        }
    }

    impl CryptoRng for FlakyRng {}

    #[test]
    fn healthy_source_passes_through() {
        let mut expected = ChaCha20Rng::seed_from_u64(3);
        let mut inner = ChaCha20Rng::seed_from_u64(3);
        let mut rng = CheckedRng::new(&mut inner);
        assert_eq!(rng.next_u64(), expected.next_u64());
        assert!(rng.check().is_ok());
    }

    #[test]
    fn failure_is_held_until_checked() {
        let mut inner = BrokenRng;
        let mut rng = CheckedRng::new(&mut inner);
        assert_eq!(rng.gen_range(0..26usize), 0);
        assert_eq!(rng.gen_range(0..10usize), 0);
        let err = rng.check().unwrap_err();
        assert!(err.to_string().contains("entropy source unavailable"));
        assert!(rng.check().is_ok());
    }
}
