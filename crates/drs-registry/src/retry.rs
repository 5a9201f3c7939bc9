use crate::error::{RegistryError, RegistryResult};

/// Result of one attempt inside [`retry`].
#[derive(Debug)]
pub enum Attempt<T> {
    /// The attempt succeeded; stop.
    Done(T),
    /// Lost a race on a generated identifier; try again with a fresh one.
    Conflict,
    /// Any other failure; stop and propagate.
    Fail(RegistryError),
}

impl<T> From<RegistryError> for Attempt<T> {
    fn from(e: RegistryError) -> Self {
        Self::Fail(e)
    }
}

/// Run `attempt` up to `retries + 1` times.
///
/// Conflicts are absorbed; the first `Done` or `Fail` ends the loop. Running
/// out of attempts yields [`RegistryError::Unavailable`]. The closure receives
/// the zero-based attempt number.
pub fn retry<T, F>(operation: &'static str, retries: u32, mut attempt: F) -> RegistryResult<T>
where
    F: FnMut(u32) -> Attempt<T>,
{
    let attempts = retries.saturating_add(1);
    for n in 0..attempts {
        tracing::debug!(operation, attempt = n, "trying");
        match attempt(n) {
            Attempt::Done(value) => return Ok(value),
            Attempt::Conflict => continue,
            Attempt::Fail(e) => return Err(e),
        }
    }
    tracing::error!(
        operation,
        attempts,
        "could not generate unique identifier"
    );
    Err(RegistryError::Unavailable {
        operation,
        attempts,
    })
}
