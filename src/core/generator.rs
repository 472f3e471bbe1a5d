use crate::domain::format::LotoFormat;
use crate::domain::model::Draw;
use crate::utils::error::{LotoError, Result};
use rand::Rng;

pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Generates draws for `format` until one does not match any draw of
/// `history`.
pub fn generate_unseen<R: Rng + ?Sized>(
    history: &[Draw],
    format: &LotoFormat,
    rng: &mut R,
    max_attempts: usize,
) -> Result<Draw> {
    tracing::debug!("Generation for {}", format);

    for attempt in 1..=max_attempts {
        let draw = format.generate(rng);
        if !draw.is_in(history) {
            tracing::debug!("{} found after {} attempt(s)", draw, attempt);
            return Ok(draw);
        }
        tracing::debug!("{} already drawn", draw);
    }

    Err(LotoError::GenerationExhausted {
        format: format.name.to_string(),
        attempts: max_attempts,
    })
}
