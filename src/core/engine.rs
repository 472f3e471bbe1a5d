use crate::core::generator::generate_unseen;
use crate::core::{ConfigProvider, Draw, HistorySource, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Outcome {
    Generate {
        format: &'static str,
        draw: Draw,
    },
    Check {
        format: &'static str,
        draw: Draw,
        valid: bool,
        drawn: bool,
    },
}

impl Outcome {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Generate { format, draw } => {
                writeln!(f, "Generation for {}", format)?;
                write!(f, "{}", draw)
            }
            Outcome::Check {
                format,
                draw,
                valid,
                drawn,
            } => {
                writeln!(f, "Is a valid {} ? {}", format, valid)?;
                write!(f, "{} was drawn ? {}", draw, drawn)
            }
        }
    }
}

pub struct LotoEngine<H: HistorySource, C: ConfigProvider> {
    history: H,
    config: C,
}

impl<H: HistorySource, C: ConfigProvider> LotoEngine<H, C> {
    pub fn new(history: H, config: C) -> Self {
        Self { history, config }
    }

    pub fn run(&self) -> Result<Outcome> {
        let format = self.config.loto_kind().format();

        // parse the candidate before reading any file so a typo fails fast
        let candidate = self.config.exist().map(Draw::from_string).transpose()?;

        let history = self.history.load()?;
        tracing::info!("{} draws in history", history.len());

        match candidate {
            Some(draw) => {
                let valid = format.is_valid_draw(&draw);
                let drawn = draw.is_in(&history);
                tracing::debug!("{} valid={} drawn={}", draw, valid, drawn);
                Ok(Outcome::Check {
                    format: format.name,
                    draw,
                    valid,
                    drawn,
                })
            }
            None => {
                let mut rng = match self.config.seed() {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let draw = generate_unseen(&history, format, &mut rng, self.config.max_attempts())?;
                Ok(Outcome::Generate {
                    format: format.name,
                    draw,
                })
            }
        }
    }
}
