use crate::utils::error::{LotoError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One lottery draw ("tirage"): main balls, chance numbers and, for drawn
/// results read from history files, the draw date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draw {
    pub grid: Vec<u32>,
    pub chance: Vec<u32>,
    pub date: Option<NaiveDate>,
}

impl Draw {
    pub fn new(grid: Vec<u32>, chance: Vec<u32>) -> Self {
        Self {
            grid,
            chance,
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Parses `G1-G2-...+C1+C2...`.
    pub fn from_string(input: &str) -> Result<Self> {
        let invalid = || LotoError::InvalidDraw {
            input: input.to_string(),
        };

        let (grid_str, chance_str) = input.split_once('+').ok_or_else(invalid)?;
        let grid = parse_numbers(grid_str, '-').ok_or_else(invalid)?;
        let chance = parse_numbers(chance_str, '+').ok_or_else(invalid)?;

        Ok(Self::new(grid, chance))
    }

    /// Grid comparison used to decide whether a draw already happened.
    ///
    /// Chance numbers and dates are ignored. Grids of equal length must hold
    /// the same balls; otherwise every ball of the shorter grid must appear in
    /// the longer one. Not transitive, hence not `PartialEq`.
    pub fn matches(&self, other: &Draw) -> bool {
        use std::cmp::Ordering;

        match self.grid.len().cmp(&other.grid.len()) {
            Ordering::Equal => sorted(&self.grid) == sorted(&other.grid),
            Ordering::Less => self.grid.iter().all(|ball| other.grid.contains(ball)),
            Ordering::Greater => other.grid.iter().all(|ball| self.grid.contains(ball)),
        }
    }

    pub fn is_in(&self, history: &[Draw]) -> bool {
        history.iter().any(|drawn| drawn.matches(self))
    }
}

impl FromStr for Draw {
    type Err = LotoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tirage={}+{}",
            join(&sorted(&self.grid), "-"),
            join(&sorted(&self.chance), "+")
        )?;
        if let Some(date) = self.date {
            write!(f, " le {}", date.format("%d-%m-%Y"))?;
        }
        Ok(())
    }
}

fn parse_numbers(input: &str, separator: char) -> Option<Vec<u32>> {
    input
        .split(separator)
        .map(|piece| piece.trim().parse::<u32>().ok())
        .collect()
}

fn sorted(values: &[u32]) -> Vec<u32> {
    let mut values = values.to_vec();
    values.sort_unstable();
    values
}

fn join(values: &[u32], separator: &str) -> String {
    values
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}
