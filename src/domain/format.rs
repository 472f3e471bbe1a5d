use crate::domain::model::Draw;
use crate::utils::error::{LotoError, Result};
use chrono::NaiveDate;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const BOULE_PREFIX: &str = "boule_";
pub const DATE_KEY: &str = "date_de_tirage";

/// Lottery games known to the tool, in header detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LotoKind {
    /// Loto since 2008: 5 balls out of 49 and a chance number out of 10.
    #[default]
    #[serde(rename = "5_boules")]
    #[cfg_attr(feature = "cli", value(name = "5_boules"))]
    FiveBalls,
    /// Loto before 2008: 6 balls out of 49 and a complementary ball.
    #[serde(rename = "6_boules")]
    #[cfg_attr(feature = "cli", value(name = "6_boules"))]
    SixBalls,
    /// EuroMillions: 5 balls out of 50 and 2 stars out of 12.
    #[serde(rename = "euromillion")]
    #[cfg_attr(feature = "cli", value(name = "euromillion"))]
    EuroMillion,
}

impl LotoKind {
    pub const ALL: [LotoKind; 3] = [LotoKind::FiveBalls, LotoKind::SixBalls, LotoKind::EuroMillion];

    pub fn format(self) -> &'static LotoFormat {
        match self {
            LotoKind::FiveBalls => &LOTO_5_BOULES,
            LotoKind::SixBalls => &LOTO_6_BOULES,
            LotoKind::EuroMillion => &EUROMILLION,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            LotoKind::FiveBalls => "5_boules",
            LotoKind::SixBalls => "6_boules",
            LotoKind::EuroMillion => "euromillion",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// First game whose column layout matches `header`.
    pub fn detect<S: AsRef<str>>(header: &[S]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.format().matches_header(header))
    }
}

impl fmt::Display for LotoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Column layout and number ranges of a lottery game.
#[derive(Debug)]
pub struct LotoFormat {
    pub name: &'static str,
    pub boules_nb: usize,
    pub max: u32,
    pub chance_prefix: &'static str,
    pub chance_nb: usize,
    pub max_chance: u32,
    /// Extra `boule_*` columns tolerated in the header.
    pub whitelist: Option<&'static str>,
    /// Suffix of the second draw columns, `boule_1_second_tirage` and so on.
    pub second_draw: Option<&'static str>,
}

pub static LOTO_5_BOULES: LotoFormat = LotoFormat {
    name: "Loto5Boules",
    boules_nb: 5,
    max: 49,
    chance_prefix: "numero_chance",
    chance_nb: 1,
    max_chance: 10,
    whitelist: Some(r"boule_[1-5]_second_tirage"),
    second_draw: Some("_second_tirage"),
};

pub static LOTO_6_BOULES: LotoFormat = LotoFormat {
    name: "Loto6Boules",
    boules_nb: 6,
    max: 49,
    chance_prefix: "boule_complementaire",
    chance_nb: 1,
    max_chance: 10,
    whitelist: None,
    second_draw: None,
};

pub static EUROMILLION: LotoFormat = LotoFormat {
    name: "EuroMillion",
    boules_nb: 5,
    max: 50,
    chance_prefix: "etoile_",
    chance_nb: 2,
    max_chance: 12,
    whitelist: None,
    second_draw: None,
};

impl LotoFormat {
    pub fn boule_keys(&self) -> Vec<String> {
        numbered_keys(BOULE_PREFIX, self.boules_nb)
    }

    pub fn chance_keys(&self) -> Vec<String> {
        numbered_keys(self.chance_prefix, self.chance_nb)
    }

    pub fn whitelisted(&self, key: &str) -> bool {
        match self.whitelist {
            Some(pattern) => Regex::new(&format!("^(?:{})", pattern))
                .map(|re| re.is_match(key))
                .unwrap_or(false),
            None => false,
        }
    }

    /// Distinct counts and ranges of `draw` fit this game.
    pub fn is_valid_draw(&self, draw: &Draw) -> bool {
        distinct_count(&draw.grid) == self.boules_nb
            && distinct_count(&draw.chance) == self.chance_nb
            && draw.grid.iter().all(|&ball| 0 < ball && ball <= self.max)
            && draw.chance.iter().all(|&chance| 0 < chance && chance <= self.max_chance)
    }

    /// Every ball and chance column is present and no unknown column uses
    /// one of their prefixes.
    pub fn matches_header<S: AsRef<str>>(&self, header: &[S]) -> bool {
        let columns: Vec<&str> = header.iter().map(|h| h.as_ref()).collect();
        let expected: Vec<String> = self
            .boule_keys()
            .into_iter()
            .chain(self.chance_keys())
            .collect();

        if !expected.iter().all(|key| columns.contains(&key.as_str())) {
            return false;
        }

        !columns.iter().any(|&h| {
            (h.starts_with(BOULE_PREFIX) || h.starts_with(self.chance_prefix))
                && !expected.iter().any(|key| key == h)
                && !self.whitelisted(h)
        })
    }

    /// Draws held by one history row. A row whose date cannot be read yields
    /// nothing.
    pub fn extract(&self, row: &HashMap<String, String>) -> Result<Vec<Draw>> {
        let grid = read_numbers(row, &self.boule_keys())?;
        let chance = read_numbers(row, &self.chance_keys())?;
        let raw_date = column(row, DATE_KEY)?;

        let Some(date) = parse_draw_date(raw_date) else {
            tracing::warn!("Unable to parse draw date '{}', row skipped", raw_date);
            return Ok(Vec::new());
        };

        let mut draws = vec![Draw::new(grid, chance.clone()).with_date(date)];
        if let Some(second) = self.extract_second_draw(row)? {
            draws.push(Draw::new(second, chance));
        }
        Ok(draws)
    }

    fn extract_second_draw(&self, row: &HashMap<String, String>) -> Result<Option<Vec<u32>>> {
        let Some(suffix) = self.second_draw else {
            return Ok(None);
        };

        let mut balls = Vec::new();
        for i in 1..=self.boules_nb {
            let key = format!("{}{}{}", BOULE_PREFIX, i, suffix);
            match row.get(&key).map(|v| v.trim()) {
                Some("") => return Ok(None),
                Some(value) => balls.push(parse_number(&key, value)?),
                None => {}
            }
        }

        Ok((!balls.is_empty()).then_some(balls))
    }

    /// Random draw for this game, balls and chance numbers distinct.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Draw {
        Draw::new(
            sample_numbers(rng, self.max, self.boules_nb),
            sample_numbers(rng, self.max_chance, self.chance_nb),
        )
    }
}

impl fmt::Display for LotoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn numbered_keys(prefix: &str, count: usize) -> Vec<String> {
    if count == 1 {
        return vec![prefix.to_string()];
    }
    (1..=count).map(|i| format!("{}{}", prefix, i)).collect()
}

fn distinct_count(values: &[u32]) -> usize {
    let mut values = values.to_vec();
    values.sort_unstable();
    values.dedup();
    values.len()
}

fn sample_numbers<R: Rng + ?Sized>(rng: &mut R, max: u32, amount: usize) -> Vec<u32> {
    rand::seq::index::sample(rng, max as usize, amount)
        .into_iter()
        .map(|index| index as u32 + 1)
        .collect()
}

fn column<'a>(row: &'a HashMap<String, String>, key: &str) -> Result<&'a str> {
    row.get(key)
        .map(String::as_str)
        .ok_or_else(|| LotoError::ProcessingError {
            message: format!("missing column '{}'", key),
        })
}

fn read_numbers(row: &HashMap<String, String>, keys: &[String]) -> Result<Vec<u32>> {
    keys.iter()
        .map(|key| parse_number(key, column(row, key)?))
        .collect()
}

fn parse_number(key: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|e| LotoError::ProcessingError {
            message: format!("invalid number '{}' in column '{}': {}", value, key, e),
        })
}

struct DateFormat {
    pattern: &'static str,
    year_digits: Option<usize>,
}

static SLASH_DATE_FORMATS: [DateFormat; 2] = [
    DateFormat {
        pattern: "%d/%m/%Y",
        year_digits: Some(4),
    },
    DateFormat {
        pattern: "%d/%m/%y",
        year_digits: Some(2),
    },
];

static COMPACT_DATE_FORMAT: DateFormat = DateFormat {
    pattern: "%Y%m%d",
    year_digits: None,
};

/// Draw dates come as `DD/MM/YYYY`, `DD/MM/YY` or `YYYYMMDD`.
pub fn parse_draw_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let slash_formats: &[DateFormat] = if raw.contains('/') {
        &SLASH_DATE_FORMATS
    } else {
        &[]
    };

    for format in slash_formats.iter().chain(std::iter::once(&COMPACT_DATE_FORMAT)) {
        if let Some(digits) = format.year_digits {
            let year = raw.rsplit('/').next().unwrap_or_default();
            if year.len() != digits {
                continue;
            }
        }
        match NaiveDate::parse_from_str(raw, format.pattern) {
            Ok(date) => return Some(date),
            Err(e) => tracing::debug!("'{}' does not match {}: {}", raw, format.pattern, e),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn header(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            LOTO_5_BOULES.boule_keys(),
            vec!["boule_1", "boule_2", "boule_3", "boule_4", "boule_5"]
        );
        assert_eq!(LOTO_5_BOULES.chance_keys(), vec!["numero_chance"]);
        assert_eq!(LOTO_6_BOULES.chance_keys(), vec!["boule_complementaire"]);
        assert_eq!(EUROMILLION.chance_keys(), vec!["etoile_1", "etoile_2"]);
    }

    #[test]
    fn test_whitelist() {
        assert!(LOTO_5_BOULES.whitelisted("boule_3_second_tirage"));
        assert!(!LOTO_5_BOULES.whitelisted("boule_6_second_tirage"));
        assert!(!LOTO_5_BOULES.whitelisted("x_boule_3_second_tirage"));
        assert!(!EUROMILLION.whitelisted("boule_3_second_tirage"));
    }

    #[test]
    fn test_detect_five_balls_with_second_draw() {
        let columns = header(&[
            "annee_numero_de_tirage",
            "date_de_tirage",
            "boule_1",
            "boule_2",
            "boule_3",
            "boule_4",
            "boule_5",
            "numero_chance",
            "boule_1_second_tirage",
            "boule_2_second_tirage",
            "boule_3_second_tirage",
            "boule_4_second_tirage",
            "boule_5_second_tirage",
            "",
        ]);
        assert_eq!(LotoKind::detect(&columns), Some(LotoKind::FiveBalls));
    }

    #[test]
    fn test_detect_six_balls() {
        let columns = header(&[
            "date_de_tirage",
            "boule_1",
            "boule_2",
            "boule_3",
            "boule_4",
            "boule_5",
            "boule_6",
            "boule_complementaire",
        ]);
        // boule_6 disqualifies the 5 balls game
        assert!(!LOTO_5_BOULES.matches_header(&columns));
        assert_eq!(LotoKind::detect(&columns), Some(LotoKind::SixBalls));
    }

    #[test]
    fn test_detect_euromillion() {
        let columns = header(&[
            "date_de_tirage",
            "boule_1",
            "boule_2",
            "boule_3",
            "boule_4",
            "boule_5",
            "etoile_1",
            "etoile_2",
        ]);
        assert_eq!(LotoKind::detect(&columns), Some(LotoKind::EuroMillion));
    }

    #[test]
    fn test_detect_unknown() {
        let columns = header(&["date_de_tirage", "boule_1", "boule_2"]);
        assert_eq!(LotoKind::detect(&columns), None);
    }

    #[test]
    fn test_is_valid_draw() {
        assert!(LOTO_5_BOULES.is_valid_draw(&Draw::new(vec![1, 2, 3, 4, 49], vec![10])));
        assert!(!LOTO_5_BOULES.is_valid_draw(&Draw::new(vec![1, 1, 1, 1, 1], vec![1])));
        assert!(!LOTO_5_BOULES.is_valid_draw(&Draw::new(vec![1, 2, 3, 4, 50], vec![1])));
        assert!(!LOTO_5_BOULES.is_valid_draw(&Draw::new(vec![0, 2, 3, 4, 5], vec![1])));
        assert!(!LOTO_5_BOULES.is_valid_draw(&Draw::new(vec![1, 2, 3, 4, 5], vec![11])));
        assert!(EUROMILLION.is_valid_draw(&Draw::new(vec![1, 2, 3, 4, 50], vec![1, 12])));
        assert!(!EUROMILLION.is_valid_draw(&Draw::new(vec![1, 2, 3, 4, 5], vec![3, 3])));
        assert!(LOTO_6_BOULES.is_valid_draw(&Draw::new(vec![1, 2, 3, 4, 5, 6], vec![7])));
    }

    #[test]
    fn test_parse_draw_date() {
        let expected = NaiveDate::from_ymd_opt(2019, 2, 2).unwrap();
        assert_eq!(parse_draw_date("02/02/2019"), Some(expected));
        assert_eq!(parse_draw_date("02/02/19"), Some(expected));
        assert_eq!(parse_draw_date("20190202"), Some(expected));
        assert_eq!(parse_draw_date("2019-02-02"), None);
        assert_eq!(parse_draw_date(""), None);
    }

    #[test]
    fn test_extract_five_balls_with_second_draw() {
        let line = row(&[
            ("date_de_tirage", "02/02/2019"),
            ("boule_1", "3"),
            ("boule_2", "12"),
            ("boule_3", "25"),
            ("boule_4", "31"),
            ("boule_5", "44"),
            ("numero_chance", "7"),
            ("boule_1_second_tirage", "1"),
            ("boule_2_second_tirage", "9"),
            ("boule_3_second_tirage", "17"),
            ("boule_4_second_tirage", "28"),
            ("boule_5_second_tirage", "40"),
        ]);

        let draws = LOTO_5_BOULES.extract(&line).unwrap();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].to_string(), "tirage=3-12-25-31-44+7 le 02-02-2019");
        assert_eq!(draws[1].to_string(), "tirage=1-9-17-28-40+7");
    }

    #[test]
    fn test_extract_skips_empty_second_draw() {
        let line = row(&[
            ("date_de_tirage", "20081006"),
            ("boule_1", "3"),
            ("boule_2", "12"),
            ("boule_3", "25"),
            ("boule_4", "31"),
            ("boule_5", "44"),
            ("numero_chance", "7"),
            ("boule_1_second_tirage", ""),
            ("boule_2_second_tirage", ""),
            ("boule_3_second_tirage", ""),
            ("boule_4_second_tirage", ""),
            ("boule_5_second_tirage", ""),
        ]);

        let draws = LOTO_5_BOULES.extract(&line).unwrap();
        assert_eq!(draws.len(), 1);
    }

    #[test]
    fn test_extract_bad_date_yields_nothing() {
        let line = row(&[
            ("date_de_tirage", "not a date"),
            ("boule_1", "1"),
            ("boule_2", "2"),
            ("boule_3", "3"),
            ("boule_4", "4"),
            ("boule_5", "5"),
            ("etoile_1", "1"),
            ("etoile_2", "2"),
        ]);
        assert!(EUROMILLION.extract(&line).unwrap().is_empty());
    }

    #[test]
    fn test_extract_bad_number_is_an_error() {
        let line = row(&[
            ("date_de_tirage", "20190202"),
            ("boule_1", "x"),
            ("boule_2", "2"),
            ("boule_3", "3"),
            ("boule_4", "4"),
            ("boule_5", "5"),
            ("etoile_1", "1"),
            ("etoile_2", "2"),
        ]);
        let err = EUROMILLION.extract(&line).unwrap_err();
        assert!(err.to_string().contains("boule_1"));
    }

    #[test]
    fn test_extract_missing_column_is_an_error() {
        let line = row(&[("date_de_tirage", "20190202")]);
        assert!(LOTO_6_BOULES.extract(&line).is_err());
    }

    #[test]
    fn test_generate_is_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in LotoKind::ALL {
            let format = kind.format();
            for _ in 0..200 {
                let draw = format.generate(&mut rng);
                assert!(format.is_valid_draw(&draw), "{} invalid for {}", draw, format);
                assert!(draw.date.is_none());
            }
        }
    }

    #[test]
    fn test_kind_keys() {
        assert_eq!(LotoKind::from_key("euromillion"), Some(LotoKind::EuroMillion));
        assert_eq!(LotoKind::from_key("7_boules"), None);
        assert_eq!(LotoKind::default().format().name, "Loto5Boules");
        assert_eq!(LotoKind::SixBalls.to_string(), "6_boules");
    }
}
