use crate::scheduler::SchedError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mois civil, sérialisé `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, SchedError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(SchedError::InvalidMonth(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Mois précédent (janvier -> décembre de l'année d'avant).
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// Jours du mois, dans l'ordre.
    pub fn days(&self) -> Vec<Day> {
        days_in_month(self.year, self.month).unwrap_or_default()
    }

    pub fn date_of(&self, day: Day) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, u32::from(day.number()))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchedError::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = SchedError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

/// Jour du mois (1..=31), sérialisé `DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Day(u8);

impl Day {
    pub fn new(n: u8) -> Result<Self, SchedError> {
        if !(1..=31).contains(&n) {
            return Err(SchedError::InvalidDay(n.to_string()));
        }
        Ok(Self(n))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Jour calendaire précédent dans le même mois.
    pub fn pred(&self) -> Option<Day> {
        (self.0 > 1).then(|| Day(self.0 - 1))
    }

    /// Jour suivant (sans vérifier la longueur du mois).
    pub fn succ(&self) -> Option<Day> {
        (self.0 < 31).then(|| Day(self.0 + 1))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for Day {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| SchedError::InvalidDay(s.to_string()))?;
        Self::new(n)
    }
}

impl TryFrom<String> for Day {
    type Error = SchedError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Day> for String {
    fn from(value: Day) -> Self {
        value.to_string()
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Day(date.day() as u8)
    }
}

/// Liste ordonnée des jours d'un mois civil (années bissextiles comprises).
pub fn days_in_month(year: i32, month: u32) -> Result<Vec<Day>, SchedError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| SchedError::InvalidMonth(format!("{year:04}-{month:02}")))?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(Day::from)
        .collect())
}
