use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::ParseIntError,
    ops::Deref,
    str::FromStr,
};
use strum::{EnumIter, EnumProperty, IntoEnumIterator};
use thiserror::Error;

/// Number of years offered when scheduling, starting from the current one
const UPCOMING_YEARS: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPeriod {
    #[error("semester must be 1 (Spring) or 2 (Fall), got '{0}'")]
    Semester(String),
    #[error("year must be a positive integer, got '{0}'")]
    Year(String),
}

impl From<ParseIntError> for InvalidPeriod {
    fn from(e: ParseIntError) -> Self {
        InvalidPeriod::Year(e.to_string())
    }
}

/// Half of an academic year. Serialized as its number (1 or 2).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumProperty,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Semester {
    #[strum(props(name = "Spring"))]
    Spring = 1,
    #[strum(props(name = "Fall"))]
    Fall = 2,
}

impl Semester {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        self.get_str("name").unwrap_or_default()
    }

    pub fn all() -> Vec<Semester> {
        Semester::iter().collect()
    }
}

impl TryFrom<u8> for Semester {
    type Error = InvalidPeriod;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Semester::iter()
            .find(|s| s.number() == number)
            .ok_or_else(|| InvalidPeriod::Semester(number.to_string()))
    }
}

impl From<Semester> for u8 {
    fn from(semester: Semester) -> Self {
        semester.number()
    }
}

/// Accepts the number or the name, case-insensitively
impl FromStr for Semester {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Semester::iter()
            .find(|sem| sem.number().to_string() == s || sem.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidPeriod::Semester(s.to_string()))
    }
}

impl Display for Semester {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Semester {} ({})", self.number(), self.name())
    }
}

/// A calendar year, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(u16);

impl Year {
    pub fn new(year: u16) -> Option<Self> {
        (year > 0).then_some(Self(year))
    }

    pub fn current() -> Year {
        Year(Utc::now().year().clamp(1, u16::MAX as i32) as u16)
    }

    /// The years a new instance can be scheduled for
    pub fn upcoming() -> Vec<Year> {
        let start = Self::current().0;
        (0..UPCOMING_YEARS)
            .filter_map(|offset| start.checked_add(offset))
            .map(Year)
            .collect()
    }
}

impl Deref for Year {
    type Target = u16;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<u16> for Year {
    type Error = InvalidPeriod;

    fn try_from(year: u16) -> Result<Self, Self::Error> {
        Year::new(year).ok_or_else(|| InvalidPeriod::Year(year.to_string()))
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl FromStr for Year {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let year: u16 = s.trim().parse()?;
        Year::try_from(year)
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A (year, semester) pair. Ordering is by year first, then semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    pub year: Year,
    pub semester: Semester,
}

impl Period {
    pub fn new(year: Year, semester: Semester) -> Self {
        Self { year, semester }
    }

    /// Human readable form, e.g. "Spring 2025"
    pub fn label(&self) -> String {
        format!("{} {}", self.semester.name(), self.year)
    }
}

/// Group key form, e.g. "2025-1"
impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}-{}", self.year, self.semester.number())
    }
}
