use anyhow::{anyhow, Context, Error, Result};
use csv::StringRecord;
use itertools::Itertools;
use strum_macros::{Display, EnumString};

pub type GameLogRecord = StringRecord;

pub type Team = String;
pub type Pitcher = String;

pub trait FromGameLogRecord {
    fn new(record: &GameLogRecord) -> Result<Self>
    where
        Self: Sized;

    fn error(msg: &str, record: &GameLogRecord) -> Error {
        anyhow!("{}\nRecord: {}", msg, raw_row(record))
    }
}

/// The row as it appeared in the source file, for diagnostics.
pub fn raw_row(record: &GameLogRecord) -> String {
    record.iter().join(",")
}

pub fn field(record: &GameLogRecord, index: usize) -> Result<&str> {
    record
        .get(index)
        .with_context(|| format!("Missing column {index} (row has {})", record.len()))
}

/// Which side the listed team played on. Schedule rows mark road games with "@".
#[derive(Debug, Eq, PartialEq, EnumString, Display, Hash, Copy, Clone)]
pub enum Side {
    #[strum(serialize = "@")]
    Away,
    #[strum(serialize = "")]
    Home,
}

#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct Matchup<T> {
    pub away: T,
    pub home: T,
}

impl<T> Matchup<T> {
    pub const fn new(away: T, home: T) -> Self {
        Self { away, home }
    }

    /// Orders a (team, opponent) pair given the side the team played on.
    pub fn from_side(side: Side, team: T, opponent: T) -> Self {
        match side {
            Side::Away => Self::new(team, opponent),
            Side::Home => Self::new(opponent, team),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, EnumString, Display, Copy, Clone, Default)]
pub enum DoubleheaderStatus {
    #[default]
    #[strum(serialize = "0")]
    SingleGame,
    #[strum(serialize = "1")]
    DoubleHeaderGame1,
    #[strum(serialize = "2")]
    DoubleHeaderGame2,
    #[strum(serialize = "3")]
    DoubleHeaderGame3,
    #[strum(serialize = "4")]
    DoubleHeaderGame4,
}

impl DoubleheaderStatus {
    pub fn is_doubleheader(self) -> bool {
        self != Self::SingleGame
    }
}
