use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use lazy_regex::regex_captures;

use crate::game_log::schemas::{Decisions, GameSummary, REGULATION_INNINGS};
use crate::game_log::traits::{
    field, DoubleheaderStatus, FromGameLogRecord, GameLogRecord, Matchup, Side, Team,
};
use crate::util::{parse_attendance, parse_game_length, parse_int};

pub const SCHEDULE_MIN_FIELDS: usize = 19;
/// Column holding "@" for road games and nothing for home games.
pub const SIDE_COLUMN: usize = 4;

/// Reads the season out of a schedule file name such as `BOS-2021-schedule.csv`:
/// the second hyphen-delimited token of the last path segment.
pub fn season_from_path(path: &Path) -> Result<i32> {
    let file_name = path
        .file_name()
        .context("Schedule path has no file name")?
        .to_string_lossy();
    let token = file_name
        .split('-')
        .nth(1)
        .with_context(|| format!("Schedule file {file_name} is not named <team>-<year>..."))?;
    let year: String = token.chars().take_while(char::is_ascii_digit).collect();
    parse_int::<i32>(&year)
        .with_context(|| format!("Schedule file {file_name} carries no season year"))
}

/// A team's schedule line, from that team's point of view.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct ScheduleRow {
    pub date_text: String,
    pub team: Team,
    pub side: Side,
    pub opponent: Team,
    pub team_score: u16,
    pub opponent_score: u16,
    pub innings: Option<u8>,
    pub decisions: Decisions,
    pub game_length_minutes: u16,
    pub day_or_night: String,
    pub attendance: u32,
}

impl FromGameLogRecord for ScheduleRow {
    fn new(record: &GameLogRecord) -> Result<Self> {
        if record.len() < SCHEDULE_MIN_FIELDS {
            return Err(Self::error(
                &format!("Expected at least {SCHEDULE_MIN_FIELDS} columns"),
                record,
            ));
        }
        let f = |i: usize| field(record, i);
        let innings = match f(9)?.trim() {
            "" => None,
            i => Some(parse_int::<u8>(i).context("Bad innings value")?),
        };
        Ok(Self {
            date_text: f(1)?.to_string(),
            team: f(3)?.to_string(),
            side: Side::from_str(f(SIDE_COLUMN)?)
                .with_context(|| format!("Unexpected home/away marker {:?}", f(SIDE_COLUMN)))?,
            opponent: f(5)?.to_string(),
            team_score: parse_int(f(7)?).context("Bad team score")?,
            opponent_score: parse_int(f(8)?).context("Bad opponent score")?,
            innings,
            decisions: Decisions {
                winning_pitcher: f(13)?.to_string(),
                losing_pitcher: f(14)?.to_string(),
                save_pitcher: f(15)?.to_string(),
            },
            game_length_minutes: parse_game_length(f(16)?)?,
            day_or_night: f(17)?.to_string(),
            attendance: parse_attendance(f(18)?)?,
        })
    }
}

impl ScheduleRow {
    /// Splits `Thursday Apr 1` or `Saturday Jul 3 (2)` into a calendar date in
    /// the given season and the doubleheader game number. The weekday name
    /// must agree with the date.
    fn parse_date(&self, season: i32) -> Result<(NaiveDate, DoubleheaderStatus)> {
        let (_, day, game_number) = regex_captures!(
            r"^\s*([A-Za-z]+\s+[A-Za-z]+\s+\d{1,2})\s*(?:\((\d))?",
            &self.date_text
        )
        .with_context(|| format!("Unrecognized schedule date {:?}", self.date_text))?;
        let date = NaiveDate::parse_from_str(&format!("{day}, {season}"), "%A %b %d, %Y")
            .with_context(|| format!("Invalid schedule date {:?} in {season}", self.date_text))?;
        let status = match game_number {
            "" => DoubleheaderStatus::SingleGame,
            n => DoubleheaderStatus::from_str(n)
                .with_context(|| format!("Unexpected doubleheader game {n}"))?,
        };
        Ok((date, status))
    }

    pub fn to_summary(&self, season: i32) -> Result<GameSummary> {
        let (date, doubleheader_status) = self.parse_date(season)?;
        Ok(GameSummary {
            date_text: self.date_text.clone(),
            date,
            season,
            day_of_week: date.format("%a").to_string(),
            doubleheader_status,
            teams: Matchup::from_side(self.side, self.team.clone(), self.opponent.clone()),
            score: Matchup::from_side(self.side, self.team_score, self.opponent_score),
            innings: self.innings.unwrap_or(REGULATION_INNINGS),
            game_length_minutes: self.game_length_minutes,
            day_or_night: self.day_or_night.clone(),
            attendance: self.attendance,
            decisions: self.decisions.clone(),
        })
    }
}
