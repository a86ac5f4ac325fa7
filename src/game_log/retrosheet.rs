use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::game_log::schemas::{Decisions, GameSummary};
use crate::game_log::team::normalize_team;
use crate::game_log::traits::{
    field, DoubleheaderStatus, FromGameLogRecord, GameLogRecord, Matchup, Team,
};
use crate::util::{parse_attendance, parse_int, surname};

/// The save pitcher name is the last column we read.
pub const RETROSHEET_MIN_FIELDS: usize = 99;
const OUTS_PER_INNING: u16 = 6;

/// One line of a Retrosheet game log. Team codes are already normalized.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct RetrosheetRow {
    pub date_text: String,
    pub date: NaiveDate,
    pub doubleheader_status: DoubleheaderStatus,
    pub day_of_week: String,
    pub teams: Matchup<Team>,
    pub score: Matchup<u16>,
    pub outs: u16,
    pub day_or_night: String,
    pub attendance: u32,
    pub game_length_minutes: u16,
    pub decisions: Decisions,
}

impl FromGameLogRecord for RetrosheetRow {
    fn new(record: &GameLogRecord) -> Result<Self> {
        if record.len() < RETROSHEET_MIN_FIELDS {
            return Err(Self::error(
                &format!("Expected at least {RETROSHEET_MIN_FIELDS} columns"),
                record,
            ));
        }
        let f = |i: usize| field(record, i);
        let date_text = f(0)?.to_string();
        let date = NaiveDate::parse_from_str(&date_text, "%Y%m%d")
            .with_context(|| format!("Invalid game log date {date_text:?}"))?;
        Ok(Self {
            date,
            date_text,
            doubleheader_status: DoubleheaderStatus::from_str(f(1)?)
                .with_context(|| format!("Unexpected doubleheader game {:?}", f(1)))?,
            day_of_week: f(2)?.to_string(),
            teams: Matchup::new(normalize_team(f(3)?), normalize_team(f(6)?)),
            score: Matchup::new(
                parse_int(f(9)?).context("Bad visiting score")?,
                parse_int(f(10)?).context("Bad home score")?,
            ),
            outs: parse_int(f(11)?).context("Bad outs value")?,
            day_or_night: f(12)?.to_string(),
            attendance: parse_attendance(f(17)?)?,
            game_length_minutes: parse_int(f(18)?).context("Bad time of game")?,
            decisions: Decisions {
                winning_pitcher: surname(f(94)?),
                losing_pitcher: surname(f(96)?),
                save_pitcher: surname(f(98)?),
            },
        })
    }
}

impl RetrosheetRow {
    /// Full innings implied by the outs recorded, counting a partial inning
    /// as a whole one.
    pub fn innings(&self) -> Result<u8> {
        if self.outs == 0 {
            bail!("A game with no outs recorded was never played");
        }
        let innings = self.outs.div_ceil(OUTS_PER_INNING);
        u8::try_from(innings).with_context(|| format!("{} outs is not a plausible game", self.outs))
    }

    pub fn to_summary(&self) -> Result<GameSummary> {
        let calendar_day = self.date.weekday().to_string();
        if !calendar_day.eq_ignore_ascii_case(&self.day_of_week) {
            warn!(
                "Game on {} is marked {} but fell on a {}",
                self.date_text, self.day_of_week, calendar_day
            );
        }
        Ok(GameSummary {
            date_text: self.date_text.clone(),
            date: self.date,
            season: self.date.year(),
            day_of_week: self.day_of_week.clone(),
            doubleheader_status: self.doubleheader_status,
            teams: self.teams.clone(),
            score: self.score.clone(),
            innings: self.innings()?,
            game_length_minutes: self.game_length_minutes,
            day_or_night: self.day_or_night.clone(),
            attendance: self.attendance,
            decisions: self.decisions.clone(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::game_log::schemas::{Flag, GameRecord};

    pub(crate) fn retrosheet_record(
        date: &str,
        game_number: &str,
        away: &str,
        home: &str,
        outs: &str,
    ) -> GameLogRecord {
        let mut fields = vec![String::new(); 161];
        let mut set = |i: usize, v: &str| fields[i] = v.to_string();
        set(0, date);
        set(1, game_number);
        set(2, "Thu");
        set(3, away);
        set(4, "AL");
        set(6, home);
        set(7, "NL");
        set(9, "7");
        set(10, "4");
        set(11, outs);
        set(12, "N");
        set(16, "LOS03");
        set(17, "15,036");
        set(18, "196");
        set(93, "kersc001");
        set(94, "Clayton Kershaw");
        set(95, "colega01");
        set(96, "Jones,B W.Smith");
        set(97, "");
        set(98, "Smith,J (none)");
        GameLogRecord::from(fields)
    }

    fn innings_for(outs: &str) -> u8 {
        let record = retrosheet_record("20210401", "0", "SFN", "LAN", outs);
        RetrosheetRow::new(&record).unwrap().innings().unwrap()
    }

    #[test]
    fn innings_round_up_from_outs() {
        assert_eq!(innings_for("54"), 9);
        assert_eq!(innings_for("51"), 9);
        assert_eq!(innings_for("49"), 9);
        assert_eq!(innings_for("48"), 8);
        assert_eq!(innings_for("63"), 11);
    }

    #[test]
    fn parses_game_log_line() {
        let record = retrosheet_record("20210401", "0", "SFN", "LAN", "54");
        let game = GameRecord::from(RetrosheetRow::new(&record).unwrap().to_summary().unwrap());
        assert_eq!(game.game_id, "LAD202104010");
        assert_eq!(game.game_date, "20210401");
        assert_eq!(game.game_date_iso, NaiveDate::from_ymd_opt(2021, 4, 1).unwrap());
        assert_eq!(game.season, 2021);
        assert_eq!(game.day_of_week, "Thu");
        assert_eq!(game.home_team, "LAD");
        assert_eq!(game.home_team_score, 4);
        assert_eq!(game.away_team, "SFG");
        assert_eq!(game.away_team_score, 7);
        assert_eq!(game.innings, 9);
        assert_eq!(game.is_extra_innings, Flag::No);
        assert_eq!(game.game_length, "3:16");
        assert_eq!(game.game_length_minutes, 196);
        assert_eq!(game.day_or_night, "N");
        assert_eq!(game.attendance, 15036);
        assert_eq!(game.winning_pitcher, "Kershaw");
        assert_eq!(game.losing_pitcher, "W.Smith");
        assert_eq!(game.save_pitcher, "");
        assert_eq!(game.after_rule_change, Flag::Yes);
        assert_eq!(game.past_10th_inning, 0);
        assert_eq!(game.run_differential, 3);
    }

    #[test]
    fn doubleheader_game_past_seventh() {
        let record = retrosheet_record("20210401", "2", "BOS", "NYA", "48");
        let game = GameRecord::from(RetrosheetRow::new(&record).unwrap().to_summary().unwrap());
        assert_eq!(game.game_id, "NYY202104012");
        assert_eq!(game.innings, 8);
        assert_eq!(game.is_extra_innings, Flag::Yes);
    }

    #[test]
    fn older_seasons_predate_rule_change() {
        let record = retrosheet_record("20190404", "1", "BOS", "NYA", "48");
        let game = GameRecord::from(RetrosheetRow::new(&record).unwrap().to_summary().unwrap());
        assert_eq!(game.season, 2019);
        assert_eq!(game.after_rule_change, Flag::No);
        assert_eq!(game.is_extra_innings, Flag::No);

        let record = retrosheet_record("20190404", "0", "BOS", "NYA", "66");
        let game = GameRecord::from(RetrosheetRow::new(&record).unwrap().to_summary().unwrap());
        assert_eq!(game.innings, 11);
        assert_eq!(game.is_extra_innings, Flag::Yes);
        assert_eq!(game.past_10th_inning, 1);
    }

    #[test]
    fn blank_attendance_is_zero() {
        let mut fields: Vec<String> = retrosheet_record("20210401", "0", "SFN", "LAN", "54")
            .iter()
            .map(String::from)
            .collect();
        fields[17] = String::new();
        let row = RetrosheetRow::new(&GameLogRecord::from(fields)).unwrap();
        assert_eq!(row.attendance, 0);
    }

    #[test]
    fn short_or_bad_lines_fail() {
        let short = GameLogRecord::from(vec!["20210401", "0", "Thu", "SFN"]);
        let err = RetrosheetRow::new(&short).unwrap_err();
        assert!(err.to_string().contains("20210401,0,Thu,SFN"));

        let bad_outs = retrosheet_record("20210401", "0", "SFN", "LAN", "lots");
        assert!(RetrosheetRow::new(&bad_outs).is_err());

        let no_outs = retrosheet_record("20210401", "0", "SFN", "LAN", "0");
        let row = RetrosheetRow::new(&no_outs).unwrap();
        assert!(row.innings().is_err());
        assert!(row.to_summary().is_err());

        let bad_date = retrosheet_record("2021-04-01", "0", "SFN", "LAN", "54");
        assert!(RetrosheetRow::new(&bad_date).is_err());
    }
}
