use chrono::NaiveDate;
use serde::Serialize;

use crate::game_log::traits::{DoubleheaderStatus, Matchup, Pitcher, Team};
use crate::util::format_game_length;

/// First season played under the extra-innings and seven-inning doubleheader rules.
pub const RULE_CHANGE_SEASON: i32 = 2020;
pub const REGULATION_INNINGS: u8 = 9;
pub const SHORTENED_DOUBLEHEADER_INNINGS: u8 = 7;

pub const GAME_RECORD_HEADER: [&str; 21] = [
    "game_id",
    "game_date",
    "game_date_iso",
    "season",
    "day_of_week",
    "home_team",
    "home_team_score",
    "away_team",
    "away_team_score",
    "innings",
    "is_extra_innings",
    "game_length",
    "game_length_minutes",
    "day_or_night",
    "attendance",
    "winning_pitcher",
    "losing_pitcher",
    "save_pitcher",
    "after_rule_change",
    "past_10th_inning",
    "run_differential",
];

#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize)]
pub enum Flag {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        if b {
            Self::Yes
        } else {
            Self::No
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct Decisions {
    pub winning_pitcher: Pitcher,
    pub losing_pitcher: Pitcher,
    pub save_pitcher: Pitcher,
}

/// Everything either source tells us about a game, before any derived
/// columns are computed.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct GameSummary {
    /// The date exactly as written in the source row.
    pub date_text: String,
    pub date: NaiveDate,
    pub season: i32,
    pub day_of_week: String,
    pub doubleheader_status: DoubleheaderStatus,
    pub teams: Matchup<Team>,
    pub score: Matchup<u16>,
    pub innings: u8,
    pub game_length_minutes: u16,
    pub day_or_night: String,
    pub attendance: u32,
    pub decisions: Decisions,
}

impl GameSummary {
    pub fn game_id(&self) -> String {
        format!(
            "{}{}{}",
            self.teams.home,
            self.date.format("%Y%m%d"),
            self.doubleheader_status
        )
    }

    /// Extra innings start after the ninth, or after the seventh in a
    /// doubleheader once the shortened-doubleheader rule applies.
    pub fn is_extra_innings(&self) -> bool {
        self.innings > REGULATION_INNINGS
            || (self.is_after_rule_change()
                && self.doubleheader_status.is_doubleheader()
                && self.innings > SHORTENED_DOUBLEHEADER_INNINGS)
    }

    pub const fn is_after_rule_change(&self) -> bool {
        self.season >= RULE_CHANGE_SEASON
    }

    pub const fn run_differential(&self) -> u16 {
        self.score.home.abs_diff(self.score.away)
    }
}

/// One game, seen from the home team, in output column order.
#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: String,
    pub game_date: String,
    pub game_date_iso: NaiveDate,
    pub season: i32,
    pub day_of_week: String,
    pub home_team: Team,
    pub home_team_score: u16,
    pub away_team: Team,
    pub away_team_score: u16,
    pub innings: u8,
    pub is_extra_innings: Flag,
    pub game_length: String,
    pub game_length_minutes: u16,
    pub day_or_night: String,
    pub attendance: u32,
    pub winning_pitcher: Pitcher,
    pub losing_pitcher: Pitcher,
    pub save_pitcher: Pitcher,
    pub after_rule_change: Flag,
    pub past_10th_inning: u8,
    pub run_differential: u16,
}

impl From<GameSummary> for GameRecord {
    fn from(summary: GameSummary) -> Self {
        let game_id = summary.game_id();
        let is_extra_innings = summary.is_extra_innings().into();
        let after_rule_change = summary.is_after_rule_change().into();
        let run_differential = summary.run_differential();
        Self {
            game_id,
            game_date: summary.date_text,
            game_date_iso: summary.date,
            season: summary.season,
            day_of_week: summary.day_of_week,
            home_team: summary.teams.home,
            home_team_score: summary.score.home,
            away_team: summary.teams.away,
            away_team_score: summary.score.away,
            innings: summary.innings,
            is_extra_innings,
            game_length: format_game_length(summary.game_length_minutes),
            game_length_minutes: summary.game_length_minutes,
            day_or_night: summary.day_or_night,
            attendance: summary.attendance,
            winning_pitcher: summary.decisions.winning_pitcher,
            losing_pitcher: summary.decisions.losing_pitcher,
            save_pitcher: summary.decisions.save_pitcher,
            after_rule_change,
            past_10th_inning: u8::from(summary.innings > REGULATION_INNINGS + 1),
            run_differential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(season: i32, status: DoubleheaderStatus, innings: u8) -> GameSummary {
        let date = NaiveDate::from_ymd_opt(season, 7, 3).unwrap();
        GameSummary {
            date_text: date.format("%Y%m%d").to_string(),
            date,
            season,
            day_of_week: date.format("%a").to_string(),
            doubleheader_status: status,
            teams: Matchup::new("NYY".to_string(), "BOS".to_string()),
            score: Matchup::new(3, 5),
            innings,
            game_length_minutes: 185,
            day_or_night: "N".to_string(),
            attendance: 31_000,
            decisions: Decisions::default(),
        }
    }

    #[test]
    fn derived_columns() {
        let record = GameRecord::from(summary(2021, DoubleheaderStatus::SingleGame, 9));
        assert_eq!(record.game_id, "BOS202107030");
        assert_eq!(record.home_team, "BOS");
        assert_eq!(record.away_team, "NYY");
        assert_eq!(record.run_differential, 2);
        assert_eq!(record.game_length, "3:05");
        assert_eq!(record.after_rule_change, Flag::Yes);
        assert_eq!(record.is_extra_innings, Flag::No);
        assert_eq!(record.past_10th_inning, 0);
        assert_eq!(record.day_of_week, "Sat");
    }

    #[test]
    fn run_differential_is_absolute() {
        let mut s = summary(2019, DoubleheaderStatus::SingleGame, 9);
        s.score = Matchup::new(11, 2);
        assert_eq!(GameRecord::from(s).run_differential, 9);
    }

    #[test]
    fn shortened_doubleheaders_after_rule_change() {
        let game_two = DoubleheaderStatus::DoubleHeaderGame2;
        let eight = GameRecord::from(summary(2021, game_two, 8));
        assert_eq!(eight.is_extra_innings, Flag::Yes);
        assert!(eight.game_id.ends_with('2'));

        let seven = GameRecord::from(summary(2021, game_two, 7));
        assert_eq!(seven.is_extra_innings, Flag::No);

        let before = GameRecord::from(summary(2019, game_two, 8));
        assert_eq!(before.is_extra_innings, Flag::No);
        assert_eq!(before.after_rule_change, Flag::No);

        let long_before = GameRecord::from(summary(2019, game_two, 10));
        assert_eq!(long_before.is_extra_innings, Flag::Yes);
    }

    #[test]
    fn single_games_need_a_tenth_inning() {
        let single = DoubleheaderStatus::SingleGame;
        assert_eq!(GameRecord::from(summary(2021, single, 8)).is_extra_innings, Flag::No);
        assert_eq!(GameRecord::from(summary(2021, single, 10)).is_extra_innings, Flag::Yes);
    }

    #[test]
    fn past_tenth_means_eleven_or_more() {
        let single = DoubleheaderStatus::SingleGame;
        assert_eq!(GameRecord::from(summary(2021, single, 10)).past_10th_inning, 0);
        assert_eq!(GameRecord::from(summary(2021, single, 11)).past_10th_inning, 1);
    }

    #[test]
    fn serializes_in_header_order() {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(vec![]);
        writer
            .serialize(GameRecord::from(summary(2021, DoubleheaderStatus::DoubleHeaderGame1, 8)))
            .unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next().unwrap(), GAME_RECORD_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "BOS202107031,20210703,2021-07-03,2021,Sat,BOS,5,NYY,3,8,Y,3:05,185,N,31000,,,,Y,0,2"
        );
    }
}
