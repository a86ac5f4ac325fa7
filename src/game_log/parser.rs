use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::{debug, error};

use crate::game_log::format::GameLogFormat;
use crate::game_log::retrosheet::RetrosheetRow;
use crate::game_log::schedule::{season_from_path, ScheduleRow, SIDE_COLUMN};
use crate::game_log::schemas::GameRecord;
use crate::game_log::traits::{field, raw_row, FromGameLogRecord, GameLogRecord};

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct FileInfo {
    pub filename: String,
    pub format: GameLogFormat,
    /// Schedule exports only carry the season in their file name.
    pub season: Option<i32>,
}

impl FileInfo {
    pub fn new(path: &Path) -> Result<Self> {
        let format = GameLogFormat::from_path(path);
        let season = match format {
            GameLogFormat::Schedule => Some(season_from_path(path)?),
            GameLogFormat::Retrosheet => None,
        };
        Ok(Self {
            filename: path.display().to_string(),
            format,
            season,
        })
    }
}

/// A source row in one of the two layouts, already split into typed fields.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum MappedRow {
    Schedule(ScheduleRow),
    Retrosheet(RetrosheetRow),
}

impl MappedRow {
    /// Maps a row according to the file's layout. Schedule files list every
    /// game twice, once per team, so only the home team's line is kept.
    pub fn new(record: &GameLogRecord, format: GameLogFormat) -> Result<Option<Self>> {
        Ok(match format {
            GameLogFormat::Retrosheet => Some(Self::Retrosheet(RetrosheetRow::new(record)?)),
            GameLogFormat::Schedule if record.len() <= 1 => None,
            GameLogFormat::Schedule if !field(record, SIDE_COLUMN)?.is_empty() => None,
            GameLogFormat::Schedule => Some(Self::Schedule(ScheduleRow::new(record)?)),
        })
    }

    pub fn to_game(&self, file_info: &FileInfo) -> Result<GameRecord> {
        let summary = match self {
            Self::Schedule(row) => {
                let season = file_info
                    .season
                    .with_context(|| format!("No season known for {}", file_info.filename))?;
                row.to_summary(season)?
            }
            Self::Retrosheet(row) => row.to_summary()?,
        };
        Ok(GameRecord::from(summary))
    }
}

/// Streams canonical game records out of one input file. The first line of
/// every file is skipped.
pub struct GameLogReader {
    reader: Reader<BufReader<File>>,
    current_record: StringRecord,
    pub file_info: FileInfo,
}

impl Iterator for GameLogReader {
    type Item = Result<GameRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_game().transpose()
    }
}

impl GameLogReader {
    pub fn new(path: &Path) -> Result<Self> {
        let file_info = FileInfo::new(path)?;
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));
        Ok(Self {
            reader,
            current_record: StringRecord::new(),
            file_info,
        })
    }

    fn next_game(&mut self) -> Result<Option<GameRecord>> {
        loop {
            let has_record = self
                .reader
                .read_record(&mut self.current_record)
                .with_context(|| format!("Failed to read {}", self.file_info.filename))?;
            if !has_record {
                return Ok(None);
            }
            match self.map_current_record() {
                Ok(Some(game)) => return Ok(Some(game)),
                Ok(None) => debug!(
                    "Skipping road game row in {}: {}",
                    self.file_info.filename,
                    raw_row(&self.current_record)
                ),
                Err(e) => {
                    let line = self
                        .current_record
                        .position()
                        .map(csv::Position::line)
                        .unwrap_or_default();
                    error!(
                        "Failed to parse line {} of {}: {}",
                        line,
                        self.file_info.filename,
                        raw_row(&self.current_record)
                    );
                    return Err(e.context(format!(
                        "Malformed row at {}:{}: {}",
                        self.file_info.filename,
                        line,
                        raw_row(&self.current_record)
                    )));
                }
            }
        }
    }

    fn map_current_record(&self) -> Result<Option<GameRecord>> {
        MappedRow::new(&self.current_record, self.file_info.format)?
            .map(|row| row.to_game(&self.file_info))
            .transpose()
    }
}
