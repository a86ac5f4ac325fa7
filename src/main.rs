#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions)]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use csv::{Writer, WriterBuilder};
use glob::GlobError;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::game_log::parser::GameLogReader;
use crate::game_log::schemas::{GameRecord, GAME_RECORD_HEADER};

mod game_log;
mod util;

const ABOUT: &str =
    "Normalizes schedule exports and Retrosheet game logs into a single game-level CSV.";

#[derive(Parser, Debug)]
#[command(name = "gamelog", about = ABOUT)]
struct Opt {
    /// Directory holding schedule exports and Retrosheet game logs
    #[arg(short, long, default_value = "mlb-data-game-level")]
    input: PathBuf,

    /// CSV file to create or overwrite
    #[arg(short, long, default_value = "mlb-data-game-level.csv")]
    output: PathBuf,
}

struct GameLogWriter {
    csv: Writer<File>,
    games_written: usize,
}

impl GameLogWriter {
    /// Creates the output file and writes the header, so an empty run still
    /// yields a valid table.
    pub fn new(output_path: &Path) -> Result<Self> {
        debug!("Creating file {}", output_path.display());
        let mut csv = WriterBuilder::new()
            .has_headers(false)
            .from_path(output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        csv.write_record(GAME_RECORD_HEADER)?;
        Ok(Self {
            csv,
            games_written: 0,
        })
    }

    pub fn write(&mut self, game: &GameRecord) -> Result<()> {
        self.csv.serialize(game).context("Failed to write game")?;
        self.games_written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.csv.flush().context("Failed to flush output")?;
        Ok(self.games_written)
    }
}

struct FileProcessor {
    opt: Opt,
}

impl FileProcessor {
    pub const fn new(opt: Opt) -> Self {
        Self { opt }
    }

    /// Regular files directly under the input directory, in glob order.
    fn input_files(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.opt.input.join("*");
        let pattern = pattern
            .to_str()
            .context("Input directory is not valid UTF-8")?;
        let files = glob::glob(pattern)
            .context("Bad input directory pattern")?
            .collect::<Result<Vec<PathBuf>, GlobError>>()?;
        Ok(files.into_iter().filter(|f| f.is_file()).collect())
    }

    fn process_file(writer: &mut GameLogWriter, input_path: &Path) -> Result<usize> {
        let reader = GameLogReader::new(input_path)?;
        let format = reader.file_info.format;
        debug!("Processing {} file {}", format, reader.file_info.filename);
        let mut games = 0;
        for game in reader {
            writer.write(&game?)?;
            games += 1;
        }
        info!("Wrote {} games from {}", games, input_path.display());
        Ok(games)
    }

    pub fn process_files(&self) -> Result<usize> {
        if !self.opt.input.is_dir() {
            anyhow::bail!("Input directory {} does not exist", self.opt.input.display());
        }
        let files = self.input_files()?;
        info!(
            "Found {} files in {}",
            files.len(),
            self.opt.input.display()
        );
        let mut writer = GameLogWriter::new(&self.opt.output)?;
        for file in &files {
            Self::process_file(&mut writer, file)
                .with_context(|| format!("Error occurred while processing {}", file.display()))?;
        }
        writer.finish()
    }
}

#[allow(clippy::expect_used)]
fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to initialize trace");

    let start = Instant::now();
    let opt: Opt = Opt::parse();
    let output = opt.output.clone();

    let games = FileProcessor::new(opt).process_files()?;

    info!("Wrote {} games to {}", games, output.display());
    info!("Elapsed: {:?}", start.elapsed());
    Ok(())
}
