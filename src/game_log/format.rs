use std::path::Path;

use strum_macros::Display;

/// The two layouts a game log file can have. Chosen once per file from its name.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum GameLogFormat {
    Schedule,
    Retrosheet,
}

impl GameLogFormat {
    /// Any path mentioning "txt" is a Retrosheet game log; everything else is
    /// read as a schedule export.
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().to_lowercase().contains("txt") {
            Self::Retrosheet
        } else {
            Self::Schedule
        }
    }
}
