use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::game_log::traits::Team;

lazy_static! {
    /// Retrosheet franchise codes that differ from the common ones.
    static ref TEAM_ABBREVIATIONS: HashMap<&'static str, &'static str> = HashMap::from([
        ("LAN", "LAD"),
        ("ANA", "LAA"),
        ("CHN", "CHC"),
        ("CHA", "CHW"),
        ("NYN", "NYM"),
        ("NYA", "NYY"),
        ("SFN", "SFG"),
        ("WAS", "WSN"),
        ("KCA", "KCR"),
        ("SDN", "SDP"),
        ("SLN", "STL"),
        ("TBA", "TBR"),
    ]);
}

/// Maps a team code to its common form. Lookup ignores case; unmapped codes
/// come back exactly as given.
pub fn normalize_team(abbreviation: &str) -> Team {
    TEAM_ABBREVIATIONS
        .get(abbreviation.to_ascii_uppercase().as_str())
        .map_or_else(|| abbreviation.to_string(), |t| (*t).to_string())
}
