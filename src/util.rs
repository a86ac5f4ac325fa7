use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use num_traits::PrimInt;

const NONE_STRINGS: [&str; 1] = ["(none)"];

pub(crate) fn parse_int<T: PrimInt + FromStr>(int_str: &str) -> Result<T> {
    int_str
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow!("Expected an integer, found {:?}", int_str))
}

/// Blank attendance means unknown and is reported as zero.
pub(crate) fn parse_attendance(attendance_str: &str) -> Result<u32> {
    let digits = attendance_str.trim().replace(',', "");
    if digits.is_empty() {
        return Ok(0);
    }
    parse_int::<u32>(&digits).context("Bad attendance value")
}

/// Parses an `H:MM` duration into total minutes.
pub(crate) fn parse_game_length(length_str: &str) -> Result<u16> {
    let (hours, minutes) = length_str
        .split_once(':')
        .with_context(|| format!("Game length {length_str:?} is not in H:MM form"))?;
    let hours = parse_int::<u16>(hours)?;
    let minutes = parse_int::<u16>(minutes)?;
    if minutes >= 60 {
        bail!("Game length {length_str:?} has more than 59 minutes");
    }
    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .with_context(|| format!("Game length {length_str:?} is too long"))
}

pub(crate) fn format_game_length(minutes: u16) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Last space-delimited token of a name field, with the no-decision
/// placeholder removed.
pub(crate) fn surname(name_str: &str) -> String {
    let last = name_str.rsplit(' ').next().unwrap_or_default();
    NONE_STRINGS
        .iter()
        .fold(last.to_string(), |s, none| s.replace(none, ""))
}
