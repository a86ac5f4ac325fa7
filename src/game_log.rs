pub mod format;
pub mod parser;
pub mod retrosheet;
pub mod schedule;
pub mod schemas;
pub mod team;
pub mod traits;
