//! Guest import: duplicate detection and roster lines

pub mod duplicates;
pub mod roster;

pub use duplicates::{
    DuplicateKind, DuplicateWarning, NEAR_DUPLICATE_THRESHOLD, find_duplicates, levenshtein, similarity,
};
pub use roster::{
    DuplicatePolicy, ImportLineError, ImportReport, RejectedLine, RosterLine, TableRequest, import_roster,
    parse_line,
};
