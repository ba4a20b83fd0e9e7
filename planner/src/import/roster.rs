//! Roster import
//!
//! Turns raw name lines into guests. A trailing `@<n>` asks for table number
//! `n`; a full or unknown table leaves the guest unassigned and is reported.
//! Bad lines are rejected one by one, the rest of the batch continues.

use super::duplicates::{DuplicateKind, DuplicateWarning, find_duplicates};
use crate::model::{SeatingError, SeatingModel};
use serde::{Deserialize, Serialize};
use shared::error::ErrorCode;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

/// Why a single import line was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportLineError {
    #[error("Missing guest name")]
    MissingName,

    #[error("Invalid table shorthand: {0:?}")]
    InvalidTableShorthand(String),

    #[error(transparent)]
    Seating(#[from] SeatingError),
}

impl ImportLineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ImportLineError::MissingName => ErrorCode::ImportLineInvalid,
            ImportLineError::InvalidTableShorthand(_) => ErrorCode::TableShorthandInvalid,
            ImportLineError::Seating(e) => e.code(),
        }
    }
}

/// A line that parsed into a name plus an optional table number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLine {
    pub name: String,
    pub table: Option<u32>,
}

/// What to do with names flagged by duplicate detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Import everything, warnings are informational
    #[default]
    Allow,
    /// Skip exact matches, import near matches
    SkipExact,
    /// Skip every flagged name
    SkipAll,
}

impl DuplicatePolicy {
    fn skips(&self, kind: DuplicateKind) -> bool {
        match self {
            DuplicatePolicy::Allow => false,
            DuplicatePolicy::SkipExact => kind == DuplicateKind::Exact,
            DuplicatePolicy::SkipAll => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedLine {
    /// 1-based line number in the input
    pub line: usize,
    pub text: String,
    pub reason: String,
    pub code: ErrorCode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRequest {
    pub guest_id: i64,
    pub name: String,
    pub table_number: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    /// Ids of created guests, in input order
    pub added: Vec<i64>,
    /// Created but left unassigned because the table was full
    pub table_full: Vec<TableRequest>,
    /// Created but left unassigned because no table has that number
    pub unknown_tables: Vec<TableRequest>,
    pub rejected: Vec<RejectedLine>,
    pub duplicates: Vec<DuplicateWarning>,
    /// Names not imported because of the duplicate policy
    pub skipped: Vec<String>,
}

/// Parse one line; `Ok(None)` for blank lines
pub fn parse_line(line: &str) -> Result<Option<RosterLine>, ImportLineError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, table) = match line.rsplit_once('@') {
        Some((name, suffix)) => {
            let suffix = suffix.trim();
            let number = suffix
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ImportLineError::InvalidTableShorthand(format!("@{suffix}")))?;
            (name.trim(), Some(number))
        }
        None => (line, None),
    };

    if name.is_empty() {
        return Err(ImportLineError::MissingName);
    }
    Ok(Some(RosterLine {
        name: name.to_string(),
        table,
    }))
}

/// Import raw name lines into the model
pub fn import_roster<I, S>(model: &mut SeatingModel, lines: I, policy: DuplicatePolicy) -> ImportReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = ImportReport::default();
    let mut parsed = Vec::new();

    for (idx, raw) in lines.into_iter().enumerate() {
        let raw = raw.as_ref();
        match parse_line(raw) {
            Ok(Some(entry)) => parsed.push((idx + 1, entry)),
            Ok(None) => {}
            Err(e) => {
                warn!(line = idx + 1, error = %e, "Rejected import line");
                report.rejected.push(RejectedLine {
                    line: idx + 1,
                    text: raw.to_string(),
                    reason: e.to_string(),
                    code: e.code(),
                });
            }
        }
    }

    let names: Vec<&str> = parsed.iter().map(|(_, p)| p.name.as_str()).collect();
    let existing: Vec<&str> = model.guests().iter().map(|g| g.name.as_str()).collect();
    report.duplicates = find_duplicates(&names, &existing);
    // Later copies of a name are exact duplicates of its first copy
    let flagged: HashMap<usize, DuplicateKind> = report
        .duplicates
        .iter()
        .flat_map(|w| {
            std::iter::once((w.index, w.kind))
                .chain(w.repeated_at.iter().map(|&i| (i, DuplicateKind::Exact)))
        })
        .collect();

    for (idx, (line, entry)) in parsed.into_iter().enumerate() {
        if let Some(kind) = flagged.get(&idx)
            && policy.skips(*kind)
        {
            report.skipped.push(entry.name);
            continue;
        }

        let added = match model.add_guest(&entry.name, entry.table) {
            Ok(added) => added,
            Err(e) => {
                let e = ImportLineError::from(e);
                warn!(line, error = %e, "Rejected import line");
                report.rejected.push(RejectedLine {
                    line,
                    text: entry.name,
                    reason: e.to_string(),
                    code: e.code(),
                });
                continue;
            }
        };

        let guest_id = added.guest.id;
        report.added.push(guest_id);
        let request = |table_number| TableRequest {
            guest_id,
            name: entry.name.clone(),
            table_number,
        };
        match added.table_refusal {
            Some(SeatingError::CapacityExceeded { table_number, .. }) => {
                report.table_full.push(request(table_number))
            }
            Some(SeatingError::TableNumberNotFound(number)) => {
                report.unknown_tables.push(request(number))
            }
            _ => {}
        }
    }

    info!(
        added = report.added.len(),
        rejected = report.rejected.len(),
        duplicates = report.duplicates.len(),
        skipped = report.skipped.len(),
        table_full = report.table_full.len(),
        unknown_tables = report.unknown_tables.len(),
        "Roster imported"
    );
    report
}
