//! Status records tracked by the generated script, and a reader for its status file.
//!
//! The script writes `idx,status,command` rows and flips them in place with `sed`. Labels
//! and substitution patterns both come from [`Status`], so the emitter and the reader
//! cannot disagree on the row format.

use crate::error::StatusError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Header line of every status file.
pub const STATUS_HEADER: &str = "idx,status,command";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    #[serde(rename = "NOT STARTED")]
    NotStarted,
    #[serde(rename = "RUNNING")]
    Running,
    #[serde(rename = "DONE")]
    Done,
    #[serde(rename = "ERROR")]
    Error,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::NotStarted => "NOT STARTED",
            Status::Running => "RUNNING",
            Status::Done => "DONE",
            Status::Error => "ERROR",
        }
    }

    /// `sed` expression rewriting row `$idx` from `from` to `to`.
    pub fn substitution(from: Status, to: Status) -> String {
        format!("s|^$idx,{}|$idx,{}|g", from.label(), to.label())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT STARTED" => Ok(Status::NotStarted),
            "RUNNING" => Ok(Status::Running),
            "DONE" => Ok(Status::Done),
            "ERROR" => Ok(Status::Error),
            other => Err(StatusError::UnknownStatus(other.to_string())),
        }
    }
}

/// One row of a status file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
    pub index: usize,
    pub status: Status,
    pub command: String,
}

impl StatusRecord {
    /// Parse one row. The command is everything after the second comma.
    pub fn parse(line: &str, line_number: usize) -> Result<Self, StatusError> {
        let malformed = |reason: String| StatusError::MalformedRow {
            line: line_number,
            reason,
        };

        let mut parts = line.splitn(3, ',');
        let index = parts
            .next()
            .unwrap_or_default()
            .trim()
            .parse::<usize>()
            .map_err(|e| malformed(format!("bad index: {}", e)))?;
        let status = parts
            .next()
            .ok_or_else(|| malformed("missing status".to_string()))?
            .parse::<Status>()
            .map_err(|e| malformed(e.to_string()))?;
        let command = parts
            .next()
            .ok_or_else(|| malformed("missing command".to_string()))?
            .to_string();

        Ok(Self {
            index,
            status,
            command,
        })
    }
}

impl fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.index, self.status, self.command)
    }
}

/// Summary of a status file.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub rows: Vec<StatusRecord>,
    pub not_started: usize,
    pub running: usize,
    pub done: usize,
    pub error: usize,
    /// Index of the first `ERROR` row.
    pub failed_index: Option<usize>,
    /// Index to pass as the start index to resume; `None` once nothing is left to run.
    pub resume_index: Option<usize>,
}

impl StatusReport {
    pub fn from_csv(text: &str) -> Result<Self, StatusError> {
        let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

        let (_, header) = lines.next().ok_or(StatusError::MissingHeader)?;
        if header.trim() != STATUS_HEADER {
            return Err(StatusError::BadHeader(header.to_string()));
        }

        let rows = lines
            .map(|(i, line)| StatusRecord::parse(line, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_rows(rows))
    }

    pub fn from_rows(rows: Vec<StatusRecord>) -> Self {
        let count = |status: Status| rows.iter().filter(|r| r.status == status).count();
        let not_started = count(Status::NotStarted);
        let running = count(Status::Running);
        let done = count(Status::Done);
        let error = count(Status::Error);
        let failed_index = rows
            .iter()
            .find(|r| r.status == Status::Error)
            .map(|r| r.index);
        let resume_index = resume_point(&rows);

        Self {
            rows,
            not_started,
            running,
            done,
            error,
            failed_index,
            resume_index,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.resume_index.is_none()
    }
}

/// The first interrupted (`ERROR` or `RUNNING`) row, else the first `NOT STARTED` row
/// after the last finished one.
///
/// A run started with a non-zero start index leaves the rows before it `NOT STARTED`
/// in its own fresh status file, so those rows say nothing about whether work remains.
fn resume_point(rows: &[StatusRecord]) -> Option<usize> {
    if let Some(row) = rows
        .iter()
        .find(|r| matches!(r.status, Status::Error | Status::Running))
    {
        return Some(row.index);
    }

    let after_finished = rows
        .iter()
        .rposition(|r| r.status == Status::Done)
        .map_or(0, |position| position + 1);
    rows[after_finished..]
        .iter()
        .find(|r| r.status == Status::NotStarted)
        .map(|r| r.index)
}
