//! CSV input: `EmpID, ProjectID, DateFrom, DateTo` rows into [`Assignment`]s.
//!
//! Parsing is forgiving per row and strict per file. A row that cannot be
//! understood is skipped and reported (see [`SkipReason`]); only input with
//! no content at all is rejected.
//!
//! Rows are decoded one at a time, so a stray non-UTF-8 byte costs only the
//! row it sits in.
//!
//! Dates are tried against an ordered list of `chrono` format strings and
//! the first match wins, so ambiguous inputs such as `03/04/2024` resolve to
//! whichever format is listed first (month-first by default). Years must have
//! four digits; `1/5/24` is rejected rather than read as year 24.
//!
//! An empty `DateTo` cell is treated like an open marker: the row counts as
//! ongoing rather than being skipped.

use std::fmt;
use std::io::Read;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ErrorCode;
use crate::model::{Assignment, EmployeeId, EndDate, ProjectId};
use crate::observer::{Diagnostic, Observer};

/// Accepted date layouts, tried in order.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%m-%d-%Y",
    "%Y/%m/%d",
    "%Y%m%d",
    "%d.%m.%Y",
];

/// End-date tokens meaning "still on the project" (compared case-insensitively).
pub const DEFAULT_OPEN_MARKERS: &[&str] = &["NULL"];

const FIELD_COUNT: usize = 4;

/// Smallest year a four-digit `%Y` can produce. `chrono` also accepts
/// shorter year tokens, which would otherwise land in the first century.
const MIN_YEAR: i32 = 1000;

/// Parser settings. Usually built from [`crate::config::InputConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Skip the first row.
    pub has_header: bool,
    pub date_formats: Vec<String>,
    pub open_markers: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(ToString::to_string).collect(),
            open_markers: DEFAULT_OPEN_MARKERS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ParseOptions {
    fn is_open_marker(&self, token: &str) -> bool {
        token.is_empty()
            || self
                .open_markers
                .iter()
                .any(|marker| marker.eq_ignore_ascii_case(token))
    }
}

/// Why a row was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    InsufficientColumns { found: usize },
    InvalidEmployeeId { value: String },
    InvalidProjectId { value: String },
    UnsupportedDate { value: String },
    InvalidEncoding,
}

impl SkipReason {
    /// Short rows are routine (trailing separators, notes); the rest suggest
    /// bad data.
    #[must_use]
    pub const fn is_routine(&self) -> bool {
        matches!(self, Self::InsufficientColumns { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientColumns { found } => {
                write!(f, "insufficient data: {found} of {FIELD_COUNT} columns")
            }
            Self::InvalidEmployeeId { value } => write!(f, "invalid employee id '{value}'"),
            Self::InvalidProjectId { value } => write!(f, "invalid project id '{value}'"),
            Self::UnsupportedDate { value } => write!(f, "unsupported date format '{value}'"),
            Self::InvalidEncoding => write!(f, "invalid UTF-8 in row"),
        }
    }
}

/// A dropped row and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the input.
    pub line: u64,
    pub reason: SkipReason,
}

/// Result of parsing one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedInput {
    pub assignments: Vec<Assignment>,
    pub skipped: Vec<SkippedRow>,
}

/// Whole-input failures.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("input must not be empty")]
    EmptyInput,

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV at line {line}: {message}")]
    Csv { line: u64, message: String },
}

impl ParseError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyInput => ErrorCode::EmptyInput,
            Self::Io(_) => ErrorCode::InputUnreadable,
            Self::Csv { .. } => ErrorCode::MalformedInput,
        }
    }
}

/// Parse a date against `formats`, first match wins.
///
/// Dates before year 1000 are rejected, which keeps two-digit years out.
#[must_use]
pub fn parse_date<S: AsRef<str>>(raw: &str, formats: &[S]) -> Option<NaiveDate> {
    let token = raw.trim();
    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(token, fmt.as_ref())
            .ok()
            .filter(|date| date.year() >= MIN_YEAR)
    })
}

/// Parse CSV text already in memory.
///
/// # Errors
///
/// Returns [`ParseError::EmptyInput`] for blank input and
/// [`ParseError::Csv`] if the reader cannot split a record.
pub fn parse_str(
    input: &str,
    options: &ParseOptions,
    observer: &dyn Observer,
) -> Result<ParsedInput, ParseError> {
    parse_bytes(input.as_bytes(), options, observer)
}

/// Parse raw CSV bytes. Rows that are not valid UTF-8 are skipped with
/// [`SkipReason::InvalidEncoding`].
///
/// # Errors
///
/// Returns [`ParseError::EmptyInput`] for blank input and
/// [`ParseError::Csv`] if the reader cannot split a record.
pub fn parse_bytes(
    input: &[u8],
    options: &ParseOptions,
    observer: &dyn Observer,
) -> Result<ParsedInput, ParseError> {
    if input.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::EmptyInput);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut parsed = ParsedInput::default();
    for result in reader.byte_records() {
        let record = result.map_err(|err| ParseError::Csv {
            line: err.position().map_or(0, csv::Position::line),
            message: err.to_string(),
        })?;
        let line = record.position().map_or(0, csv::Position::line);

        let outcome = csv::StringRecord::from_byte_record(record)
            .map_err(|_| SkipReason::InvalidEncoding)
            .and_then(|record| parse_record(&record, options));

        match outcome {
            Ok(assignment) => parsed.assignments.push(assignment),
            Err(reason) => {
                observer.notify(Diagnostic::RowSkipped {
                    line,
                    reason: reason.clone(),
                });
                parsed.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    if !parsed.assignments.is_empty() {
        observer.notify(Diagnostic::RowsParsed {
            count: parsed.assignments.len(),
        });
    }
    Ok(parsed)
}

/// Read all of `reader` and parse it.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if `reader` fails, otherwise the same errors
/// as [`parse_bytes`].
#[instrument(skip_all)]
pub fn parse_assignments<R: Read>(
    mut reader: R,
    options: &ParseOptions,
    observer: &dyn Observer,
) -> Result<ParsedInput, ParseError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    parse_bytes(&input, options, observer)
}

fn parse_record(record: &csv::StringRecord, options: &ParseOptions) -> Result<Assignment, SkipReason> {
    if record.len() < FIELD_COUNT {
        return Err(SkipReason::InsufficientColumns {
            found: record.len(),
        });
    }

    let employee_raw = &record[0];
    let employee = employee_raw
        .parse::<u32>()
        .ok()
        .filter(|&id| id > 0)
        .map(EmployeeId)
        .ok_or_else(|| SkipReason::InvalidEmployeeId {
            value: employee_raw.to_string(),
        })?;

    let project = ProjectId::parse(&record[1]).ok_or_else(|| SkipReason::InvalidProjectId {
        value: record[1].to_string(),
    })?;

    let start = date_field(&record[2], options)?;
    let end = if options.is_open_marker(&record[3]) {
        EndDate::Open
    } else {
        EndDate::On(date_field(&record[3], options)?)
    };

    Ok(Assignment {
        employee,
        project,
        start,
        end,
    })
}

fn date_field(raw: &str, options: &ParseOptions) -> Result<NaiveDate, SkipReason> {
    parse_date(raw, &options.date_formats).ok_or_else(|| SkipReason::UnsupportedDate {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{NullObserver, Recorder};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_date_accepts_every_default_layout() {
        let formats = DEFAULT_DATE_FORMATS;
        let expected = day(2024, 1, 5);
        for raw in [
            "2024-01-05",
            "01/05/2024",
            "1/5/2024",
            "05-01-2024",
            "2024/01/05",
            "20240105",
            "05.01.2024",
        ] {
            assert_eq!(parse_date(raw, formats), Some(expected), "{raw}");
        }
    }

    #[test]
    fn two_digit_years_are_rejected() {
        assert_eq!(parse_date("1/5/24", DEFAULT_DATE_FORMATS), None);
        assert_eq!(parse_date("24-01-05", DEFAULT_DATE_FORMATS), None);
        assert_eq!(parse_date("0999-12-31", DEFAULT_DATE_FORMATS), None);
        assert_eq!(parse_date("1000-01-01", DEFAULT_DATE_FORMATS), Some(day(1000, 1, 1)));
    }

    #[test]
    fn day_first_slash_dates_fall_through_when_month_first_is_impossible() {
        assert_eq!(parse_date("25/12/2023", DEFAULT_DATE_FORMATS), Some(day(2023, 12, 25)));
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert_eq!(parse_date("yesterday", DEFAULT_DATE_FORMATS), None);
        assert_eq!(parse_date("2024-02-30", DEFAULT_DATE_FORMATS), None);
    }

    #[test]
    fn header_is_skipped_and_null_means_open() {
        let input = "EmpID, ProjectID, DateFrom, DateTo\n\
                     143, 12, 2013-11-01, 2014-01-05\n\
                     218, 10, 2012-05-16, NULL\n\
                     143, 10, 2009-01-01, null\n";
        let parsed = parse_str(input, &ParseOptions::default(), &NullObserver).unwrap();

        assert!(parsed.skipped.is_empty());
        assert_eq!(parsed.assignments.len(), 3);
        assert_eq!(parsed.assignments[0].employee, EmployeeId(143));
        assert_eq!(parsed.assignments[0].project, ProjectId::Numeric(12));
        assert_eq!(parsed.assignments[0].end, EndDate::On(day(2014, 1, 5)));
        assert_eq!(parsed.assignments[1].end, EndDate::Open);
        assert_eq!(parsed.assignments[2].end, EndDate::Open);
    }

    #[test]
    fn bad_rows_are_skipped_with_line_numbers() {
        let input = "EmpID,ProjectID,DateFrom,DateTo\n\
                     1,10,2024-01-01,2024-01-10\n\
                     2,10\n\
                     abc,10,2024-01-01,2024-01-10\n\
                     3,10,someday,2024-01-10\n\
                     0,10,2024-01-01,2024-01-10\n\
                     4,apollo,2024-01-01,\n";
        let recorder = Recorder::new();
        let parsed = parse_str(input, &ParseOptions::default(), &recorder).unwrap();

        assert_eq!(parsed.assignments.len(), 2);
        assert_eq!(parsed.assignments[1].project, ProjectId::Named("apollo".into()));
        assert_eq!(parsed.assignments[1].end, EndDate::Open);

        let lines: Vec<u64> = parsed.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
        assert_eq!(
            parsed.skipped[0].reason,
            SkipReason::InsufficientColumns { found: 2 }
        );
        assert!(parsed.skipped[0].reason.is_routine());
        assert_eq!(
            parsed.skipped[2].reason,
            SkipReason::UnsupportedDate {
                value: "someday".into()
            }
        );

        let seen = recorder.take();
        assert_eq!(seen.len(), 5);
        assert_eq!(seen.last(), Some(&Diagnostic::RowsParsed { count: 2 }));
    }

    #[test]
    fn without_header_the_first_row_is_data() {
        let options = ParseOptions {
            has_header: false,
            ..ParseOptions::default()
        };
        let parsed = parse_str("1,1,2024-01-01,2024-01-02\n", &options, &NullObserver).unwrap();
        assert_eq!(parsed.assignments.len(), 1);
    }

    #[test]
    fn custom_open_marker() {
        let options = ParseOptions {
            open_markers: vec!["ongoing".into()],
            ..ParseOptions::default()
        };
        let parsed = parse_str(
            "h\n1,1,2024-01-01,Ongoing\n2,1,2024-01-01,NULL\n",
            &options,
            &NullObserver,
        )
        .unwrap();
        assert_eq!(parsed.assignments.len(), 1);
        assert_eq!(parsed.skipped.len(), 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = parse_str("  \n\n", &ParseOptions::default(), &NullObserver).unwrap_err();
        assert!(matches!(err, ParseError::EmptyInput));
        assert_eq!(err.code(), ErrorCode::EmptyInput);
    }

    #[test]
    fn header_only_input_parses_to_nothing() {
        let parsed = parse_str(
            "EmpID,ProjectID,DateFrom,DateTo\n",
            &ParseOptions::default(),
            &NullObserver,
        )
        .unwrap();
        assert!(parsed.assignments.is_empty());
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn reader_entry_point_matches_str() {
        let input = "h\n1,1,2024-01-01,2024-01-02\n";
        let from_reader =
            parse_assignments(input.as_bytes(), &ParseOptions::default(), &NullObserver).unwrap();
        let from_str = parse_str(input, &ParseOptions::default(), &NullObserver).unwrap();
        assert_eq!(from_reader, from_str);
    }

    #[test]
    fn row_with_two_digit_year_is_skipped() {
        let input = "h\n1,1,1/5/24,2024-01-10\n2,1,2024-01-01,24-01-05\n3,1,2024-01-01,2024-01-10\n";
        let parsed = parse_str(input, &ParseOptions::default(), &NullObserver).unwrap();
        assert_eq!(parsed.assignments.len(), 1);
        let reasons: Vec<_> = parsed.skipped.iter().map(|row| (row.line, row.reason.clone())).collect();
        assert_eq!(
            reasons,
            vec![
                (2, SkipReason::UnsupportedDate { value: "1/5/24".into() }),
                (3, SkipReason::UnsupportedDate { value: "24-01-05".into() }),
            ]
        );
    }

    #[test]
    fn non_utf8_row_is_skipped_and_the_rest_kept() {
        let mut input = b"EmpID,ProjectID,DateFrom,DateTo\n\
            1,7,2024-01-01,2024-01-10\n\
            2,7,2024-01-05,2024-01-15\n"
            .to_vec();
        input.extend_from_slice(b"3,Caf\xe9,2024-01-01,2024-01-10\n");

        let recorder = Recorder::new();
        let parsed = parse_assignments(&input[..], &ParseOptions::default(), &recorder).unwrap();

        assert_eq!(parsed.assignments.len(), 2);
        assert_eq!(
            parsed.skipped,
            vec![SkippedRow {
                line: 4,
                reason: SkipReason::InvalidEncoding,
            }]
        );
        assert!(!SkipReason::InvalidEncoding.is_routine());
        assert!(recorder.take().iter().any(|event| matches!(
            event,
            Diagnostic::RowSkipped {
                line: 4,
                reason: SkipReason::InvalidEncoding,
            }
        )));
    }

    #[test]
    fn empty_end_cell_means_open() {
        let parsed = parse_str("h\n1,7,2024-01-01,\n", &ParseOptions::default(), &NullObserver).unwrap();
        assert_eq!(parsed.assignments[0].end, EndDate::Open);
        assert!(parsed.skipped.is_empty());
    }
}
