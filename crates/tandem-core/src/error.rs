use std::fmt;

/// Machine-readable error codes for scripts and agents consuming `tdm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigUnreadable,
    ConfigParseError,
    EmptyInput,
    InputUnreadable,
    MalformedInput,
    NoValidRows,
    InvalidArgument,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigUnreadable => "E1001",
            Self::ConfigParseError => "E1002",
            Self::EmptyInput => "E2001",
            Self::InputUnreadable => "E2002",
            Self::MalformedInput => "E2003",
            Self::NoValidRows => "E2004",
            Self::InvalidArgument => "E3001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigUnreadable => "Config file unreadable",
            Self::ConfigParseError => "Config file parse error",
            Self::EmptyInput => "Input file is empty",
            Self::InputUnreadable => "Input file unreadable",
            Self::MalformedInput => "Malformed CSV input",
            Self::NoValidRows => "No valid data found in the file",
            Self::InvalidArgument => "Invalid argument",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigUnreadable => Some("Check the path and permissions of the config file."),
            Self::ConfigParseError => Some("Fix syntax in tandem.toml and retry."),
            Self::EmptyInput => Some("Select a CSV file with a header and at least one row."),
            Self::InputUnreadable => Some("Check the path, permissions and UTF-8 encoding."),
            Self::MalformedInput => Some("Check quoting in the CSV file."),
            Self::NoValidRows => Some(
                "Rows need EmpID, ProjectID, DateFrom, DateTo; run with TANDEM_LOG=debug to see skipped lines.",
            ),
            Self::InvalidArgument => None,
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
