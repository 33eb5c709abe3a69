//! Canonical unordered employee pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Two distinct employees, stored smallest id first.
///
/// The constructor is the only way in, so `(a, b)` and `(b, a)` always
/// produce the same value and the derived `Eq`/`Hash`/`Ord` are symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EmployeePair {
    first: EmployeeId,
    second: EmployeeId,
}

impl EmployeePair {
    /// Build the canonical pair. Returns `None` when both ids are equal.
    #[must_use]
    pub fn new(a: impl Into<EmployeeId>, b: impl Into<EmployeeId>) -> Option<Self> {
        let (a, b) = (a.into(), b.into());
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[must_use]
    pub const fn first(self) -> EmployeeId {
        self.first
    }

    #[must_use]
    pub const fn second(self) -> EmployeeId {
        self.second
    }

    /// Return `true` if `employee` is one of the two members.
    #[must_use]
    pub fn contains(self, employee: EmployeeId) -> bool {
        self.first == employee || self.second == employee
    }
}

impl fmt::Display for EmployeePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.first, self.second)
    }
}

// Deserialization goes through `new` so a payload cannot smuggle in a
// non-canonical pair.
impl<'de> Deserialize<'de> for EmployeePair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            first: EmployeeId,
            second: EmployeeId,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.first, raw.second)
            .ok_or_else(|| serde::de::Error::custom("pair members must be distinct"))
    }
}
