//! Academic program classification.

use std::fmt;
use std::str::FromStr;

use crate::error::MatchError;

/// The academic track a student belongs to.
///
/// Derived from the student identifier prefix by [`Program::classify`] and
/// used, together with a topic, to route proposals to a supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Program {
    /// Business Administration + Data & Business Analytics dual degree.
    #[cfg_attr(feature = "serde", serde(rename = "BBA+BDBA"))]
    BbaBdba,
    /// Data & Business Analytics.
    #[cfg_attr(feature = "serde", serde(rename = "BDBA"))]
    Bdba,
    /// Computer Science & Artificial Intelligence.
    #[cfg_attr(feature = "serde", serde(rename = "BCSAI"))]
    Bcsai,
    /// Business Administration.
    #[cfg_attr(feature = "serde", serde(rename = "BBA"))]
    Bba,
    /// Any identifier that matches no known prefix.
    Other,
}

impl Program {
    /// All programs, in classification priority order.
    pub const ALL: [Program; 5] = [
        Program::BbaBdba,
        Program::Bdba,
        Program::Bcsai,
        Program::Bba,
        Program::Other,
    ];

    /// Classifies a student identifier by prefix. First match wins:
    ///
    /// 1. `BBA_BDBA` → `BBA+BDBA`
    /// 2. `BDBA` → `BDBA`
    /// 3. `BCSAI` → `BCSAI`
    /// 4. `BBA`, unless followed by `_` → `BBA`
    /// 5. anything else → `Other`
    ///
    /// # Examples
    ///
    /// ```
    /// use capmatch_core::Program;
    ///
    /// assert_eq!(Program::classify("BBA_BDBA001"), Program::BbaBdba);
    /// assert_eq!(Program::classify("BDBA001"), Program::Bdba);
    /// assert_eq!(Program::classify("BCSAI001"), Program::Bcsai);
    /// assert_eq!(Program::classify("BBA001"), Program::Bba);
    /// assert_eq!(Program::classify("BBA_LAW001"), Program::Other);
    /// ```
    pub fn classify(student_id: &str) -> Program {
        if student_id.starts_with("BBA_BDBA") {
            Program::BbaBdba
        } else if student_id.starts_with("BDBA") {
            Program::Bdba
        } else if student_id.starts_with("BCSAI") {
            Program::Bcsai
        } else if student_id.starts_with("BBA") && !student_id.starts_with("BBA_") {
            Program::Bba
        } else {
            Program::Other
        }
    }

    /// Returns the display label of this program.
    pub fn as_str(&self) -> &'static str {
        match self {
            Program::BbaBdba => "BBA+BDBA",
            Program::Bdba => "BDBA",
            Program::Bcsai => "BCSAI",
            Program::Bba => "BBA",
            Program::Other => "Other",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Program {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| MatchError::UnknownProgram(s.to_string()))
    }
}
