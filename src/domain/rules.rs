use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::LifeError;

/// Birth/Survival rule for outer-totalistic automata.
/// Each set is a 9-bit mask over neighbor counts 0..=8, so
/// the next-state decision is a single shift and mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    birth: u16,
    survival: u16,
}

impl Rule {
    /// Build a rule from neighbor-count lists.
    /// Fails if any entry is greater than 8.
    pub fn new(birth: &[u8], survival: &[u8]) -> Result<Self, LifeError> {
        Ok(Self {
            birth: Self::mask("birth", birth)?,
            survival: Self::mask("survival", survival)?,
        })
    }

    fn mask(set: &'static str, counts: &[u8]) -> Result<u16, LifeError> {
        counts.iter().try_fold(0u16, |mask, &value| {
            if value > 8 {
                Err(LifeError::InvalidRule { set, value })
            } else {
                Ok(mask | (1 << value))
            }
        })
    }

    /// Conway's Game of Life (B3/S23)
    pub const fn conway() -> Self {
        Self { birth: 1 << 3, survival: (1 << 2) | (1 << 3) }
    }

    /// HighLife (B36/S23), home of the replicator
    pub const fn highlife() -> Self {
        Self { birth: (1 << 3) | (1 << 6), survival: (1 << 2) | (1 << 3) }
    }

    /// Seeds (B2/S), every live cell dies each generation
    pub const fn seeds() -> Self {
        Self { birth: 1 << 2, survival: 0 }
    }

    /// Day & Night (B3678/S34678)
    pub const fn day_and_night() -> Self {
        Self {
            birth: (1 << 3) | (1 << 6) | (1 << 7) | (1 << 8),
            survival: (1 << 3) | (1 << 4) | (1 << 6) | (1 << 7) | (1 << 8),
        }
    }

    /// Next state of a cell given its current state and live neighbor count
    #[inline]
    pub const fn evolve(&self, alive: bool, neighbors: u8) -> bool {
        let mask = if alive { self.survival } else { self.birth };
        neighbors <= 8 && (mask >> neighbors as u16) & 1 == 1
    }

    pub fn birth(&self) -> Vec<u8> {
        Self::counts(self.birth)
    }

    pub fn survival(&self) -> Vec<u8> {
        Self::counts(self.survival)
    }

    fn counts(mask: u16) -> Vec<u8> {
        (0u8..=8).filter(|n| (mask >> n) & 1 == 1).collect()
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |counts: Vec<u8>| counts.iter().map(u8::to_string).collect::<String>();
        write!(f, "B{}/S{}", digits(self.birth()), digits(self.survival()))
    }
}

impl FromStr for Rule {
    type Err = LifeError;

    /// Parse `B{digits}/S{digits}`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LifeError::RuleNotation(s.to_string());
        let (b, s_part) = s.trim().split_once('/').ok_or_else(malformed)?;

        let digits = |part: &str, prefix: char| -> Result<Vec<u8>, LifeError> {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) if c.eq_ignore_ascii_case(&prefix) => {}
                _ => return Err(malformed()),
            }
            chars
                .map(|c| c.to_digit(10).map(|d| d as u8).ok_or_else(malformed))
                .collect()
        };

        Rule::new(&digits(b, 'B')?, &digits(s_part, 'S')?)
    }
}

impl TryFrom<String> for Rule {
    type Error = LifeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}

/// Get all preset rules
pub fn all_rules() -> Vec<(&'static str, Rule)> {
    vec![
        ("Conway", Rule::conway()),
        ("HighLife", Rule::highlife()),
        ("Seeds", Rule::seeds()),
        ("Day&Night", Rule::day_and_night()),
    ]
}
