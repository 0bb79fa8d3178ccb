use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::RecordsError;

/// One of the three preset tiers, serialized by name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RecordsError::UnknownDifficulty(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" Easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
    }

    #[test]
    fn rejects_unknown_name() {
        assert!(matches!(
            "Insane".parse::<Difficulty>(),
            Err(RecordsError::UnknownDifficulty(name)) if name == "Insane"
        ));
    }

    #[test]
    fn serializes_as_bare_name() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"Medium\"");
    }
}
