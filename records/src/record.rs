use serde::{Deserialize, Serialize};

use crate::*;

/// Number of ranked slots kept per difficulty.
pub const TABLE_LEN: usize = 10;

/// Placeholder written into unfilled slots, sorts after every real time.
pub const SENTINEL: &str = "-";

/// Longest player name accepted when signing a record.
pub const MAX_PLAYER_NAME: usize = 10;

pub const DEFAULT_PLAYER: &str = "BLXNK";

/// A single ranked slot, stored on disk as a `[name, time]` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ScoreEntry {
    pub player: String,
    pub time: String,
}

impl ScoreEntry {
    pub fn new(player: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            time: time.into(),
        }
    }

    pub fn sentinel() -> Self {
        Self::new(SENTINEL, SENTINEL)
    }

    pub fn is_sentinel(&self) -> bool {
        self.time == SENTINEL
    }

    /// Whether `time` ranks strictly ahead of this slot.
    pub fn is_beaten_by(&self, time: &str) -> bool {
        self.is_sentinel() || time < self.time.as_str()
    }
}

impl From<(String, String)> for ScoreEntry {
    fn from((player, time): (String, String)) -> Self {
        Self { player, time }
    }
}

impl From<ScoreEntry> for (String, String) {
    fn from(entry: ScoreEntry) -> Self {
        (entry.player, entry.time)
    }
}

pub type ScoreTable = [ScoreEntry; TABLE_LEN];

pub fn empty_table() -> ScoreTable {
    core::array::from_fn(|_| ScoreEntry::sentinel())
}

/// Everything that survives between sessions: settings plus the three ranked tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScoreRecord {
    /// Name offered for the next record entry.
    pub last_player: String,
    /// Difficulty active when the program last closed.
    pub last_difficulty: Difficulty,
    pub current_difficulty: Difficulty,
    /// Slot of the most recent insertion in the current difficulty's table.
    pub index: usize,
    pub easy: ScoreTable,
    pub medium: ScoreTable,
    pub hard: ScoreTable,
}

impl Default for ScoreRecord {
    fn default() -> Self {
        Self {
            last_player: DEFAULT_PLAYER.to_owned(),
            last_difficulty: Difficulty::Medium,
            current_difficulty: Difficulty::Medium,
            index: 0,
            easy: empty_table(),
            medium: empty_table(),
            hard: empty_table(),
        }
    }
}

impl ScoreRecord {
    pub fn table(&self, difficulty: Difficulty) -> &ScoreTable {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn table_mut(&mut self, difficulty: Difficulty) -> &mut ScoreTable {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Writes `name` into the slot at `index` of the current table and remembers it as the
    /// last player.
    pub fn sign_entry(&mut self, name: &str) -> Result<()> {
        let name = name.trim_matches(' ');
        let len = name.chars().count();
        if len == 0 || len > MAX_PLAYER_NAME {
            return Err(RecordsError::InvalidPlayerName {
                len,
                max: MAX_PLAYER_NAME,
            });
        }

        let index = self.index.min(TABLE_LEN - 1);
        self.last_player = name.to_owned();
        self.table_mut(self.current_difficulty)[index].player = name.to_owned();
        Ok(())
    }

    /// Every table sorted ascending with sentinel slots trailing.
    pub fn is_well_ordered(&self) -> bool {
        Difficulty::ALL.into_iter().all(|difficulty| {
            self.table(difficulty).windows(2).all(|pair| match (&pair[0], &pair[1]) {
                (a, _) if a.is_sentinel() => pair[1].is_sentinel(),
                (_, b) if b.is_sentinel() => true,
                (a, b) => a.time <= b.time,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_all_sentinels() {
        let record = ScoreRecord::default();

        assert_eq!(record.last_player, "BLXNK");
        assert_eq!(record.last_difficulty, Difficulty::Medium);
        for difficulty in Difficulty::ALL {
            assert!(record.table(difficulty).iter().all(ScoreEntry::is_sentinel));
        }
        assert!(record.is_well_ordered());
    }

    #[test]
    fn serializes_with_pascal_case_field_names() {
        let json = serde_json::to_value(ScoreRecord::default()).unwrap();

        for key in [
            "LastPlayer",
            "LastDifficulty",
            "CurrentDifficulty",
            "Index",
            "Easy",
            "Medium",
            "Hard",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["Easy"][0], serde_json::json!(["-", "-"]));
    }

    #[test]
    fn rejects_table_of_wrong_length() {
        let mut json = serde_json::to_value(ScoreRecord::default()).unwrap();
        json["Hard"].as_array_mut().unwrap().pop();

        assert!(serde_json::from_value::<ScoreRecord>(json).is_err());
    }

    #[test]
    fn sign_entry_updates_slot_and_last_player() {
        let mut record = ScoreRecord {
            current_difficulty: Difficulty::Easy,
            index: 3,
            ..Default::default()
        };
        record.easy[3] = ScoreEntry::new("BLXNK", "01:10");

        record.sign_entry("  Ann ").unwrap();

        assert_eq!(record.easy[3], ScoreEntry::new("Ann", "01:10"));
        assert_eq!(record.last_player, "Ann");
    }

    #[test]
    fn sign_entry_rejects_empty_and_long_names() {
        let mut record = ScoreRecord::default();

        assert!(record.sign_entry("   ").is_err());
        assert!(record.sign_entry("ElevenChars").is_err());
        assert_eq!(record.last_player, "BLXNK");
    }

    #[test]
    fn sentinel_sorts_after_any_time() {
        let sentinel = ScoreEntry::sentinel();
        let filled = ScoreEntry::new("A", "00:30");

        assert!(sentinel.is_beaten_by("99:59"));
        assert!(filled.is_beaten_by("00:29"));
        assert!(!filled.is_beaten_by("00:30"));
    }
}
