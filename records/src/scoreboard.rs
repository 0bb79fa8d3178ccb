use crate::*;

/// In-memory owner of the persisted record, answering ranking questions for the current difficulty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scoreboard {
    record: ScoreRecord,
}

impl Scoreboard {
    /// Wraps a loaded record, falling back to defaults when nothing could be loaded.
    pub fn new(record: Option<ScoreRecord>) -> Self {
        let record = record.unwrap_or_else(|| {
            log::debug!("No stored records, starting from defaults");
            ScoreRecord::default()
        });
        Self { record }
    }

    pub fn record(&self) -> &ScoreRecord {
        &self.record
    }

    pub fn into_record(self) -> ScoreRecord {
        self.record
    }

    pub fn last_difficulty(&self) -> Difficulty {
        self.record.last_difficulty
    }

    pub fn set_last_difficulty(&mut self, difficulty: Difficulty) {
        self.record.last_difficulty = difficulty;
    }

    pub fn current_difficulty(&self) -> Difficulty {
        self.record.current_difficulty
    }

    pub fn set_current_difficulty(&mut self, difficulty: Difficulty) {
        self.record.current_difficulty = difficulty;
    }

    pub fn table(&self, difficulty: Difficulty) -> &ScoreTable {
        self.record.table(difficulty)
    }

    /// Whether `time` would earn a place in the current difficulty's table.
    pub fn check_time(&self, time: &str) -> bool {
        self.table(self.current_difficulty())[TABLE_LEN - 1].is_beaten_by(time)
    }

    /// Previews the current table with `time` inserted under the last player's name.
    ///
    /// Returns the new table and the slot the entry landed in, or `None` (and the table
    /// unchanged) when `time` does not beat any slot.
    pub fn compute_insertion(&self, time: &str) -> (ScoreTable, Option<usize>) {
        let mut table = self.table(self.current_difficulty()).clone();

        let Some(index) = table.iter().position(|entry| entry.is_beaten_by(time)) else {
            return (table, None);
        };

        table[index..].rotate_right(1);
        table[index] = ScoreEntry::new(self.record.last_player.clone(), time);
        (table, Some(index))
    }

    /// Copy of the held record with the insertion applied, ready to be signed and committed.
    pub fn preview_insertion(&self, time: &str) -> ScoreRecord {
        let (table, index) = self.compute_insertion(time);
        let mut preview = self.record.clone();
        *preview.table_mut(preview.current_difficulty) = table;
        if let Some(index) = index {
            preview.index = index;
        }
        preview
    }

    /// Replaces the held record; `None` keeps the current one.
    pub fn commit(&mut self, record: Option<ScoreRecord>) {
        if let Some(record) = record {
            debug_assert!(record.is_well_ordered(), "committed record is out of order");
            self.record = record;
        }
    }

    /// Forgets every entry of one difficulty.
    pub fn reset_difficulty(&mut self, difficulty: Difficulty) {
        log::debug!("Resetting {difficulty} scoreboard");
        *self.record.table_mut(difficulty) = empty_table();
    }
}
