use core::time::Duration;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::*;

/// Shape of a freshly generated board, for laying out a view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub difficulty: Difficulty,
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

/// One player's game from start to teardown: the board, the clock and the scoreboard.
///
/// Every coordinate taken or returned here is 0-based view coordinates.
#[derive(Clone, Debug)]
pub struct Session<S = RandomMineSampler> {
    difficulty: Difficulty,
    board: Board,
    scoreboard: Scoreboard,
    sampler: S,
    stopwatch: Stopwatch,
    game_over: bool,
    field_locked: bool,
    winning_time: Option<String>,
}

impl Session<RandomMineSampler> {
    pub fn new(scoreboard: Scoreboard, seed: u64) -> Self {
        Self::with_sampler(scoreboard, RandomMineSampler::new(seed))
    }

    /// Session for program start: reads the stored records (or defaults) and resumes the last
    /// used difficulty.
    pub fn load(store: &RecordStore) -> Self {
        Self::new(Scoreboard::new(store.load()), seed_from_clock())
    }
}

impl<S: MineSampler> Session<S> {
    pub fn with_sampler(mut scoreboard: Scoreboard, mut sampler: S) -> Self {
        let difficulty = scoreboard.last_difficulty();
        scoreboard.set_current_difficulty(difficulty);
        let board = Board::generate(difficulty.config(), &mut sampler);

        Self {
            difficulty,
            board,
            scoreboard,
            sampler,
            stopwatch: Stopwatch::new(),
            game_over: true,
            field_locked: false,
            winning_time: None,
        }
    }

    /// Throws away the current board and deals a new one, optionally switching difficulty first.
    pub fn new_game(&mut self, difficulty: Option<Difficulty>) -> BoardSnapshot {
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
            self.scoreboard.set_current_difficulty(difficulty);
        }

        self.board = Board::generate(self.difficulty.config(), &mut self.sampler);
        self.stopwatch.reset();
        self.game_over = true;
        self.field_locked = false;
        self.winning_time = None;
        log::debug!("New {} game", self.difficulty);
        self.snapshot()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Switches difficulty, which always starts a new game.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> BoardSnapshot {
        self.new_game(Some(difficulty))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let config = self.board.config();
        BoardSnapshot {
            difficulty: self.difficulty,
            rows: config.rows(),
            cols: config.cols(),
            mines: config.mines(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cells have been opened and the game has not ended yet.
    pub fn in_progress(&self) -> bool {
        !self.board.uncovered().is_empty() && !self.game_over
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_field_locked(&self) -> bool {
        self.field_locked
    }

    pub fn check_win(&self) -> bool {
        self.board.check_win()
    }

    pub fn cell(&self, view: Coord2) -> Result<u8> {
        self.board.value(self.to_board(view)?)
    }

    /// Mines left to find by the player's count, negative when over-marked.
    pub fn remaining_mine_estimate(&self) -> i32 {
        i32::from(self.board.config().mines()) - self.board.marked().len() as i32
    }

    /// Primary click on a cell: opens a covered cell, or chords an open numbered one.
    pub fn click(&mut self, view: Coord2) -> Result<RevealOutcome> {
        let coords = self.to_board(view)?;
        if self.field_locked {
            return Err(GameError::FieldLocked);
        }
        if !self.in_progress() {
            self.begin(coords);
        }

        let opened = if self.board.is_uncovered(coords) {
            if self.board.value(coords)? == 0 {
                return Ok(RevealOutcome::unchanged());
            }
            let marked = self.board.marked_neighbors(coords);
            match self.board.verify_marks(coords, &marked) {
                MarkCheck::WrongCount => return Ok(RevealOutcome::unchanged()),
                MarkCheck::Mismatched => {
                    log::debug!("Chord at {:?} with misplaced marks", coords);
                    return Ok(self.lose(BTreeSet::new()));
                }
                MarkCheck::Confirmed => self.board.reveal_region(coords, Some(&marked)),
            }
        } else {
            self.board.reveal_region(coords, None)
        };

        Ok(if self.board.is_loss(&opened) {
            self.lose(opened)
        } else if self.board.check_win() {
            self.win(opened)
        } else {
            RevealOutcome {
                cells_opened: opened,
                mines_opened: None,
                verdict: Verdict::Continue,
            }
        })
    }

    /// Flips the mark on a covered cell, returning whether it is now marked.
    pub fn toggle_mark(&mut self, view: Coord2) -> Result<bool> {
        let coords = self.markable(view)?;
        let present = !self.board.is_marked(coords);
        self.board.set_mark(coords, present)?;
        Ok(present)
    }

    pub fn set_mark(&mut self, view: Coord2, present: bool) -> Result<()> {
        let coords = self.markable(view)?;
        self.board.set_mark(coords, present)
    }

    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }

    pub fn elapsed_time_snapshot(&self) -> String {
        self.stopwatch.snapshot()
    }

    /// Holds the clock, e.g. while a dialog covers the board.
    pub fn pause(&mut self) {
        if self.in_progress() {
            self.stopwatch.pause();
        }
    }

    pub fn resume(&mut self) {
        if self.in_progress() {
            self.stopwatch.start();
        }
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Time of the game just won, if it earns a place in the current table.
    pub fn qualifying_time(&self) -> Option<&str> {
        self.winning_time
            .as_deref()
            .filter(|time| self.scoreboard.check_time(time))
    }

    pub fn preview_insertion(&self, time: &str) -> ScoreRecord {
        self.scoreboard.preview_insertion(time)
    }

    /// Accepts the record returned by the scoreboard dialog; `None` means it was dismissed.
    pub fn confirm_insertion(&mut self, record: Option<ScoreRecord>) {
        self.scoreboard.commit(record);
    }

    pub fn reset_board(&mut self, difficulty: Difficulty) {
        self.scoreboard.reset_difficulty(difficulty);
    }

    /// Remembers the active difficulty and writes the records. Failures are logged and dropped so
    /// shutdown always completes.
    pub fn close(&mut self, store: &RecordStore) {
        self.scoreboard.set_last_difficulty(self.difficulty);
        self.scoreboard.set_current_difficulty(self.difficulty);
        if let Err(err) = store.save(self.scoreboard.record()) {
            log::warn!("Could not save records to {}: {}", store.path().display(), err);
        }
    }

    fn to_board(&self, view: Coord2) -> Result<Coord2> {
        from_view(view)
            .filter(|&coords| self.board.config().contains(coords))
            .ok_or(GameError::InvalidCoords)
    }

    fn markable(&self, view: Coord2) -> Result<Coord2> {
        let coords = self.to_board(view)?;
        if self.field_locked {
            return Err(GameError::FieldLocked);
        }
        if !self.in_progress() {
            return Err(GameError::NotInProgress);
        }
        if self.board.is_uncovered(coords) {
            return Err(GameError::AlreadyRevealed);
        }
        Ok(coords)
    }

    /// First click of a game: make the clicked cell safe and start the clock.
    fn begin(&mut self, coords: Coord2) {
        self.game_over = false;
        self.board.relocate_if_mined(coords, &mut self.sampler);
        self.stopwatch.start();
        log::debug!("Game started at {:?}", coords);
    }

    fn finish(&mut self) {
        self.game_over = true;
        self.field_locked = true;
        self.stopwatch.pause();
    }

    fn lose(&mut self, opened: BTreeSet<Coord2>) -> RevealOutcome {
        self.finish();
        log::debug!("Game lost after {}", self.stopwatch.snapshot());
        RevealOutcome {
            cells_opened: opened,
            mines_opened: Some(self.board.mines().iter().map(|&coords| to_view(coords)).collect()),
            verdict: Verdict::Loss,
        }
    }

    fn win(&mut self, opened: BTreeSet<Coord2>) -> RevealOutcome {
        self.finish();
        let time = self.stopwatch.snapshot();
        log::debug!("Game won in {}", time);
        self.winning_time = Some(time);
        RevealOutcome {
            cells_opened: opened,
            mines_opened: None,
            verdict: Verdict::Win,
        }
    }
}
