use crate::model::{Command, Direction};
use crate::nav;
use crate::player::PlayerEngine;
use crate::playlist::{self, Playlist};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Whether the command loop keeps running after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Finished,
}

/// What the review left behind for the cleanup stage.
#[derive(Debug)]
pub struct SessionOutcome {
    pub playlist: Playlist,
    pub marked: HashSet<PathBuf>,
    pub needs_fixing: bool,
}

/// The review state machine: current position, traversal direction, the
/// marked-for-deletion set and the player process bound to the current entry.
///
/// The player engine is owned here exclusively. Every transition that moves
/// the position stops the running player before the next one starts, so at
/// most one player is ever live from the session's point of view.
pub struct ReviewSession<P> {
    playlist: Playlist,
    index: usize,
    direction: Direction,
    marked: HashSet<PathBuf>,
    needs_fixing: bool,
    player: P,
    notes: Vec<String>,
}

impl<P: PlayerEngine> ReviewSession<P> {
    pub fn new(playlist: Playlist, player: P) -> Self {
        Self {
            playlist,
            index: 0,
            direction: Direction::Forward,
            marked: HashSet::new(),
            needs_fixing: false,
            player,
            notes: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn needs_fixing(&self) -> bool {
        self.needs_fixing
    }

    pub fn marked(&self) -> &HashSet<PathBuf> {
        &self.marked
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Lines accumulated since the last drain, for the app layer to print.
    pub fn drain_notes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notes)
    }

    /// Enters the entry at the current position, skipping entries that no
    /// longer open. Skipping follows the current traversal direction and
    /// returns `Finished` when it runs off either end of the playlist.
    pub fn begin(&mut self) -> Step {
        loop {
            let Some(path) = self.current_path() else {
                self.note("Playlist is empty. Nothing to review.");
                return Step::Finished;
            };

            if playlist::entry_opens(&path) {
                self.announce_entry(&path);
                if let Err(err) = self.player.start(&path) {
                    self.note(format!(
                        "[WARNING] Could not play {}: {err}. Use <, > to move on or q to quit.",
                        path.display()
                    ));
                }
                return Step::Continue;
            }

            self.needs_fixing = true;
            self.note(format!(
                "[WARNING] {} does not open. The playlist is out of date and will be fixed in a separate file.",
                path.display()
            ));

            let skipped_to = match self.direction {
                Direction::Forward => nav::next(self.playlist.len(), self.index),
                Direction::Backward => nav::prev(self.index),
            };
            match skipped_to {
                Some(index) => self.index = index,
                None => {
                    self.note("[WARNING] Reached the end of the playlist. Stopping review.");
                    return Step::Finished;
                }
            }
        }
    }

    pub fn handle(&mut self, command: Command) -> Step {
        match command {
            Command::Next => self.go_next(),
            Command::Prev => self.go_prev(),
            Command::Mark => self.mark_current(),
            Command::Unmark => self.unmark_current(),
            Command::Quit => {
                self.note(format!(
                    "Quit reviewing. Stopped at entry {}/{}",
                    self.index + 1,
                    self.playlist.len()
                ));
                self.stop_player();
                Step::Finished
            }
            Command::EndOfInput => {
                self.note("Input closed. Stopping review.");
                self.stop_player();
                Step::Finished
            }
            Command::Unknown(raw) => {
                self.note(format!(
                    "Command {raw:?} is unsupported. Use <, >, d, u or q instead."
                ));
                Step::Continue
            }
        }
    }

    /// Stops whatever is still playing and hands the results to the cleanup
    /// stage.
    pub fn finish(mut self) -> SessionOutcome {
        let _ = self.player.stop();
        SessionOutcome {
            playlist: self.playlist,
            marked: self.marked,
            needs_fixing: self.needs_fixing,
        }
    }

    fn go_next(&mut self) -> Step {
        match nav::next(self.playlist.len(), self.index) {
            None => {
                self.note("Already at the end of the playlist. Stopping review.");
                self.stop_player();
                Step::Finished
            }
            Some(index) => {
                let switching = self
                    .playlist
                    .get(index)
                    .map(|path| format!("Switching to next entry {}", path.display()));
                if let Some(line) = switching {
                    self.note(line);
                }
                self.stop_player();
                self.direction = Direction::Forward;
                self.index = index;
                self.begin()
            }
        }
    }

    fn go_prev(&mut self) -> Step {
        match nav::prev(self.index) {
            None => {
                self.note("Already at the beginning of the playlist. There is no previous entry.");
                Step::Continue
            }
            Some(index) => {
                let switching = self
                    .playlist
                    .get(index)
                    .map(|path| format!("Switching to previous entry {}", path.display()));
                if let Some(line) = switching {
                    self.note(line);
                }
                self.direction = Direction::Backward;
                self.stop_player();
                self.index = index;
                self.begin()
            }
        }
    }

    fn mark_current(&mut self) -> Step {
        if let Some(path) = self.current_path() {
            self.note(format!("Marked {} for deletion", path.display()));
            self.marked.insert(path);
        }
        Step::Continue
    }

    fn unmark_current(&mut self) -> Step {
        if let Some(path) = self.current_path() {
            self.note(format!("Unmarked {}", path.display()));
            self.marked.remove(&path);
        }
        Step::Continue
    }

    fn current_path(&self) -> Option<PathBuf> {
        self.playlist.get(self.index).map(Path::to_path_buf)
    }

    fn announce_entry(&mut self, path: &Path) {
        self.note(" ================================================== ");
        self.note(format!(
            "         Entry {}/{}",
            self.index + 1,
            self.playlist.len()
        ));
        self.note(" ================================================== ");
        if self.marked.contains(path) {
            self.note("[WARNING] This entry is marked for deletion");
        }
        self.note("Commands: > next | < previous | d mark for deletion | u unmark | q quit");
        self.note(format!("Entries marked for deletion: {}", self.marked.len()));
    }

    fn stop_player(&mut self) {
        if let Err(err) = self.player.stop() {
            self.note(format!("[WARNING] {err}. Continuing anyway."));
        }
    }

    fn note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }
}
