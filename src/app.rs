use crate::cleanup::{self, Prompt, StdinPrompt};
use crate::model::Command;
use crate::player::{PlayerEngine, ProcessPlayer};
use crate::playlist::{self, Playlist};
use crate::session::{ReviewSession, SessionOutcome, Step};
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct AppOptions {
    pub playlist_path: PathBuf,
    pub player_program: Option<PathBuf>,
}

pub fn run(options: AppOptions) -> Result<()> {
    let playlist = Playlist::load(&options.playlist_path)?;

    let player = ProcessPlayer::new(options.player_program);
    if player.program().is_none() {
        eprintln!("[WARNING] No player executable found. Entries cannot be played, only reviewed.");
    }

    let mut session = ReviewSession::new(playlist, player);

    enable_raw_mode().context("failed to capture keystrokes")?;
    review_loop(&mut session);
    disable_raw_mode().context("failed to restore the terminal")?;

    shutdown(session.finish(), &mut StdinPrompt)
}

/// Blocks on one keystroke at a time until the session finishes. This is the
/// only suspension point: the player runs concurrently and is never awaited.
fn review_loop<P: PlayerEngine>(session: &mut ReviewSession<P>) {
    let mut step = session.begin();
    print_notes(session);
    while step == Step::Continue {
        let command = match next_command() {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(_) => Command::EndOfInput,
        };
        step = session.handle(command);
        print_notes(session);
    }
}

fn next_command() -> io::Result<Option<Command>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(command_for_key(key)),
        _ => Ok(None),
    }
}

fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::EndOfInput);
    }

    match key.code {
        KeyCode::Char('>') => Some(Command::Next),
        KeyCode::Char('<') => Some(Command::Prev),
        KeyCode::Char('d') => Some(Command::Mark),
        KeyCode::Char('u') => Some(Command::Unmark),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Esc => Some(Command::EndOfInput),
        KeyCode::Char(other) => Some(Command::Unknown(other)),
        _ => None,
    }
}

/// Raw mode leaves the cursor where a bare `\n` put it, so note lines are
/// written with an explicit carriage return.
fn print_notes<P: PlayerEngine>(session: &mut ReviewSession<P>) {
    let mut out = io::stdout();
    for line in session.drain_notes() {
        let _ = write!(out, "{line}\r\n");
    }
    let _ = out.flush();
}

/// The confirmation, deletion and playlist-fixing stage, run after the
/// terminal is back to normal.
fn shutdown(outcome: SessionOutcome, prompt: &mut dyn Prompt) -> Result<()> {
    for line in cleanup::deletion_report(&outcome.playlist, &outcome.marked) {
        println!("{line}");
    }

    let mut deleted = Vec::new();
    if !outcome.marked.is_empty() {
        if prompt.ask("Do you confirm deletion?") {
            let (removed, lines) = cleanup::delete_marked(&outcome.playlist, &outcome.marked);
            deleted = removed;
            for line in lines {
                println!("{line}");
            }
        } else {
            println!("Deletion was cancelled");
        }
    }

    if outcome.needs_fixing || !deleted.is_empty() {
        match playlist::write_fixed_copy(outcome.playlist.source()) {
            Ok(target) => println!("Fixed playlist is stored at {}", target.display()),
            Err(err) => eprintln!("[WARNING] Could not write the fixed playlist: {err:#}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    struct Scripted(bool);

    impl Prompt for Scripted {
        fn ask(&mut self, _question: &str) -> bool {
            self.0
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn review_keys_map_to_commands() {
        assert_eq!(command_for_key(key(KeyCode::Char('>'))), Some(Command::Next));
        assert_eq!(command_for_key(key(KeyCode::Char('<'))), Some(Command::Prev));
        assert_eq!(command_for_key(key(KeyCode::Char('d'))), Some(Command::Mark));
        assert_eq!(
            command_for_key(key(KeyCode::Char('u'))),
            Some(Command::Unmark)
        );
        assert_eq!(command_for_key(key(KeyCode::Char('q'))), Some(Command::Quit));
    }

    #[test]
    fn interrupts_end_the_input_stream() {
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::EndOfInput)
        );
        assert_eq!(command_for_key(key(KeyCode::Esc)), Some(Command::EndOfInput));
    }

    #[test]
    fn other_input_is_unknown_or_dropped() {
        assert_eq!(
            command_for_key(key(KeyCode::Char('x'))),
            Some(Command::Unknown('x'))
        );
        assert_eq!(command_for_key(key(KeyCode::Up)), None);
    }

    #[test]
    fn confirmed_deletion_removes_files_and_fixes_the_playlist() {
        let dir = tempdir().expect("tempdir");
        let kept = dir.path().join("kept.mp4");
        let doomed = dir.path().join("doomed.mp4");
        fs::write(&kept, b"x").expect("write");
        fs::write(&doomed, b"x").expect("write");

        let source = dir.path().join("list.txt");
        fs::write(
            &source,
            format!("{}\n{}", kept.display(), doomed.display()),
        )
        .expect("write");

        let playlist = Playlist::load(&source).expect("load");
        let outcome = SessionOutcome {
            playlist,
            marked: HashSet::from([doomed.clone()]),
            needs_fixing: false,
        };

        shutdown(outcome, &mut Scripted(true)).expect("shutdown");

        assert!(!doomed.exists());
        let fixed = fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .find(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("list.txt-")
            })
            .expect("fixed playlist written");
        let contents = fs::read_to_string(fixed.path()).expect("read");
        assert_eq!(contents, kept.display().to_string());
    }

    #[test]
    fn declined_deletion_keeps_files() {
        let dir = tempdir().expect("tempdir");
        let spared = dir.path().join("spared.mp4");
        fs::write(&spared, b"x").expect("write");

        let source = dir.path().join("list.txt");
        fs::write(&source, spared.display().to_string()).expect("write");

        let playlist = Playlist::load(&source).expect("load");
        let outcome = SessionOutcome {
            playlist,
            marked: HashSet::from([spared.clone()]),
            needs_fixing: false,
        };

        shutdown(outcome, &mut Scripted(false)).expect("shutdown");

        assert!(spared.exists());
        let wrote_fix = fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .any(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("list.txt-")
            });
        assert!(!wrote_fix);
    }

    #[test]
    fn declined_deletion_still_fixes_a_stale_playlist() {
        let dir = tempdir().expect("tempdir");
        let present = dir.path().join("present.mp4");
        fs::write(&present, b"x").expect("write");

        let source = dir.path().join("list.txt");
        fs::write(
            &source,
            format!(
                "{}\n{}",
                present.display(),
                dir.path().join("vanished.mp4").display()
            ),
        )
        .expect("write");

        let playlist = Playlist::load(&source).expect("load");
        let outcome = SessionOutcome {
            playlist,
            marked: HashSet::from([present.clone()]),
            needs_fixing: true,
        };

        shutdown(outcome, &mut Scripted(false)).expect("shutdown");

        assert!(present.exists());
        let fixed = fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .find(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("list.txt-")
            })
            .expect("fixed playlist written");
        let contents = fs::read_to_string(fixed.path()).expect("read");
        assert_eq!(contents, present.display().to_string());
    }
}
