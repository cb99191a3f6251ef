use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("player executable not found")]
    NotFound,
    #[error("failed to launch player: {0}")]
    LaunchFailed(#[from] io::Error),
    #[error("failed to terminate player: {0}")]
    KillFailed(io::Error),
}

/// Seam between the session and the external player process. The session
/// guarantees stop-before-start; `stop` with nothing running is a no-op.
pub trait PlayerEngine {
    /// Spawns the player bound to `path` and returns as soon as the process
    /// is launched. Never waits for playback to finish.
    fn start(&mut self, path: &Path) -> Result<(), PlayerError>;

    /// Best-effort termination signal. Does not wait for the process to
    /// actually exit.
    fn stop(&mut self) -> Result<(), PlayerError>;

    /// Path the live process is bound to, if one is running.
    fn current(&self) -> Option<&Path>;
}

/// Plays entries by spawning an external player, one child process at a time.
pub struct ProcessPlayer {
    program: Option<PathBuf>,
    child: Option<Child>,
    current: Option<PathBuf>,
}

impl ProcessPlayer {
    /// Uses `program` when given, otherwise whatever `find_player` turns up.
    /// A player-less instance still constructs; every `start` then reports
    /// `NotFound` so the operator can keep navigating.
    pub fn new(program: Option<PathBuf>) -> Self {
        Self {
            program: program.or_else(find_player),
            child: None,
            current: None,
        }
    }

    pub fn program(&self) -> Option<&Path> {
        self.program.as_deref()
    }
}

impl PlayerEngine for ProcessPlayer {
    fn start(&mut self, path: &Path) -> Result<(), PlayerError> {
        debug_assert!(
            self.child.is_none(),
            "player started while another is active"
        );
        let program = self.program.as_ref().ok_or(PlayerError::NotFound)?;
        let child = Command::new(program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        self.child = Some(child);
        self.current = Some(path.to_path_buf());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        self.current = None;
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        // Signal only; the exit status is not awaited.
        child.kill().map_err(PlayerError::KillFailed)
    }

    fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }
}

/// Player executable on PATH, else in the usual install locations.
fn find_player() -> Option<PathBuf> {
    if let Ok(path) = which::which("mplayer") {
        return Some(path);
    }

    ["/usr/bin/mplayer", "/usr/local/bin/mplayer"]
        .into_iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}
