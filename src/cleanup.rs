use crate::playlist::Playlist;
use std::collections::HashSet;
use std::fs;
use std::io::BufRead;
use std::path::PathBuf;

/// Renders a byte count the way the deletion report shows it: whole binary
/// megabytes under 1 GiB, gibibytes to three decimals from there up.
pub fn format_size(bytes: u64) -> String {
    let mega = bytes as f64 / 1024.0 / 1024.0;
    let giga = mega / 1024.0;
    if giga < 1.0 {
        format!("{} Mb", mega as u64)
    } else {
        format!("{giga:.3} Gb")
    }
}

/// Size lines for every marked entry, in playlist order, plus a total line.
pub fn deletion_report(playlist: &Playlist, marked: &HashSet<PathBuf>) -> Vec<String> {
    if marked.is_empty() {
        return vec![String::from("No file to delete")];
    }

    let mut lines = Vec::new();
    let mut total = 0u64;
    for path in playlist.entries() {
        if !marked.contains(path) {
            continue;
        }
        match fs::metadata(path) {
            Ok(meta) => {
                total += meta.len();
                lines.push(format!(" * {} {}", format_size(meta.len()), path.display()));
            }
            Err(_) => lines.push(format!(" * (size unknown) {}", path.display())),
        }
    }
    if total > 0 {
        lines.push(format!("                 Total size: {}", format_size(total)));
    }
    lines
}

/// Blocking yes/no question, retried until the answer is recognizable.
pub trait Prompt {
    fn ask(&mut self, question: &str) -> bool;
}

pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> bool {
        println!();
        println!("{question} (Y/N)");
        ask_from(std::io::stdin().lock())
    }
}

/// Reads lines from `input` until one parses as yes or no. End of input
/// declines.
pub fn ask_from<R: BufRead>(input: R) -> bool {
    for line in input.lines() {
        let Ok(line) = line else {
            return false;
        };
        match parse_answer(&line) {
            Some(answer) => return answer,
            None => println!(
                "{:?} is not a supported answer. Please use Y or N",
                line.trim()
            ),
        }
    }
    false
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim() {
        "y" | "Y" => Some(true),
        "n" | "N" => Some(false),
        _ => None,
    }
}

/// Best-effort removal of every marked entry, in playlist order. A failure is
/// reported per entry and does not stop the batch. Returns the paths that
/// were actually removed along with the report lines.
pub fn delete_marked(
    playlist: &Playlist,
    marked: &HashSet<PathBuf>,
) -> (Vec<PathBuf>, Vec<String>) {
    let mut deleted = Vec::new();
    let mut lines = Vec::new();
    let total = marked.len();
    for path in playlist.entries() {
        if !marked.contains(path) {
            continue;
        }
        match fs::remove_file(path) {
            Ok(()) => {
                deleted.push(path.clone());
                lines.push(format!(
                    "({}/{total}) Deleted {}",
                    deleted.len(),
                    path.display()
                ));
            }
            Err(err) => lines.push(format!(
                "[WARNING] Failed to delete {}: {err}",
                path.display()
            )),
        }
    }
    (deleted, lines)
}
