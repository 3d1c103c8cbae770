use std::{cmp::Reverse, fs::{self, OpenOptions}, io::{ErrorKind, Write}, path::{Path, PathBuf}};

use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Append-only `name:score` log, one record per line.
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ScoreStore { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, name: &str, score: u32) -> Result<()> {
        if name.contains(['\n', '\r']) {
            return Err(GameError::InvalidName(name.to_string()));
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}:{}", name, score)?;
        Ok(())
    }

    /// The `n` best entries, highest first. Equal scores keep file order.
    /// A store that does not exist yet has no entries.
    pub fn top_n(&self, n: usize) -> Result<Vec<HighScoreEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };

        let mut entries = content.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| parse_record(i + 1, line))
            .collect::<Result<Vec<_>>>()?;

        entries.sort_by_key(|entry| Reverse(entry.score));
        entries.truncate(n);
        Ok(entries)
    }
}

// Score is everything after the last colon, so names may contain colons.
fn parse_record(line_no: usize, line: &str) -> Result<HighScoreEntry> {
    let malformed = || GameError::MalformedScore { line: line_no, content: line.to_string() };

    let (name, score) = line.trim_end().rsplit_once(':').ok_or_else(malformed)?;
    let score = score.trim().parse::<u32>().map_err(|_| malformed())?;
    Ok(HighScoreEntry { name: name.to_string(), score })
}
