//! Session-end reporting: JSON score for the host app, and the best score on disk
//! (XDG config or ~/.config/numconnect).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "numconnect";
const FILENAME: &str = "highscore";

/// Final numbers of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub score: u64,
    pub level: u32,
    pub merges: u32,
    pub drags: u32,
}

/// The payload a host application expects: `{"score":N}`.
#[derive(Debug, Serialize)]
struct HostScore {
    score: u64,
}

/// Receives the report when a session ends.
pub trait ScoreReporter {
    fn report(&mut self, report: &SessionReport) -> Result<()>;
}

/// Writes one JSON line per report.
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    out: W,
    /// Full report instead of the bare `{"score":N}`.
    detailed: bool,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            detailed: false,
        }
    }

    pub fn detailed(out: W) -> Self {
        Self { out, detailed: true }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ScoreReporter for JsonReporter<W> {
    fn report(&mut self, report: &SessionReport) -> Result<()> {
        if self.detailed {
            serde_json::to_writer(&mut self.out, report)?;
        } else {
            serde_json::to_writer(&mut self.out, &HostScore { score: report.score })?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Best score kept in a one-line text file.
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// config dir / numconnect / highscore
    pub fn default_location() -> Result<Self> {
        let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            if xdg.is_empty() {
                home_config()
            } else {
                PathBuf::from(xdg)
            }
        } else {
            home_config()
        };
        Ok(Self::at(base.join(APP_DIR).join(FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored best score; 0 when missing or unreadable.
    pub fn load(&self) -> u64 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.lines().next().and_then(|l| l.trim().parse().ok()))
            .unwrap_or(0)
    }

    /// Creates the parent directory if needed.
    pub fn save(&self, score: u64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut f = fs::File::create(&self.path)
            .with_context(|| format!("writing {}", self.path.display()))?;
        writeln!(f, "{}", score)?;
        Ok(())
    }
}

fn home_config() -> PathBuf {
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(".config"))
        .unwrap_or_else(|_| PathBuf::from("."))
}

impl ScoreReporter for HighScoreFile {
    /// Keeps the higher of the stored and reported scores.
    fn report(&mut self, report: &SessionReport) -> Result<()> {
        if report.score > self.load() {
            self.save(report.score)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(score: u64) -> SessionReport {
        SessionReport {
            score,
            level: 2,
            merges: 3,
            drags: 5,
        }
    }

    #[test]
    fn host_payload_is_score_only() {
        let mut r = JsonReporter::new(Vec::new());
        r.report(&sample(1234)).unwrap();
        assert_eq!(String::from_utf8(r.into_inner()).unwrap(), "{\"score\":1234}\n");
    }

    #[test]
    fn detailed_payload_has_everything() {
        let mut r = JsonReporter::detailed(Vec::new());
        r.report(&sample(7)).unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();
        let back: SessionReport = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(back, sample(7));
    }

    #[test]
    fn high_score_keeps_the_best() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = HighScoreFile::at(dir.path().join("nested").join(FILENAME));
        assert_eq!(file.load(), 0);
        file.report(&sample(500)).unwrap();
        assert_eq!(file.load(), 500);
        file.report(&sample(120)).unwrap();
        assert_eq!(file.load(), 500);
        file.report(&sample(900)).unwrap();
        assert_eq!(file.load(), 900);
    }

    #[test]
    fn garbage_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        fs::write(&path, "not a number\n").unwrap();
        assert_eq!(HighScoreFile::at(path).load(), 0);
    }
}
