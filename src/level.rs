//! Level files and the campaign level list
//!
//! A level is plain text, one `Key=Value` declaration per line:
//!
//! ```text
//! startScore=300
//! levelHint=Press space,to grab the nearest dot
//! Dot=100,-150
//! Goal=500,0
//! ```
//!
//! Blank lines and unknown keys are skipped.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;

/// Campaign level file names, in play order
pub const CAMPAIGN: [&str; 3] = ["l1.level", "l2.level", "l3.level"];

/// Splash text shown before a level becomes playable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelHint {
    pub title: String,
    pub subtitle: Option<String>,
}

/// Parsed contents of one level file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub dots: Vec<Vec2>,
    pub goals: Vec<Vec2>,
    /// May be negative in the file; clamped to zero when the level loads
    pub start_score: i32,
    /// Shown in declaration order
    pub hints: Vec<LevelHint>,
}

impl LevelSpec {
    /// Parse level text
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut spec = LevelSpec::default();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split('=').collect();
            let [key, value] = parts[..] else {
                log::warn!("Line {}: not a Key=Value declaration, skipped", line_no);
                continue;
            };

            match key {
                "Dot" => spec.dots.push(parse_point(line_no, key, value)?),
                "Goal" => spec.goals.push(parse_point(line_no, key, value)?),
                "startScore" => spec.start_score = parse_int(line_no, key, value)?,
                "levelHint" => {
                    let mut fields = value.split(',');
                    let title = fields.next().unwrap_or_default().to_string();
                    let subtitle = fields.next().map(str::to_string);
                    spec.hints.push(LevelHint { title, subtitle });
                }
                other => log::warn!("Line {}: unknown key `{}` ignored", line_no, other),
            }
        }

        Ok(spec)
    }

    /// Read and parse a level file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }
}

fn parse_int(line: usize, key: &str, value: &str) -> Result<i32, LevelError> {
    value.trim().parse().map_err(|_| LevelError::BadNumber {
        line,
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_point(line: usize, key: &str, value: &str) -> Result<Vec2, LevelError> {
    let fields: Vec<&str> = value.split(',').collect();
    let [x, y] = fields[..] else {
        return Err(LevelError::FieldCount {
            line,
            key: key.to_string(),
            got: fields.len(),
        });
    };
    let x = parse_int(line, key, x)?;
    let y = parse_int(line, key, y)?;
    Ok(Vec2::new(x as f32, y as f32))
}

/// Where a level's text comes from
#[derive(Debug, Clone)]
enum LevelSource {
    File(PathBuf),
    Inline(String),
}

/// Ordered list of levels. Levels are parsed lazily when loaded, so a broken
/// file only fails once the player reaches it.
#[derive(Debug, Clone, Default)]
pub struct LevelSet {
    sources: Vec<LevelSource>,
}

impl LevelSet {
    /// The three-level campaign stored in `dir`
    pub fn campaign(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            sources: CAMPAIGN
                .iter()
                .map(|name| LevelSource::File(dir.join(name)))
                .collect(),
        }
    }

    /// Levels given directly as text
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: texts
                .into_iter()
                .map(|t| LevelSource::Inline(t.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Load and parse the level at `index`
    pub fn load(&self, index: usize) -> Result<LevelSpec, LevelError> {
        let source = self.sources.get(index).ok_or(LevelError::OutOfRange {
            index,
            count: self.sources.len(),
        })?;
        match source {
            LevelSource::File(path) => LevelSpec::from_file(path),
            LevelSource::Inline(text) => LevelSpec::parse(text),
        }
    }
}
