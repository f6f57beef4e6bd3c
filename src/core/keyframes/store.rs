//! 关键帧索引的文本持久化（每行一个整数）

use super::error::KeyframeError;
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub const DEFAULT_NAME: &str = "keyframes";

pub struct KeyframeStore {
    dir: PathBuf,
    name: String,
}

impl KeyframeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_name(dir, DEFAULT_NAME)
    }

    pub fn with_name(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.txt", self.name))
    }

    pub fn save(&self, keyframes: &[usize]) -> Result<PathBuf, KeyframeError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path();
        let mut writer = BufWriter::new(File::create(&path)?);
        for keyframe in keyframes {
            writeln!(writer, "{}", keyframe)?;
        }
        writer.flush()?;

        info!("💾 Saved {} keyframes to {:?}", keyframes.len(), path);
        Ok(path)
    }

    pub fn load(&self) -> Result<Vec<usize>, KeyframeError> {
        let text = fs::read_to_string(self.path())?;
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                line.trim()
                    .parse::<usize>()
                    .map_err(|_| KeyframeError::ParseIndex {
                        line: idx + 1,
                        value: line.to_string(),
                    })
            })
            .collect()
    }
}
