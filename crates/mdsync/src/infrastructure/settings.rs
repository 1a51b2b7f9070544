use std::path::{Path, PathBuf};

use anyhow::Result;

/// `.env`-format key-value settings store. Writes go through to the backing
/// file immediately so the in-memory view and the file cannot diverge.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
    entries: Vec<(String, String)>,
}

impl EnvFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut entries = Vec::new();
        if path.exists() {
            for item in dotenvy::from_path_iter(&path)? {
                let (key, value) = item?;
                entries.push((key, value));
            }
            info!("loaded {} settings from {:?}", entries.len(), path);
        } else {
            info!("settings file {:?} not found, starting empty", path);
        }

        Ok(Self { path, entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }

        self.write()
    }

    fn write(&self) -> Result<()> {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        std::fs::write(&self.path, out)?;

        Ok(())
    }
}
