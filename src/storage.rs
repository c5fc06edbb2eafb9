use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage<T> {
    /// Charge un document depuis un support.
    fn load(&self) -> anyhow::Result<T>;
    /// Sauvegarde de manière atomique.
    fn save(&self, doc: &T) -> anyhow::Result<()>;
}

/// Stockage fichier JSON (roster, planning résolu).
pub struct JsonStorage<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonStorage<T> {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            _marker: PhantomData,
        })
    }
}

impl<T: Serialize + DeserializeOwned> Storage<T> for JsonStorage<T> {
    fn load(&self) -> anyhow::Result<T> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let doc: T = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(doc)
    }

    fn save(&self, doc: &T) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(doc)?;
        let mut tmp =
            NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
                .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
