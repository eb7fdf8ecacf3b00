use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

impl OutputSink {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(OutputSink::Stdout, OutputSink::File)
    }

    /// Replaces the previous output. Files are swapped in by rename so a
    /// reader never sees a partial panel.
    pub fn write(&self, contents: &str) -> anyhow::Result<()> {
        match self {
            OutputSink::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(contents.as_bytes())?;
                stdout.write_all(b"\n")?;
                stdout.flush()?;
                Ok(())
            }
            OutputSink::File(path) => write_atomically(path, contents),
        }
    }
}

fn write_atomically(path: &Path, contents: &str) -> anyhow::Result<()> {
    let mut tmp_name = path
        .file_name()
        .with_context(|| format!("Output path has no file name: {}", path.display()))?
        .to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, contents)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move output into {}", path.display()))?;
    Ok(())
}
