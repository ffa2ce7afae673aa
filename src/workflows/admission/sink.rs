use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use super::ranking::Ranking;

/// Failure while handing a ranking to its destination.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to write ranking: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write ranking file {path}: {source}")]
    File { path: PathBuf, source: csv::Error },
    #[error("failed to encode ranking as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for a finished ranking (terminal, result files, machine-readable output).
pub trait RankingSink {
    fn publish(&mut self, ranking: &Ranking) -> Result<(), SinkError>;
}

/// Prints each department followed by its `first last score` lines.
///
/// An empty department still gets a blank line under its heading.
pub struct ConsoleSink<W> {
    writer: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RankingSink for ConsoleSink<W> {
    fn publish(&mut self, ranking: &Ranking) -> Result<(), SinkError> {
        for (department, _) in ranking.iter() {
            writeln!(self.writer, "\n{department}")?;
            writeln!(self.writer, "{}", ranking.lines(department).join("\n"))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes one `<department>.txt` per department: space-delimited, no header.
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, department: &str) -> PathBuf {
        self.directory.join(format!("{}.txt", department.to_lowercase()))
    }

    fn write_department(
        &self,
        path: &Path,
        ranking: &Ranking,
        department: &str,
    ) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .from_path(path)?;

        for entry in ranking.department(department).unwrap_or_default() {
            writer.write_record([
                entry.first_name.as_str(),
                entry.last_name.as_str(),
                entry.display_score().as_str(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl RankingSink for DirectorySink {
    fn publish(&mut self, ranking: &Ranking) -> Result<(), SinkError> {
        std::fs::create_dir_all(&self.directory)?;

        for (department, admitted) in ranking.iter() {
            let path = self.path_for(department);
            self.write_department(&path, ranking, department)
                .map_err(|source| SinkError::File {
                    path: path.clone(),
                    source,
                })?;
            info!(
                department,
                admitted = admitted.len(),
                path = %path.display(),
                "ranking file written"
            );
        }

        Ok(())
    }
}

/// Emits the full ranking, including applicant ids and admission pass, as JSON.
pub struct JsonSink<W> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RankingSink for JsonSink<W> {
    fn publish(&mut self, ranking: &Ranking) -> Result<(), SinkError> {
        serde_json::to_writer_pretty(&mut self.writer, ranking)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
