//! Writes generated report cards to a directory.

use std::path::{Path, PathBuf};

use reportcard_core::ReportError;
use reportcard_engine::{DocumentSink, GeneratedReport, SinkFuture};
use tokio::fs;

/// [`DocumentSink`] that saves every document under one output directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `report` is written: the report filename with the student id
    /// appended, so namesakes in one batch get separate files. Path
    /// separators (names and ids are free text) are replaced so the file
    /// stays inside `dir`.
    pub fn path_for(&self, report: &GeneratedReport) -> PathBuf {
        let stem = report
            .filename
            .strip_suffix(".docx")
            .unwrap_or(&report.filename);
        let filename = format!("{stem}_{}.docx", report.student_id);
        self.dir.join(safe_filename(&filename))
    }

    pub async fn write(&self, report: &GeneratedReport) -> Result<PathBuf, ReportError> {
        let path = self.path_for(report);
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ReportError::template_render(format!("{}: {e}", self.dir.display())))?;
        fs::write(&path, &report.content)
            .await
            .map_err(|e| ReportError::template_render(format!("{}: {e}", path.display())))?;
        Ok(path)
    }
}

impl DocumentSink for FileSink {
    fn accept<'a>(&'a self, report: &'a GeneratedReport) -> SinkFuture<'a> {
        Box::pin(async move {
            self.write(report).await?;
            Ok(())
        })
    }
}

fn safe_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect()
}
