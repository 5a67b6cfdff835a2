use crate::error::GddError;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Writes `frame` as a headed CSV on the blocking pool and returns the path written.
pub async fn write_csv(frame: DataFrame, path: PathBuf) -> Result<PathBuf, GddError> {
    tokio::task::spawn_blocking(move || {
        write_csv_blocking(frame, &path)?;
        info!("Wrote {}", path.display());
        Ok(path)
    })
    .await?
}

fn write_csv_blocking(mut frame: DataFrame, path: &Path) -> Result<(), GddError> {
    let file = File::create(path).map_err(|e| GddError::ExportIo(path.to_path_buf(), e))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|e| GddError::ExportPolars(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_is_written_as_empty_field() -> Result<(), GddError> {
        let dir = tempfile::tempdir().unwrap();
        let frame = df!(
            "county" => ["Adams, ND", "Cass, ND"],
            "mean_accumulated_gdd" => [None, Some(1100.0)]
        )
        .unwrap();

        let path = write_csv(frame, dir.path().join("out.csv")).await?;

        let written = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "county,mean_accumulated_gdd");
        assert_eq!(lines[1], "\"Adams, ND\",");
        assert!(lines[2].starts_with("\"Cass, ND\",1100"));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.csv");

        let err = write_csv(df!("a" => [1]).unwrap(), path.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, GddError::ExportIo(p, _) if p == path));
    }
}
