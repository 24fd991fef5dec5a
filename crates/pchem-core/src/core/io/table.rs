use super::{OutputError, ensure_parent_dir};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use tracing::info;

/// Writes `rows` as a CSV file with a header derived from the row type.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    let csv_err = |e: csv::Error| OutputError::Csv {
        path: path.to_path_buf(),
        source: e,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Saved {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Writes equally long columns under `headers`, one CSV row per index.
pub fn write_columns(path: &Path, headers: &[&str], columns: &[Vec<f64>]) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    let csv_err = |e: csv::Error| OutputError::Csv {
        path: path.to_path_buf(),
        source: e,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(headers).map_err(csv_err)?;
    let rows = columns.iter().map(Vec::len).min().unwrap_or(0);
    for i in 0..rows {
        writer
            .write_record(columns.iter().map(|c| c[i].to_string()))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Saved {rows} row(s) to {}", path.display());
    Ok(())
}

/// Reads every record of a headed CSV file. Columns without a matching field are ignored.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, OutputError> {
    let csv_err = |e: csv::Error| OutputError::Csv {
        path: path.to_path_buf(),
        source: e,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        #[serde(rename = "temp")]
        temperature: f64,
        value: f64,
    }

    #[test]
    fn written_rows_can_be_read_back_with_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("table.csv");
        let rows = vec![
            Row {
                temperature: 100.0,
                value: -1.5,
            },
            Row {
                temperature: 120.0,
                value: 2.0,
            },
        ];
        write_csv(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("temp,value\n"));
        assert_eq!(read_csv::<Row>(&path).unwrap(), rows);
    }

    #[test]
    fn write_columns_transposes_into_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("columns.csv");
        let columns = vec![vec![100.0, 120.0], vec![1.5, -2.25]];
        write_columns(&path, &["temp", "hard_sphere"], &columns).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "temp,hard_sphere\n100,1.5\n120,-2.25\n");
    }

    #[test]
    fn read_csv_ignores_unknown_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extra.csv");
        std::fs::write(&path, "name,temp,value\nargon, 87.3 ,1.5\n").unwrap();
        let rows: Vec<Row> = read_csv(&path).unwrap();
        assert_eq!(
            rows,
            vec![Row {
                temperature: 87.3,
                value: 1.5
            }]
        );
    }

    #[test]
    fn read_csv_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_csv::<Row>(&dir.path().join("missing.csv"));
        assert!(matches!(result, Err(OutputError::Csv { .. })));
    }
}
