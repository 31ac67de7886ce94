use anyhow::{Context, Result};
use csv::StringRecord;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// What `CsvConnection::rewrite_rows` does with one existing row
pub enum RowEdit<T> {
    Keep,
    Replace(T),
    Remove,
}

/// CsvConnection owns the data directory and hands out file paths and a
/// shared write lock to the repositories built on top of it
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Default data directory: ~/Documents/Nephew Diaries
    pub fn default_data_directory() -> Result<PathBuf> {
        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(documents_dir.join("Nephew Diaries"))
    }

    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.as_ref().clone()
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Serialize read-modify-write cycles across every repository sharing
    /// this connection
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Ensure a CSV file exists with the given header line
    pub fn ensure_file_exists(&self, file_name: &str, header: &str) -> Result<PathBuf> {
        let file_path = self.file_path(file_name);

        if !file_path.exists() {
            fs::write(&file_path, format!("{}\n", header))
                .with_context(|| format!("Failed to create {}", file_path.display()))?;
            debug!("Created CSV file: {:?}", file_path);
        }

        Ok(file_path)
    }

    /// Read every row of a CSV file. Rows that fail to deserialize are
    /// skipped with a warning.
    pub fn read_records<T: DeserializeOwned>(&self, file_name: &str, header: &str) -> Result<Vec<T>> {
        let file_path = self.ensure_file_exists(file_name, header)?;
        let mut reader = csv::Reader::from_path(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<T>().enumerate() {
            match row {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping malformed row {} in {}: {}", index + 1, file_name, e);
                }
            }
        }

        Ok(records)
    }

    /// Rewrite a CSV file one raw row at a time (temp file + rename).
    ///
    /// `edit` sees every data row as parsed text, including rows that would
    /// not deserialize, and decides what happens to it. Kept rows are
    /// written back field for field. Returns the number of rows replaced or
    /// removed; the file is left alone when that is zero.
    pub fn rewrite_rows<T, F>(&self, file_name: &str, header: &str, mut edit: F) -> Result<usize>
    where
        T: Serialize,
        F: FnMut(&StringRecord) -> RowEdit<T>,
    {
        let file_path = self.ensure_file_exists(file_name, header)?;
        let rows = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?
            .into_records()
            .collect::<Result<Vec<StringRecord>, _>>()
            .with_context(|| format!("Failed to read rows of {}", file_path.display()))?;

        let temp_path = file_path.with_extension("csv.tmp");
        let mut changed = 0;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(&temp_path)
                .with_context(|| format!("Failed to open {}", temp_path.display()))?;
            writer.write_record(header.split(','))?;
            for row in &rows {
                match edit(row) {
                    RowEdit::Keep => writer.write_record(row)?,
                    RowEdit::Replace(record) => {
                        writer.serialize(&record)?;
                        changed += 1;
                    }
                    RowEdit::Remove => changed += 1,
                }
            }
            writer.flush()?;
        }

        if changed == 0 {
            fs::remove_file(&temp_path)
                .with_context(|| format!("Failed to remove {}", temp_path.display()))?;
            return Ok(0);
        }

        fs::rename(&temp_path, &file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;
        debug!("Rewrote {} of {} rows in {}", changed, rows.len(), file_name);
        Ok(changed)
    }

    /// Append a single row, leaving existing rows untouched
    pub fn append_record<T: Serialize>(&self, file_name: &str, header: &str, record: &T) -> Result<()> {
        let file_path = self.ensure_file_exists(file_name, header)?;
        let file = fs::OpenOptions::new()
            .append(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open {} for append", file_path.display()))?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        count: u32,
        note: Option<String>,
    }

    const HEADER: &str = "id,count,note";

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let connection = CsvConnection::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested);
    }

    #[test]
    fn test_rewrite_rows_replaces_and_removes() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        fs::write(connection.file_path("rows.csv"), "id,count,note\na,1,\nb,2,\nc,3,\n").unwrap();

        let changed = connection
            .rewrite_rows("rows.csv", HEADER, |row| match row.get(0) {
                Some("a") => RowEdit::Replace(Row {
                    id: "a".to_string(),
                    count: 10,
                    note: Some("with, comma".to_string()),
                }),
                Some("b") => RowEdit::Remove,
                _ => RowEdit::Keep,
            })
            .unwrap();
        assert_eq!(changed, 2);

        let loaded: Vec<Row> = connection.read_records("rows.csv", HEADER).unwrap();
        assert_eq!(
            loaded,
            vec![
                Row { id: "a".to_string(), count: 10, note: Some("with, comma".to_string()) },
                Row { id: "c".to_string(), count: 3, note: None },
            ]
        );
        assert!(!connection.file_path("rows.csv.tmp").exists());
    }

    #[test]
    fn test_rewrite_rows_keeps_rows_that_do_not_deserialize() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        fs::write(
            connection.file_path("rows.csv"),
            "id,count,note\na,1,\nb,2nd,typo\nshort\n",
        )
        .unwrap();

        connection
            .rewrite_rows("rows.csv", HEADER, |row| match row.get(0) {
                Some("a") => RowEdit::Replace(Row { id: "a".to_string(), count: 5, note: None }),
                _ => RowEdit::Keep,
            })
            .unwrap();

        let contents = fs::read_to_string(connection.file_path("rows.csv")).unwrap();
        assert_eq!(contents, "id,count,note\na,5,\nb,2nd,typo\nshort\n");
    }

    #[test]
    fn test_rewrite_rows_without_changes_leaves_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let original = "id,count,note\n\"a\",1,\n";
        fs::write(connection.file_path("rows.csv"), original).unwrap();

        let changed = connection
            .rewrite_rows::<Row, _>("rows.csv", HEADER, |_| RowEdit::Keep)
            .unwrap();
        assert_eq!(changed, 0);
        assert_eq!(fs::read_to_string(connection.file_path("rows.csv")).unwrap(), original);
        assert!(!connection.file_path("rows.csv.tmp").exists());
    }

    #[test]
    fn test_read_missing_file_creates_header_only_file() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        let loaded: Vec<Row> = connection.read_records("rows.csv", HEADER).unwrap();
        assert!(loaded.is_empty());

        let contents = fs::read_to_string(connection.file_path("rows.csv")).unwrap();
        assert_eq!(contents, "id,count,note\n");
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        fs::write(
            connection.file_path("rows.csv"),
            "id,count,note\na,1,\nb,not-a-number,\nc,3,hello\n",
        )
        .unwrap();

        let loaded: Vec<Row> = connection.read_records("rows.csv", HEADER).unwrap();
        let ids: Vec<&str> = loaded.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(loaded[1].note.as_deref(), Some("hello"));
    }

    #[test]
    fn test_append_keeps_existing_rows() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        fs::write(connection.file_path("rows.csv"), "id,count,note\na,1,\nbroken\n").unwrap();

        connection
            .append_record("rows.csv", HEADER, &Row { id: "b".to_string(), count: 2, note: None })
            .unwrap();

        let contents = fs::read_to_string(connection.file_path("rows.csv")).unwrap();
        assert!(contents.contains("broken"));
        let loaded: Vec<Row> = connection.read_records("rows.csv", HEADER).unwrap();
        let ids: Vec<&str> = loaded.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
