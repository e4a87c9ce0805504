//! Expense file storage
//!
//! The expense file is append-only: new records are added at the end and
//! existing lines are never rewritten. Reads are lenient; a line that does not
//! decode is skipped so a damaged history never blocks new summaries.
//!
//! There is no cross-process locking. Two processes appending at once may
//! interleave their lines; each line is written with a single append so it
//! lands whole on typical file systems.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::Expense;

use super::codec;

/// Append-only store backed by a single expense file
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    /// Create a store for the given file (the file need not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one expense to the end of the file
    pub fn append(&self, expense: &Expense) -> TrackerResult<()> {
        append(expense, &self.path)
    }

    /// Load every decodable expense in file order
    pub fn load_all(&self) -> TrackerResult<Vec<Expense>> {
        load_all(&self.path)
    }
}

/// Append one expense to the file at `path`, creating the file if needed
///
/// The encoded record and its terminator go out in a single write. If the
/// file's last line is unterminated, a terminator is written ahead of the
/// record so the two never merge.
pub fn append(expense: &Expense, path: &Path) -> TrackerResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| TrackerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut line = String::new();
    if !ends_with_newline(&mut file)
        .map_err(|e| TrackerError::Io(format!("Failed to read {}: {}", path.display(), e)))?
    {
        line.push('\n');
    }
    line.push_str(&codec::encode(expense));
    line.push('\n');

    file.write_all(line.as_bytes())
        .map_err(|e| TrackerError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    file.flush()
        .map_err(|e| TrackerError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;

    info!("Appended expense to {}: {}", path.display(), expense);
    Ok(())
}

/// True for an empty file or one whose last byte is a line terminator
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Load every decodable expense from the file at `path`
///
/// A missing file means nothing has been recorded yet and yields an empty list.
pub fn load_all(path: &Path) -> TrackerResult<Vec<Expense>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No expense file at {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(TrackerError::Io(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .map_err(|e| TrackerError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let mut expenses = Vec::new();
    let mut skipped = 0;

    for (index, raw) in contents.split(|&b| b == b'\n').enumerate() {
        let line_num = index + 1;

        let Ok(line) = std::str::from_utf8(raw) else {
            warn!("Skipping line {} of {}: not valid UTF-8", line_num, path.display());
            skipped += 1;
            continue;
        };

        if line.trim().is_empty() {
            continue;
        }

        match codec::decode(line) {
            Ok(expense) => expenses.push(expense),
            Err(e) => {
                warn!("Skipping line {} of {}: {}", line_num, path.display(), e);
                skipped += 1;
            }
        }
    }

    debug!(
        "Loaded {} expenses from {} ({} malformed lines skipped)",
        expenses.len(),
        path.display(),
        skipped
    );

    Ok(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store() -> (TempDir, ExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));
        (temp_dir, store)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_temp_dir, store) = create_test_store();

        assert!(!store.path().exists());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_creates_file_with_one_line_per_record() {
        let (_temp_dir, store) = create_test_store();

        store
            .append(&Expense::categorized("Coffee", 3.5, Category::Food, date(2024, 1, 5)))
            .unwrap();
        store
            .append(&Expense::categorized("Rent", 500.0, Category::Home, date(2024, 1, 1)))
            .unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "Coffee,3.5,Food,2024-01-05\nRent,500.0,Home,2024-01-01\n"
        );
    }

    #[test]
    fn test_load_preserves_file_order() {
        let (_temp_dir, store) = create_test_store();
        let expenses = vec![
            Expense::categorized("Snack", 2.0, Category::Food, date(2024, 2, 10)),
            Expense::categorized("Coffee", 3.5, Category::Food, date(2024, 1, 5)),
            Expense::categorized("Taxi", 18.25, Category::Travel, date(2024, 1, 20)),
        ];

        for expense in &expenses {
            store.append(expense).unwrap();
        }

        assert_eq!(store.load_all().unwrap(), expenses);
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let (_temp_dir, store) = create_test_store();
        fs::write(
            store.path(),
            "Coffee,3.50,Food,2024-01-05\n\
             Broken line\n\
             Tea,2.00,Food,not-a-date\n\
             Cake,lots,Food,2024-01-06\n\
             \n\
             Rent,500.00,Home,2024-01-01\n\
             Name,with,too,many,fields\n",
        )
        .unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(
            loaded,
            vec![
                Expense::new("Coffee", 3.5, "Food", date(2024, 1, 5)),
                Expense::new("Rent", 500.0, "Home", date(2024, 1, 1)),
            ]
        );
    }

    #[test]
    fn test_load_skips_invalid_utf8() {
        let (_temp_dir, store) = create_test_store();
        let mut contents = b"Coffee,3.50,Food,2024-01-05\n".to_vec();
        contents.extend_from_slice(&[0xff, 0xfe, b',', b'1', b'\n']);
        contents.extend_from_slice(b"Rent,500.00,Home,2024-01-01");
        fs::write(store.path(), contents).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].name(), "Rent");
    }

    #[test]
    fn test_append_to_unwritable_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("missing").join("expenses.csv"));

        let result = store.append(&Expense::new("Coffee", 3.5, "Food", date(2024, 1, 5)));

        assert!(matches!(result, Err(TrackerError::Io(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_after_existing_history() {
        let (_temp_dir, store) = create_test_store();
        fs::write(store.path(), "Coffee,3.50,Food,2024-01-05\n").unwrap();

        store
            .append(&Expense::categorized("Bus", 1.75, Category::Travel, date(2024, 1, 7)))
            .unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].amount(), 1.75);
    }

    #[test]
    fn test_append_after_unterminated_last_line() {
        let (_temp_dir, store) = create_test_store();
        fs::write(store.path(), "Rent,500.00,Home,2024-01-01").unwrap();

        store
            .append(&Expense::categorized("Coffee", 3.5, Category::Food, date(2024, 1, 5)))
            .unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "Rent,500.00,Home,2024-01-01\nCoffee,3.5,Food,2024-01-05\n"
        );
        assert_eq!(
            store.load_all().unwrap(),
            vec![
                Expense::new("Rent", 500.0, "Home", date(2024, 1, 1)),
                Expense::new("Coffee", 3.5, "Food", date(2024, 1, 5)),
            ]
        );
    }
}
