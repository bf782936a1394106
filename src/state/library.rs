use rusqlite::{Connection, ErrorCode};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use super::data::{CandidateFile, FileKind, FileRecord};
use crate::error::StorageError;

/// The Library manages the SQLite catalog database.
/// It stores one row per discovered media file and answers the
/// token-filter queries the browser runs on every filter change.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Create a new Library instance and initialize the database.
    ///
    /// The database file is created in the user's data directory:
    /// - Linux: ~/.local/share/asset-browser/catalog.db
    /// - macOS: ~/Library/Application Support/asset-browser/catalog.db
    /// - Windows: %APPDATA%\asset-browser\catalog.db
    pub fn new() -> Result<Self, StorageError> {
        Self::open(Self::get_db_path())
    }

    /// Open (or create) the catalog database at an explicit path.
    pub fn open(db_path: PathBuf) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;

        let mut library = Library { conn, db_path };
        library.init_schema()?;

        Ok(library)
    }

    /// Get the path where the database should be stored
    fn get_db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(|| dirs::home_dir())
            .expect("Could not determine user data directory");

        path.push("asset-browser");
        path.push("catalog.db");
        path
    }

    /// Initialize the database schema.
    /// Creates all necessary tables and indexes if they don't exist.
    fn init_schema(&mut self) -> Result<(), StorageError> {
        // Create files table
        // One row per discovered media file; path is the natural key
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS files (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL,
                path            TEXT NOT NULL UNIQUE,
                ext             TEXT NOT NULL,
                size            INTEGER NOT NULL,
                kind            TEXT NOT NULL,
                indexed_at      INTEGER NOT NULL
            )",
            [],
        )?;

        // Tag tables for a future tagging workflow; no query in the
        // browser touches them yet
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tags (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL UNIQUE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS file_tags (
                file_id         INTEGER NOT NULL,
                tag_id          INTEGER NOT NULL,
                PRIMARY KEY (file_id, tag_id),
                FOREIGN KEY(file_id) REFERENCES files(id) ON DELETE CASCADE,
                FOREIGN KEY(tag_id) REFERENCES tags(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // Create index for fast kind-scoped queries
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_files_kind
             ON files(kind)",
            [],
        )?;

        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Get a count of files in the catalog
    pub fn file_count(&self) -> Result<i64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Insert every candidate whose path is not already in the catalog.
    ///
    /// The whole batch runs inside one transaction: either all qualifying
    /// inserts land or none do. Duplicate paths are skipped silently, not
    /// reported as errors. Returns the number of rows actually inserted.
    pub fn upsert_all(&mut self, candidates: &[CandidateFile]) -> Result<usize, StorageError> {
        let now = chrono::Utc::now().timestamp();

        let tx = self.conn.transaction()?;
        let mut inserted = 0;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO files (name, path, ext, size, kind, indexed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            for candidate in candidates {
                let result = stmt.execute(rusqlite::params![
                    candidate.name,
                    candidate.path,
                    candidate.ext,
                    candidate.size as i64,
                    candidate.kind.as_str(),
                    now,
                ]);

                match result {
                    Ok(_) => inserted += 1,
                    Err(rusqlite::Error::SqliteFailure(err, _))
                        if err.code == ErrorCode::ConstraintViolation =>
                    {
                        // Path already catalogued, skip
                    }
                    // Any other failure aborts the batch; dropping the
                    // transaction rolls back everything inserted so far
                    Err(e) => return Err(e.into()),
                }
            }
        }

        tx.commit()?;
        Ok(inserted)
    }

    /// Evaluate a token-set filter against the catalog.
    ///
    /// Empty `tokens` returns every record of `kind`. Otherwise each
    /// distinct token fetches its candidate set (records of `kind` whose
    /// name contains the token, case-sensitive) and the sets are
    /// intersected (`match_all`) or unioned in memory. The per-token
    /// fetches are plain SELECTs, so a filter evaluation leaves no trace
    /// in the database and cannot collide with a concurrent one.
    pub fn query_by_tokens(
        &self,
        kind: FileKind,
        tokens: &[String],
        match_all: bool,
    ) -> Result<Vec<FileRecord>, StorageError> {
        // Repeated identical tokens must not count twice toward the
        // match-all threshold
        let mut distinct: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();
        for token in tokens {
            if !token.is_empty() && seen.insert(token.as_str()) {
                distinct.push(token.as_str());
            }
        }

        if distinct.is_empty() {
            return self.all_of_kind(kind);
        }

        let mut by_id: HashMap<i64, FileRecord> = HashMap::new();
        let mut combined: Option<HashSet<i64>> = None;

        for token in distinct {
            let matches = self.records_matching(kind, token)?;
            let ids: HashSet<i64> = matches.iter().map(|r| r.id).collect();

            for record in matches {
                by_id.entry(record.id).or_insert(record);
            }

            combined = Some(match combined {
                None => ids,
                Some(acc) if match_all => acc.intersection(&ids).copied().collect(),
                Some(acc) => acc.union(&ids).copied().collect(),
            });

            if match_all && combined.as_ref().is_some_and(|s| s.is_empty()) {
                // Intersection already empty, no later token can revive it
                break;
            }
        }

        let mut records: Vec<FileRecord> = combined
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| by_id.remove(&id))
            .collect();

        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    /// Get all records of one kind, ordered by display name
    fn all_of_kind(&self, kind: FileKind) -> Result<Vec<FileRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, path, ext, size, kind FROM files
             WHERE kind = ?1 ORDER BY name",
        )?;

        let record_iter = stmt.query_map([kind.as_str()], record_from_row)?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }

        Ok(records)
    }

    /// Get the records of one kind whose name contains `token` as a
    /// case-sensitive substring. instr() instead of LIKE because LIKE
    /// is case-insensitive for ASCII in SQLite.
    fn records_matching(
        &self,
        kind: FileKind,
        token: &str,
    ) -> Result<Vec<FileRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, path, ext, size, kind FROM files
             WHERE kind = ?1 AND instr(name, ?2) > 0",
        )?;

        let record_iter = stmt.query_map(rusqlite::params![kind.as_str(), token], record_from_row)?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }

        Ok(records)
    }
}

/// Map one `files` row onto a FileRecord
fn record_from_row(row: &rusqlite::Row) -> rusqlite::Result<FileRecord> {
    let kind_str: String = row.get(5)?;
    let kind = FileKind::from_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            rusqlite::types::Type::Text,
            format!("unknown file kind: {}", kind_str).into(),
        )
    })?;

    Ok(FileRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        path: row.get(2)?,
        ext: row.get(3)?,
        size: row.get::<_, i64>(4)? as u64,
        kind,
    })
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_library() -> (TempDir, Library) {
        let dir = TempDir::new().unwrap();
        let library = Library::open(dir.path().join("catalog.db")).unwrap();
        (dir, library)
    }

    fn texture(name: &str) -> CandidateFile {
        CandidateFile {
            name: name.to_string(),
            path: format!("/assets/{}", name),
            ext: ".png".to_string(),
            size: 1024,
            kind: FileKind::Texture,
        }
    }

    fn audio(name: &str) -> CandidateFile {
        CandidateFile {
            name: name.to_string(),
            path: format!("/assets/{}", name),
            ext: ".ogg".to_string(),
            size: 4096,
            kind: FileKind::Audio,
        }
    }

    /// The corpus used by the token-semantics tests
    fn loot_corpus() -> Vec<CandidateFile> {
        vec![
            texture("sword_01.png"),
            texture("sword_02.png"),
            texture("shield_01.png"),
        ]
    }

    #[test]
    fn round_trip_preserves_record_fields() {
        let (_dir, mut library) = test_library();

        library.upsert_all(&[texture("sword_01.png")]).unwrap();

        let records = library
            .query_by_tokens(FileKind::Texture, &[], true)
            .unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.name, "sword_01.png");
        assert_eq!(record.path, "/assets/sword_01.png");
        assert_eq!(record.ext, ".png");
        assert_eq!(record.size, 1024);
        assert_eq!(record.kind, FileKind::Texture);
        assert!(record.id > 0);
    }

    #[test]
    fn second_ingest_of_same_paths_inserts_nothing() {
        let (_dir, mut library) = test_library();

        let first = library.upsert_all(&loot_corpus()).unwrap();
        assert_eq!(first, 3);

        let second = library.upsert_all(&loot_corpus()).unwrap();
        assert_eq!(second, 0);

        assert_eq!(library.file_count().unwrap(), 3);
    }

    #[test]
    fn duplicates_within_one_batch_collapse() {
        let (_dir, mut library) = test_library();

        let inserted = library
            .upsert_all(&[texture("sword_01.png"), texture("sword_01.png")])
            .unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(library.file_count().unwrap(), 1);
    }

    #[test]
    fn match_all_requires_every_token() {
        let (_dir, mut library) = test_library();
        library.upsert_all(&loot_corpus()).unwrap();

        let records = library
            .query_by_tokens(
                FileKind::Texture,
                &["sword".to_string(), "01".to_string()],
                true,
            )
            .unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["sword_01.png"]);
    }

    #[test]
    fn match_any_unions_tokens() {
        let (_dir, mut library) = test_library();
        let mut corpus = loot_corpus();
        corpus.push(texture("potion_01.png"));
        library.upsert_all(&corpus).unwrap();

        let records = library
            .query_by_tokens(
                FileKind::Texture,
                &["sword".to_string(), "shield".to_string()],
                false,
            )
            .unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["shield_01.png", "sword_01.png", "sword_02.png"]);
    }

    #[test]
    fn empty_token_list_returns_full_kind() {
        let (_dir, mut library) = test_library();
        let mut corpus = loot_corpus();
        corpus.push(audio("clang.ogg"));
        library.upsert_all(&corpus).unwrap();

        // match_all=true with zero tokens is defined as "return all"
        let textures = library
            .query_by_tokens(FileKind::Texture, &[], true)
            .unwrap();
        assert_eq!(textures.len(), 3);

        let audio_files = library.query_by_tokens(FileKind::Audio, &[], true).unwrap();
        assert_eq!(audio_files.len(), 1);
        assert_eq!(audio_files[0].name, "clang.ogg");
    }

    #[test]
    fn repeated_tokens_do_not_tighten_match_all() {
        let (_dir, mut library) = test_library();
        library.upsert_all(&loot_corpus()).unwrap();

        let records = library
            .query_by_tokens(
                FileKind::Texture,
                &["sword".to_string(), "sword".to_string()],
                true,
            )
            .unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["sword_01.png", "sword_02.png"]);
    }

    #[test]
    fn token_match_is_case_sensitive() {
        let (_dir, mut library) = test_library();
        library.upsert_all(&[texture("Sword_01.png")]).unwrap();

        let lower = library
            .query_by_tokens(FileKind::Texture, &["sword".to_string()], true)
            .unwrap();
        assert!(lower.is_empty());

        let upper = library
            .query_by_tokens(FileKind::Texture, &["Sword".to_string()], true)
            .unwrap();
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn queries_are_scoped_to_the_requested_kind() {
        let (_dir, mut library) = test_library();
        library
            .upsert_all(&[texture("sword_01.png"), audio("sword_swing.ogg")])
            .unwrap();

        let records = library
            .query_by_tokens(FileKind::Texture, &["sword".to_string()], false)
            .unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["sword_01.png"]);
    }

    #[test]
    fn filtering_leaves_the_catalog_untouched() {
        let (_dir, mut library) = test_library();
        library.upsert_all(&loot_corpus()).unwrap();

        let before_count = library.file_count().unwrap();
        let before_rows = library.query_by_tokens(FileKind::Texture, &[], true).unwrap();

        library
            .query_by_tokens(
                FileKind::Texture,
                &["sword".to_string(), "01".to_string()],
                true,
            )
            .unwrap();
        library
            .query_by_tokens(FileKind::Texture, &["shield".to_string()], false)
            .unwrap();

        assert_eq!(library.file_count().unwrap(), before_count);
        assert_eq!(
            library.query_by_tokens(FileKind::Texture, &[], true).unwrap(),
            before_rows
        );
    }

    #[test]
    fn match_any_excludes_records_matching_no_token() {
        let (_dir, mut library) = test_library();
        let mut corpus = loot_corpus();
        corpus.push(texture("helmet_03.png"));
        library.upsert_all(&corpus).unwrap();

        let records = library
            .query_by_tokens(
                FileKind::Texture,
                &["sword".to_string(), "shield".to_string()],
                false,
            )
            .unwrap();

        assert!(records.iter().all(|r| r.name != "helmet_03.png"));
        assert_eq!(records.len(), 3);
    }
}
