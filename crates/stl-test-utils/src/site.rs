//! [`TestSite`] fixture for staging2live test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use stl_db::{DataStore, Row, SqliteStore, Value};
use tempfile::TempDir;

/// Table prefix of the production schema in a [`TestSite`].
pub const PRODUCTION_PREFIX: &str = "wp_";

/// Table prefix of the staging schema in a [`TestSite`].
pub const STAGING_PREFIX: &str = "wp_staging_";

/// WordPress-shaped tables created in both schemas.
const SCHEMA: &str = "
    CREATE TABLE {p}posts (
        ID INTEGER PRIMARY KEY,
        post_title TEXT NOT NULL DEFAULT '',
        post_status TEXT NOT NULL DEFAULT 'publish',
        post_type TEXT NOT NULL DEFAULT 'post'
    );
    CREATE TABLE {p}postmeta (
        meta_id INTEGER PRIMARY KEY,
        post_id INTEGER NOT NULL DEFAULT 0,
        meta_key TEXT,
        meta_value TEXT
    );
    CREATE TABLE {p}options (
        option_name TEXT PRIMARY KEY,
        option_value TEXT
    );
    CREATE TABLE {p}actionlog (
        message TEXT
    );
";

/// A temporary site with a production tree, a staging tree nested inside
/// it (`<production>/staging`) and a database file holding both schemas.
///
/// # Example
///
/// ```rust,no_run
/// use stl_test_utils::site::TestSite;
///
/// let site = TestSite::new();
/// site.write_staging("a.txt", "X");
/// site.assert_production_missing("a.txt");
/// ```
pub struct TestSite {
    temp_dir: TempDir,
    store: SqliteStore,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("live/staging")).unwrap();

        let store = SqliteStore::open(temp_dir.path().join("site.db")).unwrap();
        for prefix in [PRODUCTION_PREFIX, STAGING_PREFIX] {
            store
                .execute_batch(&SCHEMA.replace("{p}", prefix))
                .unwrap();
        }

        Self { temp_dir, store }
    }

    pub fn production_root(&self) -> PathBuf {
        self.temp_dir.path().join("live")
    }

    pub fn staging_root(&self) -> PathBuf {
        self.production_root().join("staging")
    }

    pub fn database_path(&self) -> PathBuf {
        self.temp_dir.path().join("site.db")
    }

    /// Scratch directory next to the site, for change-list documents.
    pub fn scratch(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    /// A second connection to the site database.
    pub fn open_store(&self) -> SqliteStore {
        SqliteStore::open(self.database_path()).unwrap()
    }

    pub fn write_staging(&self, relative: &str, content: &str) {
        write(&self.staging_root(), relative, content);
    }

    pub fn write_production(&self, relative: &str, content: &str) {
        write(&self.production_root(), relative, content);
    }

    pub fn read_production(&self, relative: &str) -> String {
        fs::read_to_string(self.production_root().join(relative)).unwrap()
    }

    pub fn assert_production_missing(&self, relative: &str) {
        let path = self.production_root().join(relative);
        assert!(!path.exists(), "Expected {} to be absent", path.display());
    }

    /// Insert a row into `<prefix><table>`.
    pub fn insert(&self, prefix: &str, table: &str, values: &[(&str, Value)]) {
        let values: Vec<(String, Value)> = values
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        self.store
            .insert(&format!("{prefix}{table}"), &values)
            .unwrap();
    }

    pub fn insert_staging(&self, table: &str, values: &[(&str, Value)]) {
        self.insert(STAGING_PREFIX, table, values);
    }

    pub fn insert_production(&self, table: &str, values: &[(&str, Value)]) {
        self.insert(PRODUCTION_PREFIX, table, values);
    }

    /// Fetch a production row by its key column.
    pub fn production_row(&self, table: &str, key: &str, id: impl Into<Value>) -> Option<Row> {
        self.store
            .fetch_row(&format!("{PRODUCTION_PREFIX}{table}"), key, &id.into())
            .unwrap()
    }

    pub fn count_production(&self, table: &str) -> i64 {
        self.store
            .connection()
            .query_row(
                &format!("SELECT COUNT(*) FROM \"{PRODUCTION_PREFIX}{table}\""),
                [],
                |row| row.get(0),
            )
            .unwrap()
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
