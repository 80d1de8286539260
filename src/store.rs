use rusqlite::{Connection, Row};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::filter::BloodSugarFilter;
use crate::record::Record;
use crate::sqlite::{CreateOperation, DeleteOperation, Query, QueryOperator, ReadOperation, SqlQuery};

const COLUMNS: [&str; 6] = ["id", "email", "bloodsugar", "date", "time", "notes"];

/// Seed rows written by [`RecordStore::populate_table`]:
/// (blood sugar, date, time, notes), all owned by `test@test.com`.
const SAMPLE_EMAIL: &str = "test@test.com";
const SAMPLE_READINGS: [(i32, &str, &str, &str); 6] = [
    (48, "2015-12-01", "03:30", "No sprinkles, extra filling."),
    (36, "2015-12-16", "13:50", "Half chocolate, half vanilla."),
    (24, "2015-12-02", "12:30", "Raspberry filling, vanilla cupcakes, sprinkles"),
    (12, "2015-12-05", "15:00", "No filling, buttercream frosting, sprinkles."),
    (48, "2015-12-07", "06:30", "Red velvet with cream cheese icing."),
    (24, "2015-12-15", "15:00", "Half vanilla, half red velvet, icing and sprinkles."),
];

/// Access to the readings table of one SQLite file.
///
/// The handle holds configuration only. Every operation opens its own
/// connection, runs a single statement and drops the connection before
/// returning, so calls are independent of each other.
#[derive(Debug, Clone)]
pub struct RecordStore {
    config: StoreConfig,
}

impl RecordStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Store for the default `user` table at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Self {
        Self::new(StoreConfig::new(db_path))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Insert `record` and return the id the store assigned to it.
    ///
    /// `record.id` is ignored.
    pub fn create_record(&self, record: &Record) -> Result<i64> {
        let query = CreateOperation::new(self.config.table_name())
            .with_value("email", record.email.as_str())
            .with_value("bloodsugar", record.blood_sugar)
            .with_value("date", record.date.as_str())
            .with_value("time", record.time.as_str())
            .with_value("notes", record.notes.as_str())
            .to_sql();

        let conn = self.connect()?;
        self.execute(&conn, &query)?;
        let id = conn.last_insert_rowid();
        debug!("inserted reading {} for {}", id, record.email);
        Ok(id)
    }

    /// Readings whose email starts with `email`, dated within
    /// `[start_date, end_date]` and inside the range selected by `filter`,
    /// ordered by email, date and time.
    pub fn retrieve_records(
        &self,
        email: &str,
        start_date: &str,
        end_date: &str,
        filter: impl Into<BloodSugarFilter>,
    ) -> Result<Vec<Record>> {
        let filter = filter.into();
        let mut query = Query::new()
            .with_condition("email", QueryOperator::Like(format!("{email}%")))
            .with_condition(
                "date",
                QueryOperator::Between(start_date.into(), end_date.into()),
            );
        if let Some(predicate) = filter.predicate("bloodsugar", self.config.thresholds) {
            query = query.with_predicate(predicate);
        }
        debug!(
            "retrieving readings email={}% dates={}..={} filter={}",
            email, start_date, end_date, filter
        );
        self.query_records(&self.select().with_query(query).to_sql())
    }

    /// Every reading, in the same order as [`RecordStore::retrieve_records`].
    pub fn retrieve_all_records(&self) -> Result<Vec<Record>> {
        self.query_records(&self.select().to_sql())
    }

    /// Delete the reading with `id`. Succeeds when no such row exists.
    pub fn delete_record(&self, id: i64) -> Result<()> {
        let query = DeleteOperation::new(
            self.config.table_name(),
            Query::new().with_condition("id", QueryOperator::Equal(id.into())),
        )
        .to_sql();

        let conn = self.connect()?;
        let deleted = self.execute(&conn, &query)?;
        debug!("deleted {} row(s) with id {}", deleted, id);
        Ok(())
    }

    /// Create the readings table. Fails if it already exists.
    pub fn create_table(&self) -> Result<()> {
        info!(
            "creating table {} at path: {}",
            self.config.table_name(),
            self.config.db_path.display()
        );
        let conn = self.connect()?;
        self.execute(&conn, &SqlQuery::new(&self.config.table.create_sql()))?;
        Ok(())
    }

    /// Drop the readings table and all of its rows, if present.
    pub fn drop_table(&self) -> Result<()> {
        info!(
            "dropping table {} at path: {}",
            self.config.table_name(),
            self.config.db_path.display()
        );
        let conn = self.connect()?;
        self.execute(&conn, &SqlQuery::new(&self.config.table.drop_sql()))?;
        Ok(())
    }

    /// Insert the six sample readings.
    pub fn populate_table(&self) -> Result<()> {
        for (blood_sugar, date, time, notes) in SAMPLE_READINGS {
            self.create_record(&Record::new(SAMPLE_EMAIL, blood_sugar, date, time, notes))?;
        }
        info!(
            "populated table {} with {} sample readings",
            self.config.table_name(),
            SAMPLE_READINGS.len()
        );
        Ok(())
    }

    fn select(&self) -> ReadOperation {
        ReadOperation::new(self.config.table_name())
            .with_fields(&COLUMNS)
            .order_by("email", true)
            .order_by("date", true)
            .order_by("time", true)
            .order_by("id", true)
    }

    fn connect(&self) -> Result<Connection> {
        debug!("opening sqlite store at path: {}", self.config.db_path.display());
        Connection::open(&self.config.db_path).map_err(|e| failed("open", e))
    }

    fn execute(&self, conn: &Connection, query: &SqlQuery) -> Result<usize> {
        debug!("executing: {}", query.statement);
        let params = query.params.as_named();
        conn.execute(&query.statement, params.as_slice())
            .map_err(|e| failed(&query.statement, e))
    }

    fn query_records(&self, query: &SqlQuery) -> Result<Vec<Record>> {
        let conn = self.connect()?;
        debug!("querying: {}", query.statement);
        let run = || -> rusqlite::Result<Vec<Record>> {
            let mut stmt = conn.prepare(&query.statement)?;
            let params = query.params.as_named();
            let rows = stmt.query_map(params.as_slice(), row_to_record)?;
            rows.collect()
        };
        let records = run().map_err(|e| failed(&query.statement, e))?;
        debug!("query returned {} reading(s)", records.len());
        Ok(records)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get("id")?,
        email: row.get("email")?,
        blood_sugar: row.get("bloodsugar")?,
        date: row.get("date")?,
        time: row.get("time")?,
        notes: row.get::<_, Option<String>>("notes")?.unwrap_or_default(),
    })
}

fn failed(context: &str, err: rusqlite::Error) -> StoreError {
    warn!("sqlite operation failed ({}): {}", context, err);
    StoreError::from(err)
}
