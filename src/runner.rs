use std::io::Write;
use std::path::PathBuf;

use rusqlite::{params, Connection};
use tracing::{debug, info, warn};

use crate::config::TourConfig;
use crate::error::{Result, TourError};
use crate::queries::{self, NamedQuery};
use crate::schema::{self, tour_schema};
use crate::seed::{self, DepartmentSeed, EmployeeSeed};
use crate::value::{ResultSet, Value};

/// Owns the single connection of a tour run and issues its statements in order.
pub struct Runner {
    conn: Connection,
    path: PathBuf,
}

impl Runner {
    /// Open (or create) the database file and apply connection pragmas.
    pub fn connect(config: &TourConfig) -> Result<Self> {
        let path = config.db_path.clone();
        info!(path = %path.display(), "opening database");
        let conn = match Connection::open(&path) {
            Ok(conn) => conn,
            Err(source) => return Err(TourError::Connection { path, source }),
        };
        if let Err(source) =
            conn.pragma_update(None, "foreign_keys", config.enforce_foreign_keys)
        {
            return Err(TourError::Connection { path, source });
        }
        debug!(
            enforce_foreign_keys = config.enforce_foreign_keys,
            "connection ready"
        );
        Ok(Self { conn, path })
    }

    /// Drop both tour tables (children first) and create them again (parents first).
    pub fn recreate_schema(&self) -> Result<()> {
        let schema = tour_schema();
        for sql in schema
            .drop_statements()
            .into_iter()
            .chain(schema.create_statements())
        {
            debug!(%sql, "schema statement");
            self.conn.execute_batch(&sql).map_err(TourError::Schema)?;
        }
        info!(tables = ?schema.table_names(), "schema recreated");
        Ok(())
    }

    /// Insert the fixed sample rows, departments before employees.
    pub fn seed_data(&self) -> Result<()> {
        self.insert_departments(&seed::DEPARTMENTS)?;
        self.insert_employees(&seed::EMPLOYEES)?;
        info!(
            departments = seed::DEPARTMENTS.len(),
            employees = seed::EMPLOYEES.len(),
            "sample data inserted"
        );
        Ok(())
    }

    /// Insert department rows in one transaction.
    pub fn insert_departments(&self, rows: &[DepartmentSeed]) -> Result<()> {
        let table = schema::DEPARTMENTS;
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx
                .prepare("INSERT INTO departments (dept_id, dept_name) VALUES (?1, ?2)")
                .map_err(|e| TourError::from_insert(table, e))?;
            for row in rows {
                stmt.execute(params![row.dept_id, row.dept_name])
                    .map_err(|e| TourError::from_insert(table, e))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Insert employee rows in one transaction; a failing row rolls back the batch.
    pub fn insert_employees(&self, rows: &[EmployeeSeed]) -> Result<()> {
        let table = schema::EMPLOYEES;
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO employees (emp_id, emp_name, dept_id, salary, hire_date)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(|e| TourError::from_insert(table, e))?;
            for row in rows {
                stmt.execute(params![
                    row.emp_id,
                    row.emp_name,
                    row.dept_id,
                    row.salary(),
                    row.hire_date
                ])
                .map_err(|e| TourError::from_insert(table, e))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Execute one read-only statement and materialize every row.
    pub fn run_named_query(&self, label: &str, sql: &str) -> Result<ResultSet> {
        let query_err = |source: rusqlite::Error| TourError::Query {
            label: label.to_string(),
            source,
        };
        debug!(label, "running query");

        let mut stmt = self.conn.prepare(sql).map_err(query_err)?;
        let columns: Vec<(String, Option<String>)> = stmt
            .columns()
            .iter()
            .map(|column| {
                (
                    column.name().to_string(),
                    column.decl_type().map(str::to_string),
                )
            })
            .collect();

        let mut rows = stmt.query([]).map_err(query_err)?;
        let mut materialized = Vec::new();
        while let Some(row) = rows.next().map_err(query_err)? {
            let mut values = Vec::with_capacity(columns.len());
            for (index, (_, decl_type)) in columns.iter().enumerate() {
                let raw = row.get_ref(index).map_err(query_err)?;
                let value = Value::from_column(raw, decl_type.as_deref()).map_err(|e| {
                    query_err(rusqlite::Error::FromSqlConversionFailure(
                        index,
                        raw.data_type(),
                        Box::new(e),
                    ))
                })?;
                values.push(value);
            }
            materialized.push(values);
        }

        info!(label, rows = materialized.len(), "query finished");
        Ok(ResultSet {
            label: label.to_string(),
            columns: columns.into_iter().map(|(name, _)| name).collect(),
            rows: materialized,
        })
    }

    pub fn run_query(&self, query: &NamedQuery) -> Result<ResultSet> {
        Ok(self
            .run_named_query(query.label, query.sql)?
            .with_money_columns(query.money_columns))
    }

    pub fn row_count(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", table.replace('"', "\"\""));
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|source| TourError::Query {
                label: format!("count {table}"),
                source,
            })
    }

    /// Names of the user tables in the store, sorted.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let tables = self.run_query(&queries::LIST_TABLES)?;
        Ok(tables
            .rows
            .iter()
            .filter_map(|row| row.first().and_then(Value::as_text))
            .map(str::to_string)
            .collect())
    }

    /// Print every demonstration result set, then the table listing.
    pub fn run_showcase<W: Write>(&self, out: &mut W) -> Result<()> {
        for query in &queries::SHOWCASE {
            let result = self.run_query(query)?;
            writeln!(out, "{result}\n")?;
        }
        let tables = self.run_query(&queries::LIST_TABLES)?;
        writeln!(out, "{tables}")?;
        Ok(())
    }

    fn tour<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Connected to {} successfully.", self.path.display())?;
        self.recreate_schema()?;
        self.seed_data()?;
        writeln!(out, "Sample data inserted.\n")?;
        self.run_showcase(out)
    }

    /// Release the connection.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, e)| TourError::Sql(e))?;
        info!(path = %path.display(), "connection closed");
        Ok(())
    }
}

/// Connect, recreate, seed, print every query, and close.
///
/// The connection is closed on every path once it was opened; the first
/// failure is the one returned.
pub fn run<W: Write>(config: &TourConfig, out: &mut W) -> Result<()> {
    let runner = Runner::connect(config)?;
    let outcome = runner.tour(out);
    let closed = runner.close();

    if let (Err(_), Err(close_err)) = (&outcome, &closed) {
        warn!(error = %close_err, "close failed after an earlier error");
    }
    outcome?;
    closed?;
    writeln!(out, "\nConnection closed.")?;
    Ok(())
}
