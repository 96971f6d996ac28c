//! Per-file conversion result operations.
//!
//! The orchestrator appends one row per finished file. Rows are never updated
//! or deleted; callers compare requested vs recorded counts to detect a chunk
//! that was aborted by a reconciliation failure.

use chrono::{DateTime, Utc};
use formforge_common::{Error, JobId, Result};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::models::FileResult;

/// Record the result of a single file conversion.
pub fn record_file_result(
    conn: &Connection,
    job_id: JobId,
    file_name: &str,
    output_file_name: &str,
    status: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO file_results (job_id, file_name, output_file_name, status, created_at)
         VALUES (?, ?, ?, ?, ?)",
        params![
            job_id.to_string(),
            file_name,
            output_file_name,
            status,
            Utc::now().to_rfc3339(),
        ],
    )
    .map_err(|e| Error::database(e.to_string()))?;
    Ok(())
}

/// List all recorded results for a job, oldest first.
pub fn list_results_for_job(conn: &Connection, job_id: JobId) -> Result<Vec<FileResult>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, job_id, file_name, output_file_name, status, created_at
             FROM file_results WHERE job_id = ? ORDER BY id",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let rows = stmt
        .query_map([job_id.to_string()], |row| {
            Ok(FileResult {
                id: row.get(0)?,
                job_id: JobId::from(Uuid::parse_str(&row.get::<_, String>(1)?).unwrap()),
                file_name: row.get(2)?,
                output_file_name: row.get(3)?,
                status: row.get(4)?,
                created_at: DateTime::parse_from_rfc3339(&row.get::<_, String>(5)?)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
            })
        })
        .map_err(|e| Error::database(e.to_string()))?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| Error::database(e.to_string()))
}

/// Count recorded results for a job.
pub fn count_results_for_job(conn: &Connection, job_id: JobId) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM file_results WHERE job_id = ?",
        [job_id.to_string()],
        |row| row.get(0),
    )
    .map_err(|e| Error::database(e.to_string()))
}
