//! Conversion job query operations.

use chrono::{DateTime, Utc};
use formforge_common::{Error, JobId, Result};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::models::{Job, JobStatus};

fn job_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Job> {
    Ok(Job {
        id: JobId::from(Uuid::parse_str(&row.get::<_, String>(0)?).unwrap()),
        status: row
            .get::<_, String>(1)?
            .parse()
            .unwrap_or(JobStatus::Pending),
        num_files: row.get(2)?,
        created_at: DateTime::parse_from_rfc3339(&row.get::<_, String>(3)?)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        finished_at: row
            .get::<_, Option<String>>(4)?
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)),
    })
}

/// Create a new batch job.
pub fn create_job(conn: &Connection, id: JobId, num_files: i64) -> Result<Job> {
    let now = Utc::now();

    conn.execute(
        "INSERT INTO jobs (id, status, num_files, created_at) VALUES (?, ?, ?, ?)",
        params![
            id.to_string(),
            JobStatus::Pending.as_str(),
            num_files,
            now.to_rfc3339(),
        ],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Job {
        id,
        status: JobStatus::Pending,
        num_files,
        created_at: now,
        finished_at: None,
    })
}

/// Get a job by ID.
pub fn get_job(conn: &Connection, id: JobId) -> Result<Job> {
    conn.query_row(
        "SELECT id, status, num_files, created_at, finished_at FROM jobs WHERE id = ?",
        [id.to_string()],
        job_from_row,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => Error::database(format!("job {} not found", id)),
        _ => Error::database(e.to_string()),
    })
}

/// Mark a job as running.
pub fn start_job(conn: &Connection, id: JobId) -> Result<()> {
    conn.execute(
        "UPDATE jobs SET status = ? WHERE id = ?",
        params![JobStatus::Running.as_str(), id.to_string()],
    )
    .map_err(|e| Error::database(e.to_string()))?;
    Ok(())
}

/// Mark a job as finished with the given terminal status.
pub fn finish_job(conn: &Connection, id: JobId, status: JobStatus) -> Result<()> {
    conn.execute(
        "UPDATE jobs SET status = ?, finished_at = ? WHERE id = ?",
        params![status.as_str(), Utc::now().to_rfc3339(), id.to_string()],
    )
    .map_err(|e| Error::database(e.to_string()))?;
    Ok(())
}
