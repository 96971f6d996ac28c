//! Result recording sink.
//!
//! The orchestrator records one result per file through [`ResultSink`], an
//! append-only operation it never reads back. [`DbResultSink`] is the
//! production implementation; tests substitute an in-memory sink.

use formforge_common::{JobId, Result};
use formforge_db::pool::DbPool;
use formforge_db::queries::file_results;

/// Append-only sink for per-file conversion results.
pub trait ResultSink: Send + Sync {
    /// Record the outcome of one file conversion.
    fn record(
        &self,
        job_id: JobId,
        file_name: &str,
        output_file_name: &str,
        status: &str,
    ) -> Result<()>;
}

/// Result sink backed by the SQLite result store.
pub struct DbResultSink {
    pool: DbPool,
}

impl DbResultSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ResultSink for DbResultSink {
    fn record(
        &self,
        job_id: JobId,
        file_name: &str,
        output_file_name: &str,
        status: &str,
    ) -> Result<()> {
        let conn = formforge_db::pool::get_conn(&self.pool)?;
        file_results::record_file_result(&conn, job_id, file_name, output_file_name, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formforge_db::pool::init_memory_pool;
    use formforge_db::queries::jobs;

    #[test]
    fn test_db_sink_records() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let job = jobs::create_job(&conn, JobId::new(), 1).unwrap();
        drop(conn);

        let sink = DbResultSink::new(pool.clone());
        sink.record(job.id, "report.docx", "report.pdf", "Done")
            .unwrap();

        let conn = pool.get().unwrap();
        let results = file_results::list_results_for_job(&conn, job.id).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].output_file_name, "report.pdf");
    }
}
