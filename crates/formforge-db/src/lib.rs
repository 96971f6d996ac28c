//! Formforge-DB: Database schema, migrations, and query operations
//!
//! This crate provides the conversion result store for formforge using SQLite
//! with rusqlite and r2d2 connection pooling. The store is append-only from
//! the orchestrator's point of view: one job row per batch, one file result
//! row per converted file.
//!
//! # Modules
//!
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching database schema
//! - `queries` - Database query operations
//!
//! # Example
//!
//! ```no_run
//! use formforge_db::pool::{init_pool, get_conn};
//! use formforge_db::queries::{jobs, file_results};
//! use formforge_common::JobId;
//!
//! let pool = init_pool("/var/lib/formforge/db.sqlite").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let job = jobs::create_job(&conn, JobId::new(), 3).unwrap();
//! file_results::record_file_result(&conn, job.id, "report.docx", "report.pdf", "Done").unwrap();
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
