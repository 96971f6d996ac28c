mod cli;

use formforge::{backends, batch, config, record, registry};
use formforge_common::JobId;
use formforge_db::models::JobStatus;
use formforge_db::pool::{get_conn, init_pool};
use formforge_db::queries::{file_results, jobs};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "formforge=trace,formforge_db=debug,formforge_common=debug".to_string()
        } else {
            "formforge=info,formforge_db=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Convert {
            files,
            to,
            backend,
            uploads_dir,
            output_dir,
            job_id,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_convert(
                files,
                &to,
                backend.as_deref(),
                uploads_dir,
                output_dir,
                job_id,
                cli.config.as_deref(),
            ))
        }
        Commands::Targets { from } => list_targets(&from, cli.config.as_deref()),
        Commands::Formats => list_formats(cli.config.as_deref()),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("formforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_convert(
    files: Vec<String>,
    to: &str,
    backend: Option<&str>,
    uploads_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    job_id: Option<Uuid>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let uploads_dir = uploads_dir.unwrap_or_else(|| config.storage.uploads_dir.clone());
    let output_dir = output_dir.unwrap_or_else(|| config.storage.output_dir.clone());

    // Determine data directory from config, config path, or current directory
    let data_dir = config
        .storage
        .data_dir
        .clone()
        .or_else(|| {
            config_path
                .and_then(|p| p.parent())
                .map(|p| p.to_path_buf())
        })
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let db_path = data_dir.join("formforge.db");
    tracing::info!("Recording results in {}", db_path.display());
    let pool = init_pool(&db_path.to_string_lossy())?;

    let registry = Arc::new(registry::default_registry(&config.tools));

    let job_id = job_id.map(JobId::from).unwrap_or_default();
    {
        let conn = get_conn(&pool)?;
        jobs::create_job(&conn, job_id, files.len() as i64)?;
        jobs::start_job(&conn, job_id)?;
    }
    tracing::info!(
        "Starting job {}: {} file(s) -> {}",
        job_id,
        files.len(),
        to
    );

    let sink = Arc::new(record::DbResultSink::new(pool.clone()));
    let orchestrator =
        batch::BatchOrchestrator::new(registry, sink, config.conversion.chunk_size);

    let run_result = orchestrator
        .run(&files, &uploads_dir, &output_dir, to, backend, job_id)
        .await;

    let conn = get_conn(&pool)?;
    let status = if run_result.is_ok() {
        JobStatus::Completed
    } else {
        JobStatus::Failed
    };
    jobs::finish_job(&conn, job_id, status)?;

    let results = file_results::list_results_for_job(&conn, job_id)?;
    for result in &results {
        println!(
            "{} -> {} [{}]",
            result.file_name, result.output_file_name, result.status
        );
    }
    if results.len() < files.len() {
        tracing::warn!(
            "{} of {} files have no recorded result (their chunk was aborted by a reconciliation failure)",
            files.len() - results.len(),
            files.len()
        );
    }

    run_result?;
    Ok(())
}

fn list_targets(from: &str, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let registry = registry::default_registry(&config.tools);
    let index = registry::index::build_index(&registry);

    match index.possible_targets(from) {
        Some(by_backend) => {
            let mut backends: Vec<_> = by_backend.iter().collect();
            backends.sort_by_key(|(name, _)| name.as_str());
            for (backend, targets) in backends {
                let targets: Vec<_> = targets.iter().map(String::as_str).collect();
                println!("{}: {}", backend, targets.join(", "));
            }
        }
        None => println!("No registered backend accepts .{}", from),
    }

    Ok(())
}

fn list_formats(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let registry = registry::default_registry(&config.tools);
    let index = registry::index::build_index(&registry);

    for backend in registry.iter() {
        println!("{}", backend.name());
        if let Some(inputs) = index.inputs_for(backend.name()) {
            let inputs: Vec<_> = inputs.iter().map(String::as_str).collect();
            println!("  from: {}", inputs.join(", "));
        }
        if let Some(targets) = index.targets_for(backend.name()) {
            let targets: Vec<_> = targets.iter().map(String::as_str).collect();
            println!("  to:   {}", targets.join(", "));
        }
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    for info in backends::tools::check_tools(&config.tools) {
        if info.available {
            println!(
                "{:12} OK  {}",
                info.name,
                info.version.as_deref().unwrap_or("(version unknown)")
            );
        } else {
            println!("{:12} NOT FOUND", info.name);
        }
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(path)?;
    println!("Configuration is valid");
    println!("  chunk size: {}", config.conversion.chunk_size);
    println!("  uploads dir: {}", config.storage.uploads_dir.display());
    println!("  output dir: {}", config.storage.output_dir.display());
    Ok(())
}
