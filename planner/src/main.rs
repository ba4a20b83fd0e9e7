use anyhow::Context;
use seat_planner::{
    DuplicatePolicy, PlannerConfig, PlannerSession, RedbSnapshotStore, init_logger_with_file, print_banner,
};
use std::sync::Arc;

/// Open the configured plan, optionally import a roster file, print a summary
///
/// Usage: `seat-planner [roster.txt]`, one guest per line, `Name @3` seats at table 3.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    let config = PlannerConfig::from_env();
    init_logger_with_file(Some(config.log_level.as_str()), config.log_json, config.log_dir.as_deref());

    print_banner();
    tracing::info!(work_dir = %config.work_dir, scope = %config.scope, "Seat planner starting");

    // 2. Storage + session
    std::fs::create_dir_all(&config.work_dir)
        .with_context(|| format!("creating work dir {}", config.work_dir))?;
    let store = RedbSnapshotStore::open(config.database_path()).context("opening layout database")?;
    let mut session = PlannerSession::open(Arc::new(store), config.scope.clone(), config.default_room())
        .context("loading seating plan")?;
    session.spawn_persist_worker(config.retry_policy());

    // 3. Optional roster import
    let import = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading roster {path}"))?;
            Some(session.import_roster(text.lines(), DuplicatePolicy::SkipExact))
        }
        None => None,
    };

    // 4. Summary
    let model = session.model();
    let summary = serde_json::json!({
        "scope": session.scope(),
        "tables": model.tables().len(),
        "guests": model.guests().len(),
        "unassigned": model.unassigned_guests().len(),
        "keep_apart_conflicts": model.keep_apart_conflicts(),
        "separated_partners": model.separated_partners(),
        "overlapping_tables": model.overlapping_tables(),
        "kitchen": model.kitchen_summary(),
        "import": import,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    // 5. Drain pending saves
    session.shutdown().await;
    tracing::info!("Seat planner stopped");
    Ok(())
}
