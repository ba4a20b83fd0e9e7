use crate::session::RetryPolicy;
use shared::models::RoomSettings;
use std::path::PathBuf;
use std::time::Duration;

/// Planner configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Directory for the layout database |
/// | LOG_LEVEL | info | tracing filter when RUST_LOG is unset |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (none) | Daily rolling log files go here when set |
/// | PLANNER_SCOPE | default | Which saved plan to open |
/// | ROOM_WIDTH | 1200 | Room width for a new plan |
/// | ROOM_HEIGHT | 800 | Room height for a new plan |
/// | GRID_SIZE | 20 | Grid size for a new plan |
/// | SNAP_TO_GRID | true | Snap geometry for a new plan |
/// | PERSIST_MAX_RETRIES | 3 | Save retries after the first attempt |
/// | PERSIST_RETRY_BASE_MS | 200 | First retry delay, doubled each retry |
///
/// Room values only seed a plan that has never been saved; a loaded plan
/// keeps its own settings.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub work_dir: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub scope: String,
    pub room_width: f64,
    pub room_height: f64,
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub persist_max_retries: u32,
    pub persist_retry_base_ms: u64,
}

impl PlannerConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            scope: std::env::var("PLANNER_SCOPE").unwrap_or_else(|_| "default".into()),
            room_width: std::env::var("ROOM_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1200.0),
            room_height: std::env::var("ROOM_HEIGHT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800.0),
            grid_size: std::env::var("GRID_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20.0),
            snap_to_grid: std::env::var("SNAP_TO_GRID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            persist_max_retries: std::env::var("PERSIST_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            persist_retry_base_ms: std::env::var("PERSIST_RETRY_BASE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
        }
    }

    /// Override the work dir and scope
    ///
    /// Mostly for tests
    pub fn with_overrides(work_dir: impl Into<String>, scope: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.scope = scope.into();
        config
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("layouts.redb")
    }

    /// Settings for a plan that has never been saved
    pub fn default_room(&self) -> RoomSettings {
        RoomSettings {
            width: self.room_width,
            height: self.room_height,
            grid_size: self.grid_size,
            snap_to_grid: self.snap_to_grid,
            ..RoomSettings::default()
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.persist_max_retries,
            base_delay: Duration::from_millis(self.persist_retry_base_ms),
            ..RetryPolicy::default()
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
