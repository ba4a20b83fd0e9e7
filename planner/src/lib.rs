//! Seat Planner - wedding seating chart core
//!
//! # Overview
//!
//! The in-memory seating model (guests, tables, fixtures, groups, room),
//! the rules that keep guest↔table assignment consistent, and the
//! collaborators around it:
//!
//! - **Model** (`model`): every mutation, capacity enforcement, advisory reports
//! - **Layout** (`layout`): grid snapping and bounding boxes
//! - **Aggregates** (`aggregates`): meal and dietary counts
//! - **Import** (`import`): roster lines and duplicate-name detection
//! - **Print** (`print`): place cards, escort cards, kitchen summary
//! - **Storage** (`storage`): redb snapshot store
//! - **Session** (`session`): model + background persistence
//!
//! # Module layout
//!
//! ```text
//! planner/src/
//! ├── model/        # SeatingModel and its operations
//! ├── layout/       # snap / bounds
//! ├── import/       # roster + duplicates
//! ├── session/      # PlannerSession, PersistWorker
//! ├── aggregates.rs
//! ├── print.rs
//! ├── storage.rs
//! ├── config.rs
//! ├── logger.rs
//! └── validation.rs
//! ```

pub mod aggregates;
pub mod config;
pub mod import;
pub mod layout;
pub mod logger;
pub mod model;
pub mod print;
pub mod session;
pub mod storage;
pub mod validation;

pub use aggregates::{Aggregates, TableBreakdown, compute_aggregates};
pub use config::PlannerConfig;
pub use import::{DuplicatePolicy, DuplicateWarning, ImportReport, find_duplicates, import_roster};
pub use model::{SeatingError, SeatingModel, SeatingResult};
pub use session::{PersistWorker, PlannerSession, RetryPolicy};
pub use storage::{RedbSnapshotStore, SnapshotStore, StorageError, StorageResult};

pub use logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
  ____             _     ____  _
 / ___|  ___  __ _| |_  |  _ \| | __ _ _ __  _ __   ___ _ __
 \___ \ / _ \/ _` | __| | |_) | |/ _` | '_ \| '_ \ / _ \ '__|
  ___) |  __/ (_| | |_  |  __/| | (_| | | | | | | |  __/ |
 |____/ \___|\__,_|\__| |_|   |_|\__,_|_| |_|_| |_|\___|_|
    "#
    );
}
