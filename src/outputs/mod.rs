//! Persistent outputs of a run.
//!
//! # Submodules
//!
//! - [`archive`]: The incremental JSON archive shared by all runs
//! - [`prompt`]: Optional copy of each report on disk
//!
//! # Output Structure
//!
//! ```text
//! ./
//! ├── news_data.json           # archive (configurable)
//! └── reports/                 # only when report_dir is set
//!     ├── 2025-05-06_macro.txt
//!     └── 2025-05-06_vip.txt
//! ```

pub mod archive;
pub mod prompt;
