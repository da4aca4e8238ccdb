//! Mine Core - library behind the `mine` CLI
//!
//! Creates MineAdmin projects from published release archives: resolve a
//! version, download and unpack the archive, apply platform-specific files,
//! and write the project's `.env`.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - version comparison, remote fetching, zip extraction,
//!   composer.json edits, `.env` rendering
//! - **Layer 2: Workflow Orchestration** - [`ProjectCreationWorkflow`] driving the stages
//!   through a [`Console`]
//! - **Layer 3: CLI/TUI Interface** - cliclack-backed [`Console`] (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack console
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use mine_core::{CreateOptions, Language, MineConfig, ProjectCreationWorkflow, ScriptedConsole};
//!
//! let config = MineConfig::from_env()?;
//! let console = ScriptedConsole::new(); // accept every default
//! let report = ProjectCreationWorkflow::new(&config, &console)?
//!     .run(CreateOptions {
//!         project_dir: "demo".into(),
//!         language: Language::Php,
//!         version: "v3.1.0".to_string(),
//!         platform: "swow".to_string(),
//!     })
//!     .await?;
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod project;
pub mod remote;
pub mod version;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::MineConfig;
pub use console::{Answer, Console, Level, Progress, ScriptedConsole};
pub use error::{MineError, Result};
pub use project::{DownloadRequest, Language, LATEST};
pub use remote::{RemoteFetcher, VersionQuery};
pub use version::compare_versions;
pub use workflow::{CreateOptions, CreationReport, ProjectCreationWorkflow, Stage, StageError};

#[cfg(feature = "tui")]
pub use tui::ClackConsole;
