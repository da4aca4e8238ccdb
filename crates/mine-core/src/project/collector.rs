//! Interactive `.env` configuration

use super::env_file::{self, ProjectConfiguration, DB_DRIVERS};
use crate::console::{self, Console, Level};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Asks for database and Redis settings and writes the project's `.env`
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigurationCollector;

impl ConfigurationCollector {
    pub fn new() -> Self {
        Self
    }

    /// Run the prompts in their fixed order and return the configuration
    pub fn prompt(&self, console: &dyn Console) -> Result<ProjectConfiguration> {
        console.notify(Level::Info, "Database configuration");
        let drivers: Vec<String> = DB_DRIVERS.iter().map(|d| d.to_string()).collect();
        let db_driver = drivers[console.ask_choice("Database type", &drivers)?].clone();
        let default_port = match db_driver.as_str() {
            "pgsql" => "5432",
            _ => "3306",
        };
        let db_host = console.ask_text("Database host", "127.0.0.1", console::non_empty)?;
        let db_port = console.ask_text("Database port", default_port, console::port_number)?;
        let db_database = console.ask_text("Database name", "mineadmin", console::non_empty)?;
        let db_username = console.ask_text("Database username", "root", console::non_empty)?;
        let db_password = console.ask_text("Database password", "root", console::any_text)?;

        console.notify(Level::Info, "Redis configuration");
        let redis_host = console.ask_text("Redis host", "127.0.0.1", console::non_empty)?;
        let redis_port = console.ask_text("Redis port", "6379", console::port_number)?;
        let redis_auth = console.ask_text(
            "Redis password (leave empty if none)",
            "",
            console::any_text,
        )?;
        let redis_db = console.ask_text("Redis database number", "0", console::index_number)?;

        Ok(ProjectConfiguration {
            db_driver,
            db_host,
            db_port,
            db_database,
            db_username,
            db_password,
            redis_host,
            redis_auth,
            redis_port,
            redis_db,
            jwt_secret: env_file::generate_jwt_secret(),
        })
    }

    /// Prompt, then write `.env` for `project_dir`
    pub fn collect(&self, console: &dyn Console, project_dir: &Path) -> Result<PathBuf> {
        let configuration = self.prompt(console)?;
        let path = configuration.write(project_dir)?;
        console.notify(Level::Success, ".env file created successfully!");
        tracing::debug!("wrote {}", path.display());
        Ok(path)
    }
}
