//! `.env` rendering for a freshly created project

use crate::error::{MineError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;
use std::path::{Path, PathBuf};

/// Length of the generated JWT secret before encoding (256 bits)
pub const JWT_SECRET_BYTES: usize = 32;

const APP_NAME: &str = "MineAdmin";
const APP_ENV: &str = "dev";
const APP_DEBUG: &str = "false";
const DB_CHARSET: &str = "utf8mb4";
const DB_COLLATION: &str = "utf8mb4_unicode_ci";
const APP_URL: &str = "http://127.0.0.1:9501";

/// Release folders are named `mineadmin-<version>`; `.env` goes beside them
const RELEASE_FOLDER_PREFIX: &str = "mineadmin-";

/// Supported database drivers, default first
pub const DB_DRIVERS: &[&str] = &["mysql", "pgsql"];

/// Values collected from the user plus the generated secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfiguration {
    pub db_driver: String,
    pub db_host: String,
    pub db_port: String,
    pub db_database: String,
    pub db_username: String,
    pub db_password: String,
    pub redis_host: String,
    pub redis_auth: String,
    pub redis_port: String,
    pub redis_db: String,
    pub jwt_secret: String,
}

impl ProjectConfiguration {
    /// Render the `.env` document
    ///
    /// Key names and order are fixed; tooling downstream parses this file.
    pub fn render(&self) -> String {
        format!(
            "APP_NAME={APP_NAME}
APP_ENV={APP_ENV}
APP_DEBUG={APP_DEBUG}

DB_DRIVER={}
DB_HOST={}
DB_PORT={}
DB_DATABASE={}
DB_USERNAME={}
DB_PASSWORD={}
DB_CHARSET={DB_CHARSET}
DB_COLLATION={DB_COLLATION}
DB_PREFIX=

REDIS_HOST={}
REDIS_AUTH={}
REDIS_PORT={}
REDIS_DB={}

APP_URL={APP_URL}

JWT_SECRET={}

MINE_ACCESS_TOKEN=(null) # Your MINE_ACCESS_TOKEN
",
            self.db_driver,
            self.db_host,
            self.db_port,
            self.db_database,
            self.db_username,
            self.db_password,
            self.redis_host,
            self.redis_auth,
            self.redis_port,
            self.redis_db,
            self.jwt_secret,
        )
    }

    /// Write the rendered document to the project's `.env`, returning its path
    pub fn write(&self, project_dir: &Path) -> Result<PathBuf> {
        let path = env_file_path(project_dir);
        std::fs::write(&path, self.render())
            .map_err(|e| MineError::io(format!("failed to create {}", path.display()), e))?;
        Ok(path)
    }
}

/// Where `.env` goes for `project_dir`
///
/// Normally `project_dir/.env`; when `project_dir` itself is a
/// `mineadmin-<version>` release folder, the file goes in its parent.
pub fn env_file_path(project_dir: &Path) -> PathBuf {
    let in_release_folder = project_dir
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(RELEASE_FOLDER_PREFIX));

    let root = match project_dir.parent() {
        Some(parent) if in_release_folder && !parent.as_os_str().is_empty() => parent,
        Some(_) if in_release_folder => Path::new("."),
        _ => project_dir,
    };
    root.join(".env")
}

/// 256 random bits from the thread-local CSPRNG, base64 encoded
pub fn generate_jwt_secret() -> String {
    let mut bytes = [0u8; JWT_SECRET_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}
