//! `bookstore` interactive inventory entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Own the database connection for the whole session and hand it to the menu.

mod menu;

use anyhow::{Context, Result};
use bookstore_core::db::DEFAULT_DB_FILE_NAME;
use bookstore_core::{
    default_log_level, init_logging, logging_status, open_db, InventoryService,
    SqliteBookRepository,
};
use clap::Parser;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about = "Interactive eBookstore inventory manager")]
struct Args {
    /// SQLite database file; created and seeded on first run.
    #[arg(long, env = "BOOKSTORE_DB", default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "BOOKSTORE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "BOOKSTORE_LOG_LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let log_dir = absolute_dir(log_dir)?;
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir).map_err(anyhow::Error::msg)?;
        if let Some((level, dir)) = logging_status() {
            info!(
                "event=cli_config module=cli status=ok db={} log_level={} log_dir={}",
                args.db.display(),
                level,
                dir.display()
            );
        }
    }

    let conn = open_db(&args.db)
        .with_context(|| format!("failed to open inventory database `{}`", args.db.display()))?;
    let repo = SqliteBookRepository::try_new(&conn).context("inventory database is not usable")?;
    let service = InventoryService::new(repo);

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run_menu(&service, &mut stdin.lock(), &mut stdout.lock())?;

    info!("event=app_exit module=bookstore status=ok");
    Ok(())
}

fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(dir))
}

#[cfg(test)]
mod tests {
    use super::{absolute_dir, Args};
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn args_default_to_local_database_without_logging() {
        let args = Args::try_parse_from(["bookstore"]).unwrap();
        assert_eq!(args.db, Path::new("ebookstore.db"));
        assert!(args.log_dir.is_none());
    }

    #[test]
    fn relative_log_dir_is_resolved_against_cwd() {
        let resolved = absolute_dir(Path::new("logs")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("logs"));
    }
}
