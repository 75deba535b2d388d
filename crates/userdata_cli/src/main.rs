//! CLI smoke driver for `userdata_core`.
//!
//! # Responsibility
//! - Run one repository operation per invocation against a database file.
//! - Print results as JSON so runs can be diffed and scripted.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use userdata_core::{
    init_logging, open_db, open_db_in_memory, CrudRepository, LoggingConfig, NewUser,
    SqliteUserRepository, User, UserId, UserRecord,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and edit a userdata SQLite store.")]
struct Cli {
    /// SQLite database file; created and migrated on first use.
    #[arg(long, env = "USERDATA_DB", default_value = "userdata.sqlite3")]
    db: PathBuf,

    /// Directory for rolling log files. Logging stays off when unset.
    #[arg(long, env = "USERDATA_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (defaults by build mode). Needs `--log-dir`.
    #[arg(long, env = "USERDATA_LOG_LEVEL", requires = "log_dir")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core linkage info.
    Ping,
    /// Insert a user, or upsert one when `--id` is given.
    Save {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        id: Option<UserId>,
    },
    /// Print one user, or `null` when absent.
    Get { id: UserId },
    /// Print every user.
    List,
    /// Delete one user; unknown ids are ignored.
    Delete { id: UserId },
    /// Print the number of users.
    Count,
    /// Run save/get/delete/list against a throwaway in-memory database.
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let mut config = LoggingConfig::new(absolute_dir(log_dir)?);
        if let Some(level) = &cli.log_level {
            config.level = level.clone();
        }
        config.duplicate_to_stderr = true;
        init_logging(&config).context("failed to initialize logging")?;
    }

    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Ping => {
            writeln!(out, "userdata_core ping={}", userdata_core::ping())?;
            writeln!(out, "userdata_core version={}", userdata_core::core_version())?;
            Ok(())
        }
        Command::Demo => {
            let conn = open_db_in_memory()?;
            let repo = SqliteUserRepository::try_new(&conn)?;
            for step in run_demo(&repo)? {
                write_json(&mut out, &step)?;
            }
            Ok(())
        }
        command => {
            let conn = open_db(&cli.db)
                .with_context(|| format!("failed to open `{}`", cli.db.display()))?;
            let repo = SqliteUserRepository::try_new(&conn)?;
            let value = execute(&repo, command)?;
            write_json(&mut out, &value)
        }
    }
}

/// Runs one storage command and returns its JSON result.
fn execute(repo: &SqliteUserRepository<'_>, command: Command) -> Result<Value> {
    let value = match command {
        Command::Save { name, email, id } => {
            let record: UserRecord = match id {
                Some(id) => User::new(id, name, email).into(),
                None => NewUser::new(name, email).into(),
            };
            serde_json::to_value(repo.save(record)?)?
        }
        Command::Get { id } => serde_json::to_value(repo.find_by_id(id)?)?,
        Command::List => serde_json::to_value(repo.find_all()?)?,
        Command::Delete { id } => {
            repo.delete_by_id(id)?;
            json!({ "deleted": id })
        }
        Command::Count => json!(repo.count()?),
        other @ (Command::Ping | Command::Demo) => {
            bail!("`{other:?}` does not run against a database file")
        }
    };
    Ok(value)
}

/// Save, read back, delete, read again, list. One JSON object per step.
fn run_demo(repo: &SqliteUserRepository<'_>) -> Result<Vec<Value>> {
    info!("event=demo module=cli status=start");

    let saved = repo.save(NewUser::new("Alice", "alice@example.com").into())?;
    let mut steps = vec![json!({ "step": "save", "result": saved })];
    steps.push(json!({ "step": "find_by_id", "result": repo.find_by_id(saved.id)? }));
    repo.delete_by_id(saved.id)?;
    steps.push(json!({ "step": "find_by_id_after_delete", "result": repo.find_by_id(saved.id)? }));
    steps.push(json!({ "step": "find_all", "result": repo.find_all()? }));

    info!("event=demo module=cli status=ok");
    Ok(steps)
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn absolute_dir(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(path))
}
