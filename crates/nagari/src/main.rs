//! # nagari
//!
//! Nagari CMS backend binary. Loads settings, opens the `SQLite` database and
//! either serves the HTTP API or runs one of the maintenance commands.

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use nagari_auth::{Authenticator, TokenSigner, hash_password};
use nagari_settings::NagariSettings;
use nagari_store::{ConnectionConfig, ConnectionPool, Repository, run_migrations};

/// Nagari CMS backend.
#[derive(Parser, Debug)]
#[command(name = "nagari", about = "Nagari CMS backend", version)]
struct Cli {
    /// Settings file (defaults to `./nagari.json`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the database path from settings.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Apply pending schema migrations and exit.
    Migrate,
    /// Insert the default admin and sample content if missing.
    Seed,
    /// Create an admin account, or reset the password of an existing one.
    CreateAdmin {
        /// Login name.
        username: String,
        /// Password for the account.
        #[arg(long)]
        password: String,
        /// Display name (defaults to the username).
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the stored form of a password.
    HashPassword {
        /// Plaintext password.
        password: String,
    },
}

fn load_settings(cli: &Cli) -> Result<NagariSettings> {
    let mut settings = match cli.config {
        Some(ref path) => nagari_settings::load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => nagari_settings::load_settings().context("Failed to load settings")?,
    };
    if let Some(ref db_path) = cli.db_path {
        settings.database.path = db_path.to_string_lossy().into_owned();
    }
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

/// Open the file-backed pool and bring the schema up to date.
fn open_database(settings: &NagariSettings) -> Result<ConnectionPool> {
    let path = Path::new(&settings.database.path);
    let config = ConnectionConfig {
        pool_size: settings.database.pool_size,
        busy_timeout_ms: settings.database.busy_timeout_ms,
    };
    let pool = nagari_store::new_file(path, &config)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    let conn = pool.get().context("Failed to get DB connection")?;
    let version = run_migrations(&conn).context("Failed to run migrations")?;
    info!(path = %path.display(), version, "database ready");
    Ok(pool)
}

async fn serve(settings: NagariSettings) -> Result<()> {
    let secret = settings
        .require_token_secret()
        .context("Refusing to serve without a token secret")?;
    let signer = TokenSigner::new(secret.as_bytes(), settings.auth.token_ttl_secs);
    let authenticator = Authenticator::new(signer, settings.auth.hash_iterations);
    let pool = open_database(&settings)?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let shutdown = CancellationToken::new();
    let _signals = tokio::spawn(nagari_server::cancel_on_signal(shutdown.clone()));

    let state = nagari_server::AppState::new(pool, authenticator, settings);
    nagari_server::serve(listener, state, shutdown)
        .await
        .context("Server failed")?;
    info!("shutdown complete");
    Ok(())
}

fn seed(settings: &NagariSettings) -> Result<()> {
    let pool = open_database(settings)?;
    let conn = pool.get().context("Failed to get DB connection")?;
    let hash = hash_password(&settings.auth.seed_admin_password, settings.auth.hash_iterations);
    let report = nagari_store::seed(&conn, &hash).context("Failed to seed database")?;
    info!(
        admin_created = report.admin_created,
        profile_created = report.profile_created,
        jorongs = report.jorongs,
        statistics = report.statistics,
        news = report.news,
        faqs = report.faqs,
        wali_nagari = report.wali_nagari,
        "seed complete"
    );
    Ok(())
}

fn create_admin(
    settings: &NagariSettings,
    username: &str,
    password: &str,
    name: Option<&str>,
) -> Result<()> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        bail!("username and password must not be empty");
    }
    let pool = open_database(settings)?;
    let conn = pool.get().context("Failed to get DB connection")?;
    let hash = hash_password(password, settings.auth.hash_iterations);

    if Repository::set_admin_password(&conn, username, &hash)? {
        info!(username, "admin password reset");
        return Ok(());
    }
    let admin = Repository::create_admin(&conn, username, name.unwrap_or(username), &hash)
        .context("Failed to create admin")?;
    info!(id = %admin.id, username, "admin created");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    nagari_core::logging::init_subscriber(&settings.logging.level, settings.logging.json);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::Migrate => open_database(&settings).map(|_| ()),
        Command::Seed => seed(&settings),
        Command::CreateAdmin {
            username,
            password,
            name,
        } => create_admin(&settings, &username, &password, name.as_deref()),
        Command::HashPassword { password } => {
            println!("{}", hash_password(&password, settings.auth.hash_iterations));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_in(dir: &tempfile::TempDir) -> NagariSettings {
        let mut settings = NagariSettings::default();
        settings.database.path = dir.path().join("db").join("nagari.db").to_string_lossy().into_owned();
        settings.auth.hash_iterations = 4;
        settings
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["nagari"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nagari", "seed", "--config", "/etc/nagari.json"]).unwrap();
        assert_eq!(cli.command, Some(Command::Seed));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/nagari.json")));
    }

    #[test]
    fn create_admin_args() {
        let cli = Cli::try_parse_from([
            "nagari",
            "create-admin",
            "wali",
            "--password",
            "s3cret",
            "--name",
            "Wali Nagari",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::CreateAdmin {
                username: "wali".into(),
                password: "s3cret".into(),
                name: Some("Wali Nagari".into()),
            })
        );
    }

    #[test]
    fn create_admin_requires_password() {
        assert!(Cli::try_parse_from(["nagari", "create-admin", "wali"]).is_err());
    }

    #[test]
    fn open_database_creates_parent_and_migrates() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(&dir);
        let pool = open_database(&settings).unwrap();
        let conn = pool.get().unwrap();
        assert_eq!(
            nagari_store::migrations::current_version(&conn).unwrap(),
            nagari_store::migrations::latest_version()
        );
    }

    #[test]
    fn create_admin_then_reset() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(&dir);
        create_admin(&settings, "wali", "first", None).unwrap();
        create_admin(&settings, "wali", "second", None).unwrap();

        let pool = open_database(&settings).unwrap();
        let conn = pool.get().unwrap();
        let record = Repository::find_admin_by_username(&conn, "wali").unwrap().unwrap();
        assert_eq!(record.admin.name, "wali");
        assert!(nagari_auth::verify_password("second", &record.password_hash));
    }

    #[test]
    fn create_admin_rejects_blank_username() {
        let dir = tempfile::tempdir().unwrap();
        assert!(create_admin(&settings_in(&dir), "  ", "pw", None).is_err());
    }

    #[test]
    fn seed_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(&dir);
        seed(&settings).unwrap();
        seed(&settings).unwrap();
        let pool = open_database(&settings).unwrap();
        let conn = pool.get().unwrap();
        assert_eq!(Repository::list_jorongs(&conn).unwrap().len(), 10);
    }

    #[tokio::test]
    async fn serve_refuses_empty_secret() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(&dir);
        let err = serve(settings).await.unwrap_err();
        assert!(err.to_string().contains("token secret"));
    }
}
