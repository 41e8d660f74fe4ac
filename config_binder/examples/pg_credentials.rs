//! Example CLI binding a Postgres credentials model from a stack file.
//!
//! ```text
//! cargo run --example pg_credentials -- --config stack.toml --namespace pg
//! ```
//!
//! The stack file may use namespace tables (`[pg]`) or fully-qualified keys
//! under a `[config]` table. Nested values such as `provider` and `users`
//! are JSON blobs or TOML tables.

use std::io::{self, Write};

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use config_binder::{Bind, ConfigStore, IntInput, StringInput, serialize_for_display};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(about = "Bind and display Postgres credentials configuration")]
struct Cli {
    /// Stack file to read (`.toml` or `.json`).
    #[arg(long)]
    config: Utf8PathBuf,
    /// Namespace the keys live under.
    #[arg(long, default_value = "pg")]
    namespace: String,
}

#[derive(Debug, Default, Bind)]
#[bind(rename_all = "camelCase")]
struct Provider {
    host: StringInput,
    superuser_name: StringInput,
    superuser_password: StringInput,
    port: IntInput,
    #[bind(data = "disableSSL")]
    disable_ssl: bool,
}

#[derive(Debug, Default, Bind)]
struct User {
    #[bind(data = "username", required)]
    username: String,
    #[bind(data = "login")]
    login: bool,
}

#[derive(Debug, Default, Bind)]
struct PgConfig {
    #[bind(data = "database", required)]
    database: String,
    #[bind(data = "provider", required)]
    provider: Provider,
    #[bind(data = "users")]
    users: Vec<User>,
    #[bind(data = "exportAsSecret")]
    export_as_secret: bool,
}

const CREDENTIAL_KEYS: [&str; 5] = ["username", "password", "database", "host", "port"];

impl PgConfig {
    /// Lines describing where each user's credentials would be published.
    fn export_plan(&self) -> Vec<String> {
        let keys = CREDENTIAL_KEYS.join(",");
        self.users
            .iter()
            .map(|user| {
                let role = format!("{}-rw", self.database);
                let login = if user.login { "login" } else { "nologin" };
                if self.export_as_secret {
                    format!(
                        "secret pg-{}-user-{} ({login}, role {role}): {keys}",
                        self.database, user.username
                    )
                } else {
                    format!("export {} ({login}, role {role}): {keys}", user.username)
                }
            })
            .collect()
    }
}

fn load(cli: &Cli) -> Result<PgConfig> {
    let store = ConfigStore::load_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config))?;
    let mut config = PgConfig::default();
    store
        .source(&cli.namespace)
        .bind(&mut config)
        .with_context(|| format!("binding namespace '{}'", cli.namespace))?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load(&cli)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", serialize_for_display(&config)?)?;
    for line in config.export_plan() {
        writeln!(stdout, "{line}")?;
    }
    writeln!(stdout, "export database")?;
    Ok(())
}
