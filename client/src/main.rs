//! Command-line front end: drives the client store against a project server.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use kanban_client::domain::Avatar;
use kanban_client::domain::ports::{KanbanApi, StatePersistence};
use kanban_client::outbound::http::RestKanbanApi;
use kanban_client::outbound::persistence::FileStatePersistence;
use kanban_client::{ClientSettings, Store};

#[derive(Debug, Parser)]
#[command(name = "kanban", about = "Client for the kanban project server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and keep the session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign it in.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Image uploaded as the profile picture.
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
    /// End the session.
    Logout,
    /// List projects created by the signed-in user.
    Projects,
    /// Show the kanban columns of one project.
    Project { id: i64 },
    /// Show the stored session.
    Status,
}

/// Application bootstrap.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("kanban")])
        .map_err(|error| eyre!("failed to load client settings: {error}"))?;

    let base_url = settings
        .api_base_url()
        .wrap_err("KANBAN_API_BASE_URL is not a valid URL")?;
    let api = RestKanbanApi::new(base_url, settings.request_timeout())
        .wrap_err("failed to build HTTP client")?;
    let persistence = FileStatePersistence::new(settings.state_dir());
    let store = Store::restore(Arc::new(api), Arc::new(persistence));

    run(&store, cli.command).await
}

async fn run<A, P>(store: &Store<A, P>, command: Command) -> Result<()>
where
    A: KanbanApi,
    P: StatePersistence,
{
    let mut out = io::stdout().lock();
    match command {
        Command::Login { username, password } => {
            if let Err(error) = store.login(&username, &password).await {
                let errors = store.login_form_errors();
                report_field_errors(
                    &mut out,
                    &[("password", errors.password), ("error", errors.general)],
                )?;
                return Err(error).wrap_err("login failed");
            }
            writeln!(out, "signed in as {}", display_name(store))?;
        }
        Command::Register {
            username,
            email,
            password,
            avatar,
        } => {
            let avatar = avatar.as_deref().map(read_avatar).transpose()?;
            if let Err(error) = store.register(&username, &email, &password, avatar).await {
                let errors = store.register_form_errors();
                report_field_errors(
                    &mut out,
                    &[
                        ("username", errors.username),
                        ("email", errors.email),
                        ("password", errors.password),
                        ("avatar", errors.avatar),
                    ],
                )?;
                return Err(error).wrap_err("registration failed");
            }
            writeln!(out, "registered and signed in as {}", display_name(store))?;
        }
        Command::Logout => {
            let outcome = store.logout().await;
            writeln!(out, "signed out")?;
            outcome.wrap_err("server did not confirm the logout")?;
        }
        Command::Projects => {
            store.fetch_projects().await.wrap_err("failed to load projects")?;
            for project in store.projects() {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    project.pk.map_or_else(|| "-".to_owned(), |pk| pk.to_string()),
                    project.key.as_deref().unwrap_or("-"),
                    project.name
                )?;
            }
        }
        Command::Project { id } => {
            store
                .fetch_project_detail(id)
                .await
                .wrap_err_with(|| format!("failed to load project {id}"))?;
            let detail = store.project_detail().unwrap_or_default();
            for column in &detail.columns {
                writeln!(out, "{} ({} tasks)", column.title, column.tasks.len())?;
            }
        }
        Command::Status => {
            if store.is_authorized() {
                writeln!(out, "signed in as {}", display_name(store))?;
            } else {
                writeln!(out, "signed out")?;
            }
            let titles = store.column_titles();
            if !titles.is_empty() {
                writeln!(out, "board: {}", titles.join(" | "))?;
            }
        }
    }
    Ok(())
}

fn display_name<A, P>(store: &Store<A, P>) -> String
where
    A: KanbanApi,
    P: StatePersistence,
{
    let session = store.session();
    session
        .username()
        .map(str::to_owned)
        .or_else(|| session.user_id().map(|id| format!("user #{id}")))
        .unwrap_or_else(|| "an unknown user".to_owned())
}

fn report_field_errors(out: &mut impl Write, fields: &[(&str, Option<String>)]) -> Result<()> {
    for (field, message) in fields {
        if let Some(message) = message {
            writeln!(out, "{field}: {message}")?;
        }
    }
    Ok(())
}

fn read_avatar(path: &Path) -> Result<Avatar> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| eyre!("avatar path has no file name: {}", path.display()))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("cannot open {}", parent.display()))?;
    let bytes = dir
        .read(file_name)
        .wrap_err_with(|| format!("cannot read avatar {}", path.display()))?;
    Ok(Avatar::new(file_name, bytes))
}
