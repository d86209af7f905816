use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    actions::{DELETE_CONFIRMATION_PROMPT, DELETION_CANCELLED},
    handle_create, handle_delete, load_settings, ActionOutcome, AppStore, DeleteConfirmation,
    HttpIdentityClient, IdentityApi, UserStore,
};
use shared::domain::{CreateUserRequest, User, UserId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "identity_cli", about = "Manage users on an identity backend")]
struct Args {
    /// Backend base URL; overrides identity_web.toml and the environment.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a random number from the backend.
    Random,
    /// List all users.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Create a user.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Delete a user by id.
    Delete {
        #[arg(long)]
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings().with_api_base_url(args.api_base_url);
    let api: Arc<dyn IdentityApi> = Arc::new(
        HttpIdentityClient::new(&settings.api_base_url)
            .with_context(|| format!("cannot use backend at {}", settings.api_base_url))?,
    );
    tracing::debug!(api_base_url = %settings.api_base_url, "identity cli starting");

    match args.command {
        Command::Random => {
            let store = AppStore::new(api);
            store.fetch_random_number().await;
            let state = store.snapshot();
            if let Some(err) = state.error {
                bail!(err);
            }
            match state.random_number {
                Some(number) => println!("{number}"),
                None => bail!("backend returned no number"),
            }
        }
        Command::List { json } => {
            let store = UserStore::new(api);
            store.fetch_users().await;
            let state = store.snapshot();
            if let Some(err) = state.error {
                bail!(err);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&state.users)?);
            } else {
                print!("{}", format_user_table(&state.users));
            }
        }
        Command::Create { name, email } => {
            let store = UserStore::new(api);
            let outcome = handle_create(&store, CreateUserRequest::trimmed(&name, &email)).await;
            println!("{}", report_create(outcome, store.snapshot().users.last())?);
        }
        Command::Delete { id, yes } => {
            let confirmation = if yes {
                DeleteConfirmation::Confirmed
            } else {
                confirm(DELETE_CONFIRMATION_PROMPT)?.into()
            };
            let store = UserStore::new(api);
            match handle_delete(&store, UserId(id), confirmation, None).await {
                ActionOutcome::Succeeded => println!("Deleted user #{id}"),
                ActionOutcome::Failed(message) => bail!(message),
                ActionOutcome::Cancelled => println!("{DELETION_CANCELLED}"),
            }
        }
    }

    Ok(())
}

fn report_create(outcome: ActionOutcome, created: Option<&User>) -> Result<String> {
    match outcome {
        ActionOutcome::Succeeded => Ok(match created {
            Some(user) => format!("Created user #{} {} <{}>", user.id, user.name, user.email),
            None => "Created user".to_string(),
        }),
        ActionOutcome::Failed(message) => bail!(message),
        ActionOutcome::Cancelled => bail!("user creation was cancelled"),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn format_user_table(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found. Create one to get started!\n".to_string();
    }

    let id_width = users
        .iter()
        .map(|user| user.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let name_width = users
        .iter()
        .map(|user| user.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!("{:<id_width$}  {:<name_width$}  EMAIL\n", "ID", "NAME");
    for user in users {
        out.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {}\n",
            user.id, user.name, user.email
        ));
    }
    out
}
