use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use gh_projects::config::loader;
use gh_projects::github::{self, GitHubClient};
use gh_projects::types::{
    AddProjectItemInput, CreateProjectInput, GetProjectInput, GetProjectItemsInput,
    ListOrganizationProjectsInput, ListUserProjectsInput, UpdateProjectItemFieldInput,
};

#[derive(Parser)]
#[command(name = "gh-projects", version, about = "GitHub Projects (V2) from the command line")]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to stderr.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects owned by an organization.
    ListOrgProjects {
        /// Organization login.
        organization: String,
        /// Max number of projects to return.
        #[arg(long)]
        first: Option<u32>,
        /// Cursor for pagination.
        #[arg(long)]
        after: Option<String>,
    },
    /// List projects owned by a user.
    ListUserProjects {
        /// User login.
        user: String,
        #[arg(long)]
        first: Option<u32>,
        #[arg(long)]
        after: Option<String>,
    },
    /// Get a project by owner and number.
    GetProject {
        /// Organization or user login.
        owner: String,
        number: u64,
    },
    /// List the items of a project.
    GetItems {
        /// Project node ID.
        project_id: String,
        #[arg(long)]
        first: Option<u32>,
        #[arg(long)]
        after: Option<String>,
    },
    /// Create a new project.
    CreateProject {
        /// Organization or user login.
        owner: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Add an issue or pull request to a project.
    AddItem {
        /// Project node ID.
        project_id: String,
        /// Content node ID (issue, PR, etc).
        content_id: String,
    },
    /// Update a field on a project item.
    UpdateField {
        project_id: String,
        item_id: String,
        field_id: String,
        value: String,
    },
    /// Show whether a login is an organization or a user.
    ResolveOwner { login: String },
}

#[derive(Serialize)]
struct ItemOutput<T> {
    item: T,
}

#[derive(Serialize)]
struct OwnerOutput<'a> {
    kind: &'static str,
    id: &'a str,
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    let config = loader::load_config(cli.config.as_deref())?;
    let default_first = config.github.default_page_size;

    // The token is checked here, before any request goes out.
    let client = GitHubClient::from_config(&config.github).context("configuring GitHub client")?;

    tracing::info!("gh-projects starting");

    match cli.command {
        Commands::ListOrgProjects {
            organization,
            first,
            after,
        } => {
            let input = ListOrganizationProjectsInput {
                organization,
                first: first.or(Some(default_first)),
                after,
            };
            print_json(&github::list_organization_projects(&client, &input).await?)
        }
        Commands::ListUserProjects { user, first, after } => {
            let input = ListUserProjectsInput {
                user,
                first: first.or(Some(default_first)),
                after,
            };
            print_json(&github::list_user_projects(&client, &input).await?)
        }
        Commands::GetProject { owner, number } => {
            let input = GetProjectInput { owner, number };
            print_json(&github::get_project(&client, &input).await?)
        }
        Commands::GetItems {
            project_id,
            first,
            after,
        } => {
            let input = GetProjectItemsInput {
                project_id,
                first: first.or(Some(default_first)),
                after,
            };
            print_json(&github::get_project_items(&client, &input).await?)
        }
        Commands::CreateProject {
            owner,
            title,
            description,
        } => {
            let input = CreateProjectInput {
                owner,
                title,
                description,
            };
            print_json(&github::create_project(&client, &input).await?)
        }
        Commands::AddItem {
            project_id,
            content_id,
        } => {
            let input = AddProjectItemInput {
                project_id,
                content_id,
            };
            let item = github::add_project_item(&client, &input).await?;
            print_json(&ItemOutput { item })
        }
        Commands::UpdateField {
            project_id,
            item_id,
            field_id,
            value,
        } => {
            let input = UpdateProjectItemFieldInput {
                project_id,
                item_id,
                field_id,
                value,
            };
            let item = github::update_project_item_field(&client, &input).await?;
            print_json(&ItemOutput { item })
        }
        Commands::ResolveOwner { login } => {
            let owner = github::resolve_owner(&client, &login).await?;
            print_json(&OwnerOutput {
                kind: owner.kind(),
                id: owner.id(),
            })
        }
    }
}
