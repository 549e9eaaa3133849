use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use textboard_api::auth;
use textboard_api::client::{
    ApiClient, CommentQueries, CreateCommentRequest, CreateTextRequest, QueryCache, TextQueries,
    UpdateTextRequest,
};
use textboard_api::workspace::{self, WorkspaceRole, WorkspaceTokenEntry};

#[derive(Parser)]
#[command(name = "textboard")]
#[command(about = "Textboard CLI - Command-line client for the Textboard API")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, default_value = "http://localhost:3000", help = "API server base URL")]
    server: String,

    #[arg(long, global = true, env = "TEXTBOARD_UID", default_value = "demo-user", help = "Caller uid for demo-minted tokens")]
    uid: String,

    #[arg(long, global = true, env = "TEXTBOARD_IDENTITY_TOKEN", help = "Identity token; minted locally when omitted")]
    identity_token: Option<String>,

    #[arg(long, global = true, env = "TEXTBOARD_WORKSPACE", default_value = "demo-workspace", help = "Target workspace id")]
    workspace: String,

    #[arg(long, global = true, env = "TEXTBOARD_WORKSPACE_TOKEN", help = "Workspace token; minted locally (editor) when omitted")]
    workspace_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Text operations")]
    Texts {
        #[command(subcommand)]
        cmd: TextCommands,
    },

    #[command(about = "Comment operations")]
    Comments {
        #[command(subcommand)]
        cmd: CommentCommands,
    },

    #[command(about = "Mint demo tokens (shares the server's JWT secret)")]
    Token {
        #[command(subcommand)]
        cmd: TokenCommands,
    },

    #[command(about = "Check server health")]
    Health,
}

#[derive(Subcommand)]
enum TextCommands {
    #[command(about = "Create a text")]
    Create {
        #[arg(long)]
        content: String,
        #[arg(long)]
        title: Option<String>,
    },

    #[command(about = "List texts, newest first")]
    List,

    #[command(about = "Update a text's content and/or title")]
    Update {
        #[arg(help = "Text id")]
        id: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },

    #[command(about = "Delete a text")]
    Delete {
        #[arg(help = "Text id")]
        id: String,
    },
}

#[derive(Subcommand)]
enum CommentCommands {
    #[command(about = "Comment on a text")]
    Create {
        #[arg(long)]
        text_id: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        author: String,
    },

    #[command(about = "List comments, optionally for one text")]
    List {
        #[arg(long)]
        text_id: Option<String>,
    },

    #[command(about = "Delete a comment")]
    Delete {
        #[arg(help = "Comment id")]
        id: String,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    #[command(about = "Mint an identity token for the configured uid")]
    Identity,

    #[command(about = "Mint a workspace token for the configured uid and workspace")]
    Workspace {
        #[arg(long, default_value = "editor", help = "viewer, editor or admin")]
        role: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Token minting needs no server
    if let Commands::Token { cmd } = &cli.command {
        match cmd {
            TokenCommands::Identity => {
                println!("{}", auth::generate_identity_token(&cli.uid)?);
            }
            TokenCommands::Workspace { role } => {
                let Some(role) = WorkspaceRole::parse(role) else {
                    bail!("unknown role '{}' (expected viewer, editor or admin)", role);
                };
                println!(
                    "{}",
                    workspace::issue_workspace_token(&cli.workspace, &cli.uid, role)?
                );
            }
        }
        return Ok(());
    }

    let identity_token = match &cli.identity_token {
        Some(token) => token.clone(),
        None => auth::generate_identity_token(&cli.uid)
            .context("failed to mint demo identity token")?,
    };

    let api = Arc::new(ApiClient::new(&cli.server, identity_token));

    if let Commands::Health = cli.command {
        let body = api.health().await?;
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    // Seed the credential cache; refreshed tokens from responses replace it
    let workspace_token = match &cli.workspace_token {
        Some(token) => token.clone(),
        None => workspace::issue_workspace_token(&cli.workspace, &cli.uid, WorkspaceRole::Editor)
            .context("failed to mint demo workspace token")?,
    };
    api.tokens().insert(
        &cli.workspace,
        WorkspaceTokenEntry {
            role: WorkspaceRole::Editor.as_str().to_string(),
            token: workspace_token,
        },
    );

    let cache = QueryCache::new();
    let workspace_id = cli.workspace.clone();

    match cli.command {
        Commands::Texts { cmd } => {
            let texts = TextQueries::new(api.clone(), cache);
            match cmd {
                TextCommands::Create { content, title } => {
                    let text = texts
                        .create(&workspace_id, CreateTextRequest { title, content })
                        .await?;
                    println!("{}", serde_json::to_string_pretty(&text)?);
                }
                TextCommands::List => {
                    let list = texts.list(&workspace_id).await?;
                    println!("{}", serde_json::to_string_pretty(&list)?);
                }
                TextCommands::Update { id, content, title } => {
                    let text = texts
                        .update(&workspace_id, &id, UpdateTextRequest { title, content })
                        .await?;
                    println!("{}", serde_json::to_string_pretty(&text)?);
                }
                TextCommands::Delete { id } => {
                    texts.delete(&workspace_id, &id).await?;
                    println!("deleted {}", id);
                }
            }
        }
        Commands::Comments { cmd } => {
            let comments = CommentQueries::new(api.clone(), cache);
            match cmd {
                CommentCommands::Create {
                    text_id,
                    content,
                    author,
                } => {
                    let comment = comments
                        .create(
                            &workspace_id,
                            CreateCommentRequest {
                                text_id,
                                content,
                                author,
                            },
                        )
                        .await?;
                    println!("{}", serde_json::to_string_pretty(&comment)?);
                }
                CommentCommands::List { text_id } => {
                    let list = comments.list(&workspace_id, text_id.as_deref()).await?;
                    println!("{}", serde_json::to_string_pretty(&list)?);
                }
                CommentCommands::Delete { id } => {
                    comments.delete(&workspace_id, &id).await?;
                    println!("deleted {}", id);
                }
            }
        }
        Commands::Token { .. } | Commands::Health => unreachable!(),
    }

    Ok(())
}
