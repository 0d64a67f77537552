//! inkpost - comment markdown from the command line.
//!
//! # Usage
//!
//! ```bash
//! inkpost serialize pasted.html
//! inkpost render comment.md
//! inkpost catalog
//! inkpost post --post-id hello-world --name Ann comment.html
//! ```

mod config;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use inkpost::{Editor, Serializer};
use inkpost_composer::{Composer, MemoryStore};
use inkpost_core::{deserialize, render_html};

use crate::config::Settings;

/// Editable comment content to restricted markdown and back
#[derive(Parser, Debug)]
#[command(name = "inkpost", version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: ./inkpost.toml when present)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serialize editor HTML to comment markdown
    Serialize {
        /// HTML input (stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Render stored comment markdown to HTML
    Render {
        /// Markdown input (stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// List the emoji catalog
    Catalog,

    /// Compose a comment from HTML and post it to an in-memory store
    Post {
        #[arg(long)]
        post_id: String,

        #[arg(long, default_value = "")]
        title: String,

        /// Author name (the configured default when blank)
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        website: String,

        /// HTML input (stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let options = settings
        .options()
        .context("Invalid emoji catalog configuration")?;

    match cli.command {
        Command::Serialize { file } => {
            let html = read_input(file.as_deref())?;
            let serializer = Serializer::with_options(options);
            println!("{}", serializer.serialize_html(&html));
        }

        Command::Render { file } => {
            let markdown = read_input(file.as_deref())?;
            print!("{}", render_html(&deserialize(&markdown, &options), &options));
        }

        Command::Catalog => {
            for (i, url) in options.catalog.entries().enumerate() {
                println!("{:>3}  {}", i, url);
            }
        }

        Command::Post {
            post_id,
            title,
            name,
            email,
            website,
            file,
        } => {
            let html = read_input(file.as_deref())?;

            let mut editor = Editor::with_serializer(Serializer::with_options(options));
            editor.paste_html(&html, None);

            let store = Arc::new(MemoryStore::new());
            let composer = Composer::new(post_id, title, Arc::clone(&store))
                .with_config(settings.composer_config())
                .with_editor(editor);
            composer.set_name(&name);
            composer.set_email(&email);
            composer.set_website(&website);

            let id = match composer.submit().await {
                Ok(id) => id,
                Err(err) => {
                    if let Some(message) = err.user_message() {
                        eprintln!("{}", message);
                    }
                    return Err(err).context("Comment was not posted");
                }
            };

            info!(id = %id, "posted");
            let stored = store
                .get(&id)
                .await
                .context("Posted comment missing from store")?;
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
    }

    Ok(())
}
