//! Noteboard CLI
//!
//! Terminal host for the notes widget:
//! - List, add and delete notes
//! - Chat with the notes assistant
//! - Drive the widget interactively (`noteboard shell`)

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use noteboard::client::{HttpNotesApi, HttpNotesApiConfig};
use noteboard::config::{generate_default_config, Config};
use noteboard::models::NewNote;
use noteboard::widget::{Event, Field, Modal, NotesClient, Page};

#[derive(Parser)]
#[command(name = "noteboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Notes with an AI chat panel, in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Notes API URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log in before running the command, as username:password
    #[arg(long, global = true)]
    pub login: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all notes
    List,

    /// Add a note through the create dialog
    Add {
        /// Note title
        title: String,
        /// Note content
        #[arg(default_value = "")]
        content: String,
    },

    /// Delete a note by id
    Delete {
        /// Note id
        id: String,
    },

    /// Ask the assistant a question
    Chat {
        /// Prompt text
        prompt: String,
    },

    /// Show a single note
    Show {
        /// Note id
        id: String,
    },

    /// Edit a note's title and/or content
    Edit {
        /// Note id
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short = 'b', long)]
        content: Option<String>,
    },

    /// Create an account on the notes API
    Register {
        username: String,
        password: String,
    },

    /// Print the widget markup
    Render,

    /// Drive the widget interactively
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.client.api_url = url.clone();
    }

    noteboard::logging::init(&config.logging, "noteboard=warn");

    let api = Arc::new(
        HttpNotesApi::new(HttpNotesApiConfig::from(&config.client))
            .context("Failed to create notes API client")?,
    );

    let credentials = match &cli.login {
        Some(pair) => {
            let (user, pass) = pair
                .split_once(':')
                .context("--login expects username:password")?;
            Some((user.to_string(), pass.to_string()))
        }
        None => config
            .client
            .credentials()
            .map(|(u, p)| (u.to_string(), p.to_string())),
    };
    if let Some((user, pass)) = credentials {
        api.login(&user, &pass)
            .await
            .with_context(|| format!("Login as {} failed", user))?;
    }

    match cli.command {
        Commands::Register { username, password } => {
            let message = api
                .register(&username, &password)
                .await
                .context("Registration failed")?;
            println!("{}", message);
        }

        Commands::Show { id } => {
            let note = api.get_note(&id).await.context("Failed to fetch note")?;
            println!("{}", note.title);
            println!("{}", "-".repeat(note.title.chars().count().max(3)));
            println!("{}", note.content);
            if let Some(updated) = note.updated_at {
                println!();
                println!("Updated: {}", updated);
            }
        }

        Commands::Edit { id, title, content } => {
            let current = api.get_note(&id).await.context("Failed to fetch note")?;
            let update = NewNote::new(
                title.unwrap_or(current.title),
                content.unwrap_or(current.content),
            );
            api.update_note(&id, &update)
                .await
                .context("Failed to update note")?;
            println!("Updated note {}", id);
        }

        Commands::List => {
            let widget = NotesClient::start(api).await;
            print_notes(&widget.page().await);
        }

        Commands::Add { title, content } => {
            let widget = NotesClient::start(api).await;
            widget.dispatch(&mut Event::click(Page::add_note_button())).await;
            widget.set_field(Field::Title, title).await;
            widget.set_field(Field::Content, content).await;
            widget.dispatch(&mut Event::submit(Page::note_form())).await;

            let page = widget.page().await;
            if page.modal().is_visible() {
                eprintln!("Note was not added; see the log above for the reason.");
                std::process::exit(1);
            }
            print_notes(&page);
        }

        Commands::Delete { id } => {
            let widget = NotesClient::start(api).await;
            let Some(button) = widget.page().await.delete_button(&id) else {
                eprintln!("No note with id {}", id);
                std::process::exit(1);
            };
            widget.dispatch(&mut Event::click(button)).await;

            let page = widget.page().await;
            if page.delete_button(&id).is_some() {
                eprintln!("Note {} was not deleted; see the log above for the reason.", id);
                std::process::exit(1);
            }
            print_notes(&page);
        }

        Commands::Chat { prompt } => {
            let widget = NotesClient::new(api);
            widget.set_field(Field::ChatInput, prompt).await;
            widget.dispatch(&mut Event::click(Page::send_button())).await;

            let lines = widget.page().await.transcript_lines();
            if lines.is_empty() {
                eprintln!("No reply from the assistant; see the log above for the reason.");
                std::process::exit(1);
            }
            for line in lines {
                println!("{}", line);
            }
        }

        Commands::Render => {
            let widget = NotesClient::start(api).await;
            println!("{}", widget.page().await.render_html());
        }

        Commands::Shell => {
            let widget = NotesClient::start(api).await;
            run_shell(&widget).await?;
        }

        Commands::Config { output } => write_config(output.as_ref())?,
    }

    Ok(())
}

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

fn print_notes(page: &Page) {
    let notes = page.rendered_notes();

    if notes.is_empty() {
        println!("No notes yet.");
        println!();
        println!("Add your first note with:");
        println!("  noteboard add \"Title\" \"Content\"");
        return;
    }

    println!("{:<38} {:<24} {}", "ID", "Title", "Content");
    println!("{}", "-".repeat(80));
    for note in notes {
        println!(
            "{:<38} {:<24} {}",
            note.id.as_deref().unwrap_or("-"),
            truncate(&note.title, 24),
            truncate(&note.content.replace('\n', " "), 40)
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

const SHELL_HELP: &str = "\
Commands:
  list               show the note list
  refresh            re-fetch the note list
  open / close       show or hide the create dialog
  backdrop           click the dialog backdrop
  title <text>       fill the title field
  content <text>     fill the content field
  save               submit the create form
  delete <id>        click a note's delete icon
  say <text>         fill the chat input and click send
  transcript         show the chat transcript
  html               print the widget markup
  quit               leave the shell";

async fn run_shell(widget: &NotesClient) -> anyhow::Result<()> {
    println!("Noteboard v{} (type 'help' for commands)", env!("CARGO_PKG_VERSION"));
    print_notes(&widget.page().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let dialog = if widget.page().await.modal().is_visible() {
            " [dialog]"
        } else {
            ""
        };
        eprint!("noteboard{}> ", dialog);

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match command {
            "" => {}
            "help" => println!("{}", SHELL_HELP),
            "list" => print_notes(&widget.page().await),
            "refresh" => {
                widget.load_notes().await;
                print_notes(&widget.page().await);
            }
            "open" => widget.dispatch(&mut Event::click(Page::add_note_button())).await,
            "close" => widget.dispatch(&mut Event::click(Page::close_button())).await,
            "backdrop" => widget.dispatch(&mut Event::click(Modal::backdrop())).await,
            "title" => widget.set_field(Field::Title, arg).await,
            "content" => widget.set_field(Field::Content, arg).await,
            "save" => {
                widget.dispatch(&mut Event::submit(Page::note_form())).await;
                print_notes(&widget.page().await);
            }
            "delete" => match widget.page().await.delete_button(arg) {
                Some(button) => {
                    widget.dispatch(&mut Event::click(button)).await;
                    print_notes(&widget.page().await);
                }
                None => println!("No note with id {}", arg),
            },
            "say" => {
                let before = widget.page().await.transcript_lines().len();
                widget.set_field(Field::ChatInput, arg).await;
                widget.dispatch(&mut Event::click(Page::send_button())).await;
                for line in widget.page().await.transcript_lines().iter().skip(before) {
                    println!("{}", line);
                }
            }
            "transcript" => {
                for line in widget.page().await.transcript_lines() {
                    println!("{}", line);
                }
            }
            "html" => println!("{}", widget.page().await.render_html()),
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'; type 'help'", other),
        }
    }

    Ok(())
}
