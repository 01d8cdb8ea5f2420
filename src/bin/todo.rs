//! Command-line front end for the task list.

use anyhow::Result;
use clap::{Parser, Subcommand};

use todo_list::client::{TaskClient, TaskListView};
use todo_list::config::DEFAULT_API_URL;
use todo_list::logging::init_logging;

#[derive(Parser)]
#[command(name = "todo", version, about = "Manage the task list from the terminal")]
struct Cli {
    /// Base URL of the task server
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_API_URL, global = true)]
    url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all tasks
    List,
    /// Add a task
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Flip a task between done and not done
    Toggle {
        /// Task ID
        id: String,
    },
    /// Replace a task's text
    Edit {
        /// Task ID
        id: String,
        /// New text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging("warn");

    let mut view = TaskListView::new(TaskClient::new(&cli.url));
    view.mount().await?;

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {},
        Commands::Add { text } => {
            view.set_new_text(text.join(" "));
            view.add().await?;
        },
        Commands::Toggle { id } => {
            view.toggle(&id).await?;
        },
        Commands::Edit { id, text } => {
            view.begin_edit(&id)?;
            view.set_draft(text.join(" "));
            view.save_edit().await?;
        },
        Commands::Delete { id } => {
            view.delete(&id).await?;
        },
    }

    print!("{}", view.render());
    Ok(())
}
