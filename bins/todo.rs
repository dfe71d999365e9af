//! `todo`: terminal client for the todo API.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use client::types::{status_label, NewTodo, Todo, TodoUpdate};
use client::{ApiClient, ClientError, FileTokenStore, Session};

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "Manage todos on a todo API server", long_about = None)]
struct Args {
    /// Base URL of the API
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:8080")]
    api_url: String,

    /// File the login token is kept in
    #[arg(long, env = "TODO_SESSION_FILE", default_value = ".todo_session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TODO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and remember the token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TODO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Revoke the current token
    Logout {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Show the logged-in user
    Me,
    /// List all todos
    List,
    /// Show one todo
    Show { id: i32 },
    /// Create a todo
    Add {
        title: String,
        #[arg(long, short)]
        description: Option<String>,
        /// 0 = 未着手, 1 = 進行中, 2 = 完了
        #[arg(long, short)]
        status: Option<i32>,
    },
    /// Change a todo; omitted title/status keep their current value
    Edit {
        id: i32,
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(long, short)]
        status: Option<i32>,
    },
    /// Delete a todo
    Delete {
        id: i32,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

fn print_todo(todo: &Todo) {
    println!("#{} [{}] {}", todo.id, todo.status_label(), todo.title);
    if let Some(d) = &todo.description {
        println!("    {d}");
    }
}

async fn execute(api: &ApiClient, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Register { name, email, password } => {
            let user = api.register(&name, &email, &password).await?;
            println!("ユーザー登録が完了しました。 ({} <{}>)", user.name, user.email);
        }
        Command::Login { email, password } => {
            let user = api.login(&email, &password).await?;
            println!("ログインしました。 ({} <{}>)", user.name, user.email);
        }
        Command::Logout { .. } => {
            println!("{}", api.logout().await?);
        }
        Command::Me => {
            let user = api.me().await?;
            println!("#{} {} <{}>", user.id, user.name, user.email);
        }
        Command::List => {
            let todos = api.list_todos().await?;
            if todos.is_empty() {
                println!("(no todos)");
            }
            for todo in &todos {
                print_todo(todo);
            }
        }
        Command::Show { id } => {
            let todo = api.get_todo(id).await?;
            print_todo(&todo);
            println!("    created {}  updated {}", todo.created_at, todo.updated_at);
        }
        Command::Add { title, description, status } => {
            let todo = api.create_todo(&NewTodo { title, description, status }).await?;
            print_todo(&todo);
        }
        Command::Edit { id, title, description, clear_description, status } => {
            let current = api.get_todo(id).await?;
            let description = if clear_description { Some(None) } else { description.map(Some) };
            let update = TodoUpdate {
                title: title.unwrap_or(current.title),
                description,
                status: status.unwrap_or(current.status),
            };
            let todo = api.update_todo(id, &update).await?;
            print_todo(&todo);
        }
        Command::Delete { id, .. } => {
            println!("{}", api.delete_todo(id).await?);
        }
    }
    Ok(())
}

/// Prompt shown before a destructive command, unless `--yes` was given.
fn confirmation(command: &Command) -> Option<&'static str> {
    match command {
        Command::Delete { yes: false, .. } => Some("本当に削除しますか？"),
        Command::Logout { yes: false } => Some("ログアウトしますか？"),
        _ => None,
    }
}

fn report(err: &ClientError) {
    match err {
        ClientError::Unauthenticated => {
            eprintln!("Not logged in (or the session expired). Run `todo login`.");
        }
        ClientError::Validation { message, errors } => {
            eprintln!("{message}");
            for (field, messages) in errors {
                for m in messages {
                    eprintln!("  {field}: {m}");
                }
            }
        }
        other => eprintln!("{other}"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    // 只有显式设置 RUST_LOG 时才输出日志，避免干扰命令行输出
    if std::env::var_os("RUST_LOG").is_some() {
        common::utils::logging::init_logging_default();
    }
    let args = Args::parse();

    if let Some(prompt) = confirmation(&args.command) {
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            println!("キャンセルしました。");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let session = Session::load(FileTokenStore::new(&args.session_file))?;
    let api = ApiClient::new(args.api_url, Arc::new(session))?;

    match execute(&api, args.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            report(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}
