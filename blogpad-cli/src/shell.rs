use crate::commands::{Action, Session};
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    #[command(flatten)]
    Action(Action),

    /// Open a page by path, e.g. `go /posts/42`
    Go { path: String },

    /// Next page of the post list
    Next,

    /// Previous page of the post list
    Prev,

    /// Forget posts and comments that failed to send
    Dismiss,

    #[command(alias = "quit")]
    Exit,
}

fn history_path() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("blogpad")
        .join("history.txt")
}

enum Flow {
    Continue,
    Exit,
}

pub async fn run(mut session: Session) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let history_file = history_path();
    let _ = rl.load_history(&history_file);

    println!("blogpad - type `help` for commands, `exit` to quit");

    loop {
        let prompt = format!("{}> ", session.location().cyan());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                match handle(&mut session, line).await {
                    Ok(Flow::Exit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => eprintln!("{} {:#}", "error:".red(), e),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    if let Some(parent) = history_file.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = rl.save_history(&history_file);
    Ok(())
}

async fn handle(session: &mut Session, line: &str) -> Result<Flow> {
    let words = shell_words::split(line)?;
    let parsed = match Line::try_parse_from(words) {
        Ok(parsed) => parsed,
        Err(e) => {
            // help and usage errors are rendered by clap
            let _ = e.print();
            return Ok(Flow::Continue);
        }
    };

    match parsed.command {
        ShellCommand::Exit => return Ok(Flow::Exit),
        ShellCommand::Go { path } => session.open(&path).await?,
        ShellCommand::Next => {
            let page = session.list_page() + 1;
            session.execute(Action::List { page }).await?;
        }
        ShellCommand::Prev => {
            let page = session.list_page().saturating_sub(1).max(1);
            session.execute(Action::List { page }).await?;
        }
        ShellCommand::Dismiss => session.dismiss_failed()?,
        ShellCommand::Action(action) => session.execute(action).await?,
    }
    Ok(Flow::Continue)
}
