//! Chat command

use anyhow::Result;
use clap::{Args, ValueEnum};
use krill_core::Session;
use krill_llm::{HttpProvider, ModelKind, Role};
use std::{
    fmt::{Display, Formatter},
    io::{BufRead, Write},
};

/// Chat command arguments
#[derive(Debug, Args)]
pub struct ChatCmd {
    /// The model to use (overrides the configuration file)
    #[arg(short, long)]
    pub model: Option<Model>,

    /// The message to send (if empty, starts interactive mode)
    pub message: Option<String>,
}

impl ChatCmd {
    /// Run the chat command
    pub async fn run(&self, no_stream: bool) -> Result<()> {
        let mut config = crate::config::load()?;
        if let Some(model) = self.model {
            config.llm.model = model.into();
        }

        let mut session = Session::connect(config)?;
        if let Some(message) = &self.message {
            Self::send(&mut session, message, no_stream).await;
            return Ok(());
        }

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("> ");
            stdout.flush()?;

            let mut input = String::new();
            if stdin.lock().read_line(&mut input)? == 0 {
                break;
            }

            let input = input.trim();
            if input.is_empty() {
                continue;
            }
            if let Some(command) = input.strip_prefix('/') {
                if Self::command(&mut session, command) {
                    break;
                }
                continue;
            }

            Self::send(&mut session, input, no_stream).await;
        }

        Ok(())
    }

    /// Send one message, printing the reply and any error inline.
    ///
    /// Errors are not fatal: the session accepts the next submission.
    async fn send(session: &mut Session<HttpProvider>, text: &str, no_stream: bool) {
        let result = if no_stream {
            session
                .complete(text)
                .await
                .map(|reply| println!("{}", reply.content))
        } else {
            let outcome = session
                .submit(text, |fragment| {
                    print!("{fragment}");
                    let _ = std::io::stdout().flush();
                })
                .await;
            println!();
            outcome.map(drop)
        };

        if let Err(e) = result {
            println!("error: {e}");
        }
    }

    /// Handle a slash command. Returns `true` to leave the chat loop.
    fn command(session: &mut Session<HttpProvider>, line: &str) -> bool {
        let (name, arg) = match line.split_once(' ') {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name {
            "quit" | "exit" => return true,
            "clear" => {
                session.clear();
                println!("transcript cleared");
            }
            "save" if !arg.is_empty() => {
                session.save_as(arg);
                println!("saved as {arg:?}");
            }
            "save" => println!("usage: /save <name>"),
            "load" => match session.restore(arg) {
                Ok(()) => println!("restored {arg:?} ({} messages)", session.transcript().len()),
                Err(e) => println!("error: {e}"),
            },
            "drop" => match session.discard(arg) {
                Ok(()) => println!("dropped {arg:?}"),
                Err(e) => println!("error: {e}"),
            },
            "list" => {
                let names: Vec<_> = session.saved().collect();
                if names.is_empty() {
                    println!("no saved conversations");
                } else {
                    for name in names {
                        println!("{name}");
                    }
                }
            }
            "search" if !arg.is_empty() => {
                let matches = session.transcript().search(arg);
                if matches.is_empty() {
                    println!("no messages match {arg:?}");
                } else {
                    println!("{} matching messages", matches.len());
                    for message in matches {
                        println!("{}: {}", role_tag(message.role), preview(&message.content));
                    }
                }
            }
            "search" => println!("usage: /search <term>"),
            "stats" => {
                let stats = session.transcript().stats();
                println!("total messages: {}", stats.total);
                println!("user messages: {}", stats.user);
                println!("assistant messages: {}", stats.assistant);
                println!("avg response length: {} chars", stats.avg_assistant_chars);
            }
            _ => println!("unknown command: /{name}"),
        }

        false
    }
}

fn role_tag(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "assistant",
        Role::System => "system",
    }
}

/// Truncate long content for the history listing.
fn preview(content: &str) -> String {
    let mut indices = content.char_indices().skip(100);
    match indices.next() {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_owned(),
    }
}

/// Available models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Model {
    /// Llama 3 8B (8192-token context)
    #[default]
    Llama3,
    /// Gemma 2 9B instruction-tuned
    Gemma2,
}

impl From<Model> for ModelKind {
    fn from(model: Model) -> Self {
        match model {
            Model::Llama3 => ModelKind::Llama3,
            Model::Gemma2 => ModelKind::Gemma2,
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        ModelKind::from(*self).fmt(f)
    }
}
