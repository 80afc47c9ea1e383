use super::review;
use crate::context::AppContext;
use crate::helper::{CliHelper, Repl};
use crate::input::{ReplCommand, parse_repl_line};
use crate::render::print_assistant_turn;
use anyhow::Result;
use colored::Colorize;
use headlamp_application::{ChatSession, SendOptions, SendOutcome};
use headlamp_core::chat::Role;
use rustyline::error::ReadlineError;

const HELP: &str = "\
Type a message and press Enter to talk with Headlamp.
  /select <id,id,...> <message>  pick organizations from the suggestions
  /review                        review and submit the latest application draft
  /reset                         start over (your identity is kept)
  quit                           leave";

pub async fn run(ctx: &AppContext) -> Result<()> {
    let session = ctx.start_session().await;

    let mut rl = Repl::new()?;
    rl.set_helper(Some(CliHelper::chat()));

    println!("{}", "=== Headlamp ===".bright_magenta().bold());
    println!(
        "{}",
        "Tell us what kind of help you are looking for. Type /help for commands.".bright_black()
    );
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let command = parse_repl_line(&line);
                if command != ReplCommand::Empty {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match command {
                    ReplCommand::Empty => continue,
                    ReplCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    ReplCommand::Help => println!("{}", HELP.bright_black()),
                    ReplCommand::Reset => {
                        session.reset();
                        println!("{}", "Conversation cleared.".bright_black());
                    }
                    ReplCommand::Review => review::run(ctx, &session, &mut rl).await?,
                    ReplCommand::Message(text) => {
                        send(&session, &text, SendOptions::default()).await;
                    }
                    ReplCommand::Select { ids, message } => {
                        let offered = session.offered_organizations();
                        let unknown: Vec<String> = ids
                            .iter()
                            .filter(|id| !offered.iter().any(|org| org.id == **id))
                            .map(|id| id.to_string())
                            .collect();
                        if !unknown.is_empty() {
                            println!(
                                "{}",
                                format!(
                                    "Not among the suggested organizations: {}",
                                    unknown.join(", ")
                                )
                                .yellow()
                            );
                            continue;
                        }
                        send(&session, &message, SendOptions::clicked(ids)).await;
                    }
                    ReplCommand::Invalid(message) => println!("{}", message.yellow()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}

/// Sends one message and prints the reply or the inline error.
async fn send(session: &ChatSession, text: &str, options: SendOptions) {
    println!("{}", "...".bright_black());
    match session.send(text, options).await {
        SendOutcome::Delivered => print_latest_reply(session),
        SendOutcome::Failed => {
            if let Some(error) = session.error() {
                println!("{}", error.red());
            }
        }
        SendOutcome::SkippedBusy => {
            println!("{}", "Still waiting for the previous reply.".yellow());
        }
        SendOutcome::SkippedEmpty => {}
    }
}

pub(super) fn print_latest_reply(session: &ChatSession) {
    let history = session.history();
    if let Some(turn) = history.last().filter(|turn| turn.role() == Role::Assistant) {
        print_assistant_turn(turn);
    }
}
