//! Line-oriented REPL frontend over the page controller.

use std::io;

use chat_provider::Role;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::{parse_slash_command, SlashCommand, HELP_TEXT};
use crate::controller::{PageController, QuickAction, SessionEvent};

const PROMPT: &str = ">>> ";

pub fn run(controller: &mut PageController) -> io::Result<()> {
    let mut editor = DefaultEditor::new().map_err(io::Error::other)?;

    println!("AI Commerce Assistant. Type /help for commands.");
    render(controller);

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let _ = editor.add_history_entry(trimmed);

                match parse_slash_command(trimmed) {
                    Some(SlashCommand::Quit) => break,
                    Some(SlashCommand::Help) => println!("{HELP_TEXT}"),
                    Some(SlashCommand::Unknown(command)) => {
                        println!("Unknown command: {command}. Type /help for commands.");
                    }
                    Some(command) => {
                        if let Some(event) = event_for(command) {
                            controller.dispatch(event);
                            render(controller);
                        }
                    }
                    None => {
                        controller.dispatch(SessionEvent::UserInput(trimmed.to_string()));
                        render(controller);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(error) => {
                eprintln!("Input error: {error}");
                break;
            }
        }
    }

    Ok(())
}

// Quit/Help/Unknown are handled inline by the loop above.
fn event_for(command: SlashCommand) -> Option<SessionEvent> {
    let event = match command {
        SlashCommand::New => SessionEvent::NewChat,
        SlashCommand::Save => SessionEvent::SaveChat,
        SlashCommand::List => SessionEvent::ListChats,
        SlashCommand::Load(id) => SessionEvent::LoadChat(id),
        SlashCommand::Delete(id) => SessionEvent::DeleteChat(id),
        SlashCommand::AutoSave => SessionEvent::ToggleAutoSave,
        SlashCommand::Clear => SessionEvent::ClearHistory,
        SlashCommand::Search => SessionEvent::QuickAction(QuickAction::ProductSearch),
        SlashCommand::Orders => SessionEvent::QuickAction(QuickAction::OrderSupport),
        SlashCommand::Deals => SessionEvent::QuickAction(QuickAction::FindDeals),
        SlashCommand::Compare => SessionEvent::QuickAction(QuickAction::ProductCompare),
        SlashCommand::Returns => SessionEvent::QuickAction(QuickAction::Returns),
        SlashCommand::Quit | SlashCommand::Help | SlashCommand::Unknown(_) => return None,
    };

    Some(event)
}

fn render(controller: &mut PageController) {
    for notice in controller.drain_notices() {
        println!("* {notice}");
    }

    for message in controller.take_new_messages() {
        match message.role {
            Role::User => println!("you> {}", message.content),
            Role::Assistant => println!("bot> {}", message.content),
        }
    }
}
