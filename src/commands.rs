#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    New,
    Save,
    List,
    /// Record id argument; may be empty when the user omitted it.
    Load(String),
    /// Record id argument; may be empty when the user omitted it.
    Delete(String),
    AutoSave,
    Clear,
    Quit,
    Search,
    Orders,
    Deals,
    Compare,
    Returns,
    Unknown(String),
}

pub const HELP_TEXT: &str = "Commands: /help, /new, /save, /list, /load <id>, /delete <id>, /autosave, /clear, /quit\nQuick actions: /search, /orders, /deals, /compare, /returns";

pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or(trimmed).to_string();
    let argument = parts.next().unwrap_or("").trim().to_string();

    let parsed = match command.as_str() {
        "/help" => SlashCommand::Help,
        "/new" => SlashCommand::New,
        "/save" => SlashCommand::Save,
        "/list" => SlashCommand::List,
        "/load" => SlashCommand::Load(argument),
        "/delete" => SlashCommand::Delete(argument),
        "/autosave" => SlashCommand::AutoSave,
        "/clear" => SlashCommand::Clear,
        "/quit" => SlashCommand::Quit,
        "/search" => SlashCommand::Search,
        "/orders" => SlashCommand::Orders,
        "/deals" => SlashCommand::Deals,
        "/compare" => SlashCommand::Compare,
        "/returns" => SlashCommand::Returns,
        _ => SlashCommand::Unknown(command),
    };

    Some(parsed)
}
