//! Parsing of REPL lines.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Quit,
    Help,
    Reset,
    Review,
    Message(String),
    Select { ids: Vec<i64>, message: String },
    Invalid(String),
}

pub const SELECT_USAGE: &str = "Usage: /select <id,id,...> <message>";

pub fn parse_repl_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }
    if trimmed == "quit" || trimmed == "exit" {
        return ReplCommand::Quit;
    }
    if !trimmed.starts_with('/') {
        return ReplCommand::Message(trimmed.to_string());
    }

    let (command, rest) = split_word(trimmed);
    match command {
        "/help" => ReplCommand::Help,
        "/reset" => ReplCommand::Reset,
        "/review" => ReplCommand::Review,
        "/select" => {
            let (ids, message) = split_word(rest);
            match parse_ids(ids) {
                Some(ids) if !message.is_empty() => ReplCommand::Select {
                    ids,
                    message: message.to_string(),
                },
                _ => ReplCommand::Invalid(SELECT_USAGE.to_string()),
            }
        }
        other => ReplCommand::Invalid(format!("Unknown command: {other}")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewCommand {
    Show,
    Name(String),
    Phone(String),
    /// `None` clears the email.
    Email(Option<String>),
    Summary(String),
    Toggle(i64),
    Consent,
    Submit,
    Cancel,
    Invalid(String),
}

pub const REVIEW_HELP: &str = "\
Commands: name <text> | phone <text> | email <text or -> | summary <text>
          toggle <org id> | consent | show | submit | cancel";

pub fn parse_review_line(line: &str) -> ReviewCommand {
    let (command, rest) = split_word(line.trim());
    match command {
        "" | "show" => ReviewCommand::Show,
        "name" => ReviewCommand::Name(rest.to_string()),
        "phone" => ReviewCommand::Phone(rest.to_string()),
        "email" => match rest {
            "" | "-" => ReviewCommand::Email(None),
            email => ReviewCommand::Email(Some(email.to_string())),
        },
        "summary" => ReviewCommand::Summary(rest.to_string()),
        "toggle" => match rest.parse::<i64>() {
            Ok(id) => ReviewCommand::Toggle(id),
            Err(_) => ReviewCommand::Invalid("Usage: toggle <org id>".to_string()),
        },
        "consent" => ReviewCommand::Consent,
        "submit" => ReviewCommand::Submit,
        "cancel" => ReviewCommand::Cancel,
        other => ReviewCommand::Invalid(format!("Unknown review command: {other}")),
    }
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (text, ""),
    }
}

fn parse_ids(text: &str) -> Option<Vec<i64>> {
    let ids: Vec<i64> = text
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.trim().parse::<i64>().ok())
        .collect::<Option<_>>()?;
    (!ids.is_empty()).then_some(ids)
}
