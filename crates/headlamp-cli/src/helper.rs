use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow::{self, Borrowed, Owned};

/// A command word and the argument synopsis shown as a hint after it.
struct PromptCommand {
    name: &'static str,
    args: &'static str,
}

const CHAT_COMMANDS: &[PromptCommand] = &[
    PromptCommand { name: "/select", args: "<id,id,...> <message>" },
    PromptCommand { name: "/review", args: "" },
    PromptCommand { name: "/reset", args: "" },
    PromptCommand { name: "/help", args: "" },
];

const REVIEW_COMMANDS: &[PromptCommand] = &[
    PromptCommand { name: "name", args: "<text>" },
    PromptCommand { name: "phone", args: "<text>" },
    PromptCommand { name: "email", args: "<text or ->" },
    PromptCommand { name: "summary", args: "<text>" },
    PromptCommand { name: "toggle", args: "<org id>" },
    PromptCommand { name: "consent", args: "" },
    PromptCommand { name: "show", args: "" },
    PromptCommand { name: "submit", args: "" },
    PromptCommand { name: "cancel", args: "" },
];

/// rustyline helper for the `>>` chat prompt and the `review>` prompt.
///
/// Completes and highlights the command word of the active prompt and
/// hints its arguments. At the review prompt `toggle` also completes the
/// ids of the offered organizations.
#[derive(Clone)]
pub struct CliHelper {
    mode: PromptMode,
    organization_ids: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptMode {
    Chat,
    Review,
}

impl CliHelper {
    pub fn chat() -> Self {
        Self {
            mode: PromptMode::Chat,
            organization_ids: Vec::new(),
        }
    }

    pub fn review(organization_ids: Vec<i64>) -> Self {
        Self {
            mode: PromptMode::Review,
            organization_ids,
        }
    }

    fn commands(&self) -> &'static [PromptCommand] {
        match self.mode {
            PromptMode::Chat => CHAT_COMMANDS,
            PromptMode::Review => REVIEW_COMMANDS,
        }
    }

    fn find(&self, word: &str) -> Option<&'static PromptCommand> {
        self.commands().iter().find(|cmd| cmd.name == word)
    }

    /// Completions for the text before the cursor, with the byte offset
    /// they replace from.
    fn candidates(&self, head: &str) -> (usize, Vec<String>) {
        match head.split_once(' ') {
            None => {
                if self.mode == PromptMode::Chat && !head.starts_with('/') {
                    return (0, Vec::new());
                }
                let names = self
                    .commands()
                    .iter()
                    .filter(|cmd| cmd.name.starts_with(head))
                    .map(|cmd| cmd.name.to_string())
                    .collect();
                (0, names)
            }
            Some(("toggle", rest)) if self.mode == PromptMode::Review && !rest.contains(' ') => {
                let ids = self
                    .organization_ids
                    .iter()
                    .map(|id| id.to_string())
                    .filter(|id| id.starts_with(rest))
                    .collect();
                ("toggle ".len(), ids)
            }
            Some(_) => (0, Vec::new()),
        }
    }

    fn hint_for(&self, head: &str) -> Option<String> {
        match head.split_once(' ') {
            None => {
                let cmd = self
                    .commands()
                    .iter()
                    .find(|cmd| cmd.name.starts_with(head) && !head.is_empty())?;
                let rest = &cmd.name[head.len()..];
                if cmd.args.is_empty() {
                    (!rest.is_empty()).then(|| rest.to_string())
                } else {
                    Some(format!("{rest} {}", cmd.args))
                }
            }
            Some((word, "")) => self
                .find(word)
                .filter(|cmd| !cmd.args.is_empty())
                .map(|cmd| cmd.args.to_string()),
            Some(_) => None,
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, names) = self.candidates(&line[..pos]);
        let candidates = names
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        if self.find(word).is_none() {
            return Borrowed(line);
        }
        if line.len() == word.len() {
            Owned(word.bright_cyan().to_string())
        } else {
            Owned(format!("{} {rest}", word.bright_cyan()))
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    // The command word can only change while the cursor is inside it.
    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        forced || line.get(..pos).is_some_and(|head| !head.contains(' '))
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.hint_for(line)
    }
}

impl Validator for CliHelper {}

pub type Repl = rustyline::Editor<CliHelper, rustyline::history::DefaultHistory>;
