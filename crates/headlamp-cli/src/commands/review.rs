use super::applications::watch_for_submission;
use super::chat::print_latest_reply;
use crate::context::AppContext;
use crate::helper::{CliHelper, Repl};
use crate::input::{REVIEW_HELP, ReviewCommand, parse_review_line};
use crate::render::print_draft;
use anyhow::Result;
use colored::Colorize;
use headlamp_application::{ChatSession, SendOutcome, SubmitOutcome};
use headlamp_core::draft::DraftEditor;
use rustyline::error::ReadlineError;

/// Interactive review of the latest draft. Returns when the draft is
/// submitted, cancelled or discarded.
pub async fn run(ctx: &AppContext, session: &ChatSession, rl: &mut Repl) -> Result<()> {
    let Some(draft) = session.latest_draft() else {
        println!("{}", "There is no application draft to review yet.".yellow());
        return Ok(());
    };

    let editor = DraftEditor::open(&draft);
    let organization_ids = editor.offered().iter().map(|org| org.id).collect();
    rl.set_helper(Some(CliHelper::review(organization_ids)));
    let result = review_loop(ctx, session, rl, editor).await;
    rl.set_helper(Some(CliHelper::chat()));
    result
}

async fn review_loop(
    ctx: &AppContext,
    session: &ChatSession,
    rl: &mut Repl,
    mut editor: DraftEditor,
) -> Result<()> {
    print_draft(&editor);
    println!("{}", REVIEW_HELP.bright_black());

    loop {
        let line = match rl.readline("review> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("{}", "Review cancelled.".bright_black());
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        match parse_review_line(&line) {
            ReviewCommand::Show => print_draft(&editor),
            ReviewCommand::Name(name) => editor.set_name(name),
            ReviewCommand::Phone(phone) => editor.set_phone(phone),
            ReviewCommand::Email(email) => editor.set_email(email),
            ReviewCommand::Summary(summary) => editor.set_summary(summary),
            ReviewCommand::Toggle(id) => match editor.toggle_organization(id) {
                Ok(true) => println!("{}", format!("Organization {id} selected.").green()),
                Ok(false) => println!("{}", format!("Organization {id} removed.").bright_black()),
                Err(e) => println!("{}", e.to_string().yellow()),
            },
            ReviewCommand::Consent => {
                let consent = !editor.has_consent();
                editor.set_consent(consent);
                let text = if consent {
                    "Consent given. Your details will be shared with the selected organizations."
                } else {
                    "Consent withdrawn."
                };
                println!("{}", text.bright_black());
            }
            ReviewCommand::Cancel => {
                println!("{}", "Review cancelled.".bright_black());
                return Ok(());
            }
            ReviewCommand::Submit => match submit(ctx, session, editor).await {
                Some(kept) => {
                    editor = kept;
                    print_draft(&editor);
                }
                None => return Ok(()),
            },
            ReviewCommand::Invalid(message) => {
                println!("{}", message.yellow());
                println!("{}", REVIEW_HELP.bright_black());
            }
        }
    }
}

/// Submits the draft and, on success, watches for the new application.
///
/// Returns the editor when the review should continue.
async fn submit(ctx: &AppContext, session: &ChatSession, editor: DraftEditor) -> Option<DraftEditor> {
    if let Some(issue) = editor.validation_issue() {
        println!("{}", issue.to_string().yellow());
        return Some(editor);
    }

    // The listing is read before submitting so the new record is not
    // mistaken for one the user already had.
    let view = ctx.applications_view(session.user_id());
    view.load().await;

    println!("{}", "...".bright_black());
    match session.submit_draft(editor).await {
        SubmitOutcome::Invalid { editor, issue } => {
            println!("{}", issue.to_string().yellow());
            Some(editor)
        }
        SubmitOutcome::Submitted => {
            print_latest_reply(session);
            println!("{}", "Application sent.".green());
            watch_for_submission(&view).await;
            None
        }
        SubmitOutcome::NotSubmitted { outcome, retained } => {
            let message = match outcome {
                SendOutcome::SkippedBusy => "Still waiting for the previous reply.".to_string(),
                _ => session.error().unwrap_or_else(|| "The application was not sent.".to_string()),
            };
            println!("{}", message.red());
            if retained.is_some() {
                println!("{}", "Your draft was kept. Type submit to try again.".bright_black());
            } else {
                println!("{}", "The draft was discarded.".bright_black());
            }
            retained
        }
    }
}
