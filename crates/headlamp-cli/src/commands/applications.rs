use crate::context::AppContext;
use crate::render::print_applications;
use anyhow::Result;
use colored::Colorize;
use headlamp_application::{ApplicationsView, PollOutcome};
use headlamp_core::session::IdentityRepository;

pub async fn run(ctx: &AppContext, watch: bool) -> Result<()> {
    let user_id = ctx.identity_repository.load().await?;
    let view = ctx.applications_view(user_id);
    if view.user_id().is_none() {
        println!(
            "{}",
            "No identity yet. Start a conversation with `headlamp chat` first.".yellow()
        );
        return Ok(());
    }

    let applications = view.load().await;
    if watch {
        watch_for_submission(&view).await;
    } else {
        print_applications(&applications);
    }
    Ok(())
}

/// Polls until a new application shows up, the deadline passes or the user
/// presses Ctrl-C, then prints the listing.
pub async fn watch_for_submission(view: &ApplicationsView) {
    let Some(handle) = view.start_polling() else {
        return;
    };
    println!(
        "{}",
        "Waiting for the application to arrive (Ctrl-C to stop)...".bright_black()
    );

    let outcome = tokio::select! {
        outcome = handle.wait() => outcome,
        _ = tokio::signal::ctrl_c() => PollOutcome::Cancelled,
    };

    match outcome {
        PollOutcome::Found { applications, .. } => {
            println!("{}", "Your application was received.".green());
            print_applications(&applications);
        }
        PollOutcome::TimedOut { applications } => {
            println!(
                "{}",
                "Could not confirm the application yet. It may take a moment to appear."
                    .yellow()
            );
            print_applications(&applications);
        }
        PollOutcome::Cancelled => {
            println!("{}", "Stopped watching.".bright_black());
            print_applications(&view.snapshot().applications);
        }
    }
}
