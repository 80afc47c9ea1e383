use crate::context::AppContext;
use anyhow::Result;
use colored::Colorize;
use headlamp_core::session::IdentityRepository;

pub async fn show(ctx: &AppContext) -> Result<()> {
    match ctx.identity_repository.load().await? {
        Some(user_id) => println!("{user_id}"),
        None => println!("{}", "No identity has been assigned yet.".bright_black()),
    }
    Ok(())
}

/// The next conversation starts anonymous and the backend assigns a new id.
pub async fn forget(ctx: &AppContext) -> Result<()> {
    ctx.identity_repository.clear().await?;
    tracing::info!(path = %ctx.identity_repository.path().display(), "Identity forgotten");
    println!("{}", "Identity forgotten.".bright_green());
    Ok(())
}
