//! Status command - show the queue without acting

use crate::cli::context::CommandContext;
use crate::cli::style::Stylize;
use anstream::println;
use chrono::Utc;
use merge_queue::error::Result;
use merge_queue::queue::select_candidate;

/// Show the current queue and the candidate the next cycle would pick
pub async fn run_status(ctx: &CommandContext) -> Result<()> {
    let prs = ctx
        .client
        .list_queued_prs(&ctx.config.label, &ctx.config.base_branch)
        .await?;

    if prs.is_empty() {
        println!(
            "{}",
            format!(
                "No open PRs labeled '{}' against '{}'.",
                ctx.config.label, ctx.config.base_branch
            )
            .muted()
        );
        return Ok(());
    }

    let candidate = select_candidate(&prs).map(|pr| pr.number);

    println!(
        "{} {}",
        "Queue:".emphasis(),
        format!("{} PR(s)", prs.len()).accent()
    );
    println!();

    let mut ordered = prs.clone();
    ordered.sort_by_key(|pr| (pr.created_at, pr.number));

    for pr in &ordered {
        let age = Utc::now().signed_duration_since(pr.created_at);
        let age = if age.num_days() > 0 {
            format!("{}d", age.num_days())
        } else if age.num_hours() > 0 {
            format!("{}h", age.num_hours())
        } else {
            format!("{}m", age.num_minutes().max(0))
        };

        let marker = if candidate == Some(pr.number) {
            "▶".accent()
        } else {
            " ".to_string()
        };

        println!(
            "  {marker} {} {} {}",
            format!("#{}", pr.number).accent(),
            pr.title,
            format!("(queued {age} ago)").muted()
        );
    }

    Ok(())
}
