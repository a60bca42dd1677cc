//! Run command - process one queue cycle

use crate::cli::context::CommandContext;
use crate::cli::style::{check, Stylize};
use anstream::println;
use merge_queue::cycle::{evaluate_queue, run_cycle, CycleEnd};
use merge_queue::error::Result;
use merge_queue::types::Outcome;

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Evaluate the pipeline but apply no side effect
    pub dry_run: bool,
}

/// Run one queue cycle
pub async fn run_run(ctx: &CommandContext, options: RunOptions) -> Result<()> {
    if options.dry_run {
        return run_dry(ctx).await;
    }

    let end = run_cycle(ctx.client.as_ref(), &ctx.config).await;

    match &end {
        CycleEnd::QueueEmpty => {
            println!("{}", "Queue is empty.".muted());
        }
        CycleEnd::Merged { .. } => {
            println!("{} {end}", check());
        }
        CycleEnd::Updated { .. } | CycleEnd::Skipped { .. } => {
            println!("{} {end}", "·".muted());
        }
        CycleEnd::Dequeued { .. } | CycleEnd::Retrying { .. } => {
            println!("{} {end}", "!".warn());
        }
    }

    Ok(())
}

/// Evaluate the queue and report the would-be outcome without acting
async fn run_dry(ctx: &CommandContext) -> Result<()> {
    println!("{}:", "Cycle plan".emphasis());
    println!();

    let Some((pr, outcome)) = evaluate_queue(ctx.client.as_ref(), &ctx.config).await? else {
        println!("  {}", "Queue is empty".muted());
        return Ok(());
    };

    println!(
        "  Candidate: {} {}",
        format!("#{}", pr.number).accent(),
        pr.title
    );

    match &outcome {
        Outcome::Merge => {
            println!(
                "  {} PR #{} ({})",
                "✓ Would merge".success(),
                pr.number,
                ctx.config.merge_method
            );
        }
        Outcome::UpdateBranch => {
            println!(
                "  {} {} with {}",
                "↪ Would update".accent(),
                pr.head_ref,
                ctx.config.base_branch.accent()
            );
        }
        Outcome::Skip { reason } => {
            println!("  {} {}", "⏭ Would skip:".warn(), reason.muted());
        }
        Outcome::Dequeue { reason } => {
            println!("  {} {}", "✗ Would dequeue:".warn(), reason.muted());
        }
        Outcome::Retry => {
            println!("  {}", "? Would retry next cycle".muted());
        }
    }

    println!();
    println!("{}", "Run without --dry-run to execute.".muted());
    Ok(())
}
