//! Replay command: run a scripted browsing session

use std::path::Path;

use colored::Colorize;
use recipe_reader::error::Result;
use recipe_reader::navigate::NavigationKind;
use recipe_reader::redirect::RedirectDecision;
use recipe_reader::runner::PageLoadReport;
use recipe_reader::scenario::{replay, ReplayReport, Scenario};

use crate::utils::truncate_str;

/// Replay a scenario file and print what happened on each load
pub fn cmd_replay(path: &Path, json: bool) -> Result<()> {
    let (scenario, base_dir) = Scenario::load_from_file(path)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let report = runtime.block_on(replay(&scenario, &base_dir))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &ReplayReport) {
    for (index, step) in report.steps.iter().enumerate() {
        println!("\n{} {}", format!("[{}]", index + 1).bold(), step.report.url());

        match &step.report {
            PageLoadReport::Content { decision, observation, .. } => {
                let text = match decision {
                    RedirectDecision::AlreadyOnPrintPage => "already a print page".normal(),
                    RedirectDecision::OffTopic => "not a recipe page".dimmed(),
                    RedirectDecision::Suppressed => "just came back, staying".yellow(),
                    RedirectDecision::NoCandidate => "no print link found".yellow(),
                    RedirectDecision::Redirected { .. } => "redirected".green(),
                };
                println!("  Content page: {}", text);
                if let Some(outcome) = observation {
                    println!("  Watched {} later rendering(s)", outcome.notifications());
                }
            }
            PageLoadReport::Print { back_control, .. } => match back_control {
                Some(control) => println!(
                    "  Print page: back control \"{}\" -> {}",
                    truncate_str(control.label(), 40),
                    control.target()
                ),
                None => println!("  Print page: {}", "no way back".yellow()),
            },
        }

        for navigation in &step.navigations {
            let how = match navigation.kind {
                NavigationKind::Scripted => "navigate",
                NavigationKind::Native => "follow link",
            };
            println!("  {} {} {}", "→".cyan(), how, navigation.url);
        }
    }
    println!();
}
