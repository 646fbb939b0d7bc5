//! Inspection commands: run one piece of the reader against a URL or saved page

use std::path::Path;

use colored::Colorize;
use recipe_reader::classify::classify;
use recipe_reader::config::{BLOCKED_HOSTNAMES, MIN_AVERAGE_WEIGHT, MIN_MATCH_COUNT};
use recipe_reader::error::Result;
use recipe_reader::keywords::KeywordModel;
use recipe_reader::locate::find_print_candidate;
use recipe_reader::page::{rendered_text, Page};
use recipe_reader::print_url::is_print_page;

use crate::utils::{parse_page_url, read_markup_file, truncate_str};

/// Report whether a URL is already a print variant
pub fn cmd_check_url(input: &str) -> Result<()> {
    let url = parse_page_url(input)?;
    if is_print_page(url.as_str()) {
        println!("{} {} is a print page", "✓".green(), url);
    } else {
        println!("{} {} is not a print page", "✗".red(), url);
    }
    Ok(())
}

/// Classify a saved page against the built-in keyword model
pub fn cmd_classify(html: &Path, json: bool) -> Result<()> {
    let markup = read_markup_file(html)?;
    let result = classify(&rendered_text(&markup), KeywordModel::builtin());

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let verdict = if result.is_on_topic {
        "on-topic".green().bold()
    } else {
        "off-topic".yellow().bold()
    };
    println!("\n{} {}", html.display(), verdict);
    println!(
        "  Matches: {} (needs more than {})",
        result.match_count, MIN_MATCH_COUNT
    );
    println!(
        "  Average weight: {:.1} (needs more than {:.0})",
        result.average_weight, MIN_AVERAGE_WEIGHT
    );
    Ok(())
}

/// Find the print control in a saved page
pub fn cmd_locate(input: &str, html: &Path, json: bool) -> Result<()> {
    let url = parse_page_url(input)?;
    let markup = read_markup_file(html)?;
    let page = Page::parse(url, &markup);
    let candidate = find_print_candidate(&page, BLOCKED_HOSTNAMES);

    if json {
        println!("{}", serde_json::to_string_pretty(&candidate)?);
        return Ok(());
    }

    match candidate {
        Some(candidate) => {
            println!("\n{} {}", "Found".green().bold(), candidate.url);
            println!(
                "  Element: <{}> {}",
                candidate.element.tag,
                truncate_str(candidate.element.label(), 60).dimmed()
            );
        }
        None => {
            println!("\n{} No print control found on {}", "✗".red(), page.url());
            if let Some(host) = page.hostname() {
                if BLOCKED_HOSTNAMES.contains(&host.as_str()) {
                    println!("  {} is on the opt-out list", host);
                }
            }
        }
    }
    Ok(())
}
