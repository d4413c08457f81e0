//! Headless Campaign Runner
//!
//! Loads campaign content and rules, advances the calendar (optionally
//! travelling a route), then prints the final world and resolved ending.

use std::path::PathBuf;

use anchorfall::cards::{Card, DEFAULT_GLOBAL_POOL, DEFAULT_REGIONAL_POOL};
use anchorfall::content::{load_content, WorldBuilder};
use anchorfall::core::rng::RandomSource;
use anchorfall::core::types::{RegionId, StabilityTier};
use anchorfall::rules::{load_rules, CampaignRules};
use anchorfall::{Campaign, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Headless Campaign Runner - advance a campaign and report the outcome
#[derive(Parser, Debug)]
#[command(name = "campaign_sim")]
#[command(about = "Advance a campaign deterministically and print the resulting world")]
struct Args {
    /// Campaign content (JSON)
    #[arg(long, default_value = "data/demo_campaign.json")]
    content: PathBuf,

    /// Rule overrides (TOML); built-in defaults when omitted
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Days to advance after the route is travelled
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Comma-separated region ids to travel through, in order
    #[arg(long, value_delimiter = ',')]
    route: Vec<String>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Number of log entries to print
    #[arg(long)]
    recent: Option<usize>,
}

#[derive(Serialize)]
struct RegionReport {
    id: String,
    tier: StabilityTier,
    integrity: Option<i32>,
    reputation: i32,
    visited: bool,
}

#[derive(Serialize)]
struct CampaignReport {
    seed: u64,
    day: u32,
    tension: i32,
    balance: i32,
    regions: Vec<RegionReport>,
    completed_quests: Vec<String>,
    deck: Vec<String>,
    market: Vec<String>,
    recent_events: Vec<String>,
    ending: Option<String>,
    ending_matched: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("anchorfall=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => CampaignRules::default(),
    };
    rules.validate()?;
    let content = load_content(&args.content)?;
    let world = WorldBuilder::new(&content, &rules).build()?;

    tracing::info!("Starting campaign with seed {}", seed);
    let mut campaign = Campaign::seeded(world, seed, rules);

    let mut deck: Vec<Card> = Vec::new();
    for stop in &args.route {
        let region = RegionId::from(stop.as_str());
        if campaign.move_to_region(&region).is_none() {
            tracing::warn!("Skipping unknown region {} in route", region);
        }
        collect_grants(&mut campaign, &content.cards, &mut deck);
    }
    campaign.advance_time(args.days);
    collect_grants(&mut campaign, &content.cards, &mut deck);

    let market = campaign.generate_market(&content.cards, DEFAULT_GLOBAL_POOL, DEFAULT_REGIONAL_POOL);
    let resolution = campaign.determine_ending(&deck, &content.endings);

    let world = campaign.world();
    let report = CampaignReport {
        seed,
        day: world.day(),
        tension: world.tension(),
        balance: world.balance(),
        regions: world
            .regions
            .iter()
            .map(|r| RegionReport {
                id: r.id.to_string(),
                tier: r.stability(),
                integrity: r.anchor().map(|a| a.integrity()),
                reputation: r.reputation(),
                visited: r.visited,
            })
            .collect(),
        completed_quests: world.completed_quests.iter().map(|q| q.id.to_string()).collect(),
        deck: deck.iter().map(|c| c.id.to_string()).collect(),
        market: market.iter().map(|c| c.id.to_string()).collect(),
        recent_events: campaign
            .recent_events(args.recent)
            .iter()
            .map(|e| format!("[day {}] {}", e.day, e.message))
            .collect(),
        ending: resolution.map(|r| r.ending.title.clone()),
        ending_matched: resolution.map(|r| r.matched).unwrap_or(false),
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }
    Ok(())
}

/// Move quest card rewards into the player's deck
fn collect_grants<R: RandomSource>(
    campaign: &mut Campaign<R>,
    cards: &[Card],
    deck: &mut Vec<Card>,
) {
    for grant in campaign.take_grants() {
        for id in &grant.cards {
            match cards.iter().find(|c| &c.id == id) {
                Some(card) => deck.push(card.clone()),
                None => tracing::warn!("Quest {} grants unknown card {}", grant.quest, id),
            }
        }
    }
}

fn print_text(report: &CampaignReport) {
    println!("=== Campaign (seed {}) ===", report.seed);
    println!(
        "Day {}  tension {}  balance {}",
        report.day, report.tension, report.balance
    );
    println!();
    println!("Regions:");
    for region in &report.regions {
        let integrity = region
            .integrity
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:<14} {:<10} integrity {:>3}  reputation {:>4}{}",
            region.id,
            region.tier.label(),
            integrity,
            region.reputation,
            if region.visited { "  (visited)" } else { "" }
        );
    }
    println!();
    println!("Completed quests: {}", report.completed_quests.join(", "));
    println!("Deck: {}", report.deck.join(", "));
    println!("Market: {}", report.market.join(", "));
    println!();
    println!("Recent events:");
    for event in &report.recent_events {
        println!("  {}", event);
    }
    println!();
    match &report.ending {
        Some(title) if report.ending_matched => println!("Ending: {}", title),
        Some(title) => println!("Ending: {} (fallback, no ending matched)", title),
        None => println!("Ending: none defined"),
    }
}
