//! Headless Scenario Runner
//!
//! Runs batches of independent engagements from a scenario file and reports
//! per-kind survivor aggregates for tuning fleet compositions.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use star_siege::core::error::Result;
use star_siege::engine::combatant::Combatant;
use star_siege::engine::engagement::resolve_battle;
use star_siege::io::scenario::Scenario;

/// Headless scenario runner - batch engagements for fleet tuning
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Run batches of seeded engagements from a scenario file")]
struct Args {
    /// Scenario TOML file
    #[arg(long)]
    scenario: PathBuf,

    /// Number of independent engagements to run
    #[arg(long, default_value_t = 100)]
    runs: u32,

    /// Base seed for the batch (random if omitted); run i uses base + i
    #[arg(long)]
    seed: Option<u32>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct BatchReport {
    scenario: String,
    runs: u32,
    base_seed: u32,
    mean_rounds: f64,
    attackers: Vec<CombatantReport>,
    defenders: Vec<CombatantReport>,
}

#[derive(Serialize)]
struct CombatantReport {
    groups: Vec<GroupReport>,
}

#[derive(Serialize)]
struct GroupReport {
    kind: String,
    initial: u64,
    mean_remaining: f64,
    min_remaining: u64,
    max_remaining: u64,
}

/// Per-(combatant, kind) survivor counts accumulated across runs.
struct SurvivorAccumulator {
    initial: Vec<Vec<u64>>,
    totals: Vec<Vec<u64>>,
    mins: Vec<Vec<u64>>,
    maxs: Vec<Vec<u64>>,
}

impl SurvivorAccumulator {
    fn new(roster: &[Combatant], num_kinds: usize) -> Self {
        let initial: Vec<Vec<u64>> = roster
            .iter()
            .map(|c| (0..num_kinds).map(|k| c.group(k as u8)).collect())
            .collect();
        let zeroes = vec![vec![0u64; num_kinds]; roster.len()];
        Self {
            initial,
            totals: zeroes.clone(),
            mins: vec![vec![u64::MAX; num_kinds]; roster.len()],
            maxs: zeroes,
        }
    }

    fn record(&mut self, roster: &[Combatant], num_kinds: usize) {
        for (i, combatant) in roster.iter().enumerate() {
            for kind in 0..num_kinds {
                let remaining = combatant.group(kind as u8);
                self.totals[i][kind] += remaining;
                self.mins[i][kind] = self.mins[i][kind].min(remaining);
                self.maxs[i][kind] = self.maxs[i][kind].max(remaining);
            }
        }
    }

    fn report(&self, kind_names: &[String], runs: u32) -> Vec<CombatantReport> {
        self.initial
            .iter()
            .enumerate()
            .map(|(i, initial)| CombatantReport {
                groups: initial
                    .iter()
                    .enumerate()
                    .filter(|(_, &count)| count > 0)
                    .map(|(kind, &count)| GroupReport {
                        kind: kind_names[kind].clone(),
                        initial: count,
                        mean_remaining: self.totals[i][kind] as f64 / f64::from(runs),
                        min_remaining: self.mins[i][kind],
                        max_remaining: self.maxs[i][kind],
                    })
                    .collect(),
            })
            .collect()
    }
}

fn run(args: &Args) -> Result<BatchReport> {
    let scenario = Scenario::from_file(&args.scenario)?;
    let num_kinds = scenario.catalog.num_kinds();

    let base_seed = args.seed.unwrap_or_else(|| rand::random::<u32>().max(1));

    let (attackers_template, defenders_template) = scenario.rosters();
    let mut attacker_acc = SurvivorAccumulator::new(&attackers_template, num_kinds);
    let mut defender_acc = SurvivorAccumulator::new(&defenders_template, num_kinds);

    let mut total_rounds: u64 = 0;
    for i in 0..args.runs {
        // Skip seed 0 on wraparound; the stream cannot advance from it.
        let seed = base_seed.wrapping_add(i).max(1);

        let (mut attackers, mut defenders) = scenario.rosters();
        let outcome = resolve_battle(&scenario.catalog, &mut attackers, &mut defenders, seed)?;
        total_rounds += u64::from(outcome.num_rounds);

        // Grouped counts hold the survivors after the engine folds back.
        attacker_acc.record(&attackers, num_kinds);
        defender_acc.record(&defenders, num_kinds);
    }

    tracing::info!(
        scenario = %scenario.name,
        runs = args.runs,
        base_seed,
        "batch complete"
    );

    Ok(BatchReport {
        scenario: scenario.name.clone(),
        runs: args.runs,
        base_seed,
        mean_rounds: total_rounds as f64 / f64::from(args.runs),
        attackers: attacker_acc.report(&scenario.kind_names, args.runs),
        defenders: defender_acc.report(&scenario.kind_names, args.runs),
    })
}

fn print_text(report: &BatchReport) {
    println!("Scenario: {}", report.scenario);
    println!("Runs: {} (base seed {})", report.runs, report.base_seed);
    println!("Mean rounds: {:.2}", report.mean_rounds);

    for (who, side) in [("Attacker", &report.attackers), ("Defender", &report.defenders)] {
        for (i, combatant) in side.iter().enumerate() {
            println!();
            println!("{who} #{i}");
            for group in &combatant.groups {
                println!("  {} ({} deployed)", group.kind, group.initial);
                println!("    Mean remaining: {:.1}", group.mean_remaining);
                println!("    Min:  {}", group.min_remaining);
                println!("    Max:  {}", group.max_remaining);
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skirmish=info,star_siege=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.runs == 0 {
        eprintln!("--runs must be at least 1");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(report) => {
            match args.format.as_str() {
                "json" => match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Failed to serialize report: {e}");
                        return ExitCode::FAILURE;
                    }
                },
                "text" => print_text(&report),
                other => {
                    eprintln!("Unknown format '{other}', defaulting to json");
                    println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
