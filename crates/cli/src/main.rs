// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Headsup exact preflop equities CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::{io, process::ExitCode, time::Instant};

use headsup_eval::{
    BackendKind, CardSet, Config, Enumerator, HandCatalog, HandClass, SubsetCatalog,
    backend::{self, BLOCK_SIZE},
    default_tasks, eval_checked, regression,
};

mod report;
use report::{Format, Report};

#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    /// The execution backend, cpu or batched.
    #[clap(long, short, default_value = "cpu")]
    backend: BackendKind,
    /// Number of worker threads, defaults to the number of CPUs.
    #[clap(long, short)]
    tasks: Option<usize>,
    /// Number of hands in a block for the batched backend.
    #[clap(long, default_value_t = BLOCK_SIZE)]
    block_size: usize,
    /// The report format.
    #[clap(long, short, value_enum, default_value_t = Format::Text)]
    format: Format,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lists the 169 starting hands.
    Hands,
    /// Runs the regression tests.
    Test {
        /// Scales the number of checked hands and matchups.
        #[clap(default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=64))]
        multiple: u64,
        /// Also checks the categories of all the 7 cards hands.
        #[clap(long)]
        histogram: bool,
    },
    /// Computes ten pseudo random matchups.
    #[clap(name = "some")]
    Sample,
    /// Computes all the matchups between starting hands.
    All,
    /// Computes a single matchup.
    Matchup {
        /// The first player hand, like AKs.
        alice: HandClass,
        /// The second player hand, like QQ.
        bob: HandClass,
    },
    /// Scores a 7 cards hand, like AhKh2c3d9sTsJd.
    Score {
        /// The hand cards.
        cards: CardSet,
    },
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config {
        backend: cli.backend,
        tasks: cli.tasks.unwrap_or_else(default_tasks),
        block_size: cli.block_size,
    };

    let backend = backend::new(&config)?;
    info!("Using {} backend with {} tasks", backend.name(), config.tasks);

    // The score table is cheap, check it before any command.
    regression::check_score_cases(backend.as_ref())?;

    let report = Report::new(cli.format);
    let hands = HandCatalog::build();
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Hands => report.hands(&mut out, &hands)?,
        Command::Score { cards } => {
            let score = eval_checked(cards)?;
            report.score(&mut out, cards, score)?;
        }
        Command::Matchup { alice, bob } => {
            let catalog = SubsetCatalog::build();
            let enumerator = Enumerator::new(&catalog, backend.as_ref());
            compute(&report, &mut out, &enumerator, &[(alice, bob)])?;
        }
        Command::Sample => {
            let catalog = SubsetCatalog::build();
            let enumerator = Enumerator::new(&catalog, backend.as_ref());
            compute(&report, &mut out, &enumerator, &regression::some_pairs(&hands))?;
        }
        Command::All => {
            let catalog = SubsetCatalog::build();
            let enumerator = Enumerator::new(&catalog, backend.as_ref());
            compute(&report, &mut out, &enumerator, &regression::all_pairs(&hands))?;
        }
        Command::Test {
            multiple,
            histogram,
        } => test(&report, &mut out, &config, &hands, multiple as usize, histogram)?,
    }

    Ok(())
}

/// Computes and reports matchups.
fn compute(
    report: &Report,
    out: &mut impl io::Write,
    enumerator: &Enumerator<'_>,
    pairs: &[(HandClass, HandClass)],
) -> Result<()> {
    let now = Instant::now();
    for (idx, &(alice, bob)) in pairs.iter().enumerate() {
        let outcomes = enumerator.compare_checked(alice, bob)?;
        report.matchup(out, alice, bob, &outcomes)?;

        if pairs.len() > 1 {
            info!(
                "{alice} vs. {bob} done {}/{} in {:.1}s",
                idx + 1,
                pairs.len(),
                now.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}

/// Runs the regression tests.
fn test(
    report: &Report,
    out: &mut impl io::Write,
    config: &Config,
    hands: &HandCatalog,
    multiple: usize,
    histogram: bool,
) -> Result<()> {
    let cpu = backend::new(&Config {
        backend: BackendKind::Cpu,
        ..*config
    })?;
    let batched = backend::new(&Config {
        backend: BackendKind::Batched,
        ..*config
    })?;
    let selected = if config.backend == BackendKind::Cpu {
        cpu.as_ref()
    } else {
        batched.as_ref()
    };

    let cases = regression::check_score_cases(selected)?;
    report.check(out, "score table", cases as u64, None)?;

    info!("Scoring {} rows of {} random draws", 1 << 10, multiple << 10);
    let rows = regression::random_hand_rows(multiple);
    let digest = regression::check_backends_agree(cpu.as_ref(), batched.as_ref(), rows)?;
    report.check(out, "score", digest.hands, Some(digest.fingerprint))?;

    let catalog = SubsetCatalog::build();
    let pairs = regression::sample_pairs(hands, multiple + 1);
    info!(
        "Comparing {} pseudo random pairs of hands, including a matched pair",
        pairs.len()
    );

    let enumerator = Enumerator::new(&catalog, selected);
    let fingerprint = regression::check_matchups(&enumerator, &pairs, |alice, bob, outcomes| {
        info!("{alice} vs. {bob}: {outcomes:?}");
    })?;
    report.check(out, "compare", pairs.len() as u64, Some(fingerprint))?;

    let (alice, bob) = pairs[pairs.len() - 1];
    regression::check_tallies_agree(cpu.as_ref(), batched.as_ref(), alice, bob, &catalog)?;
    report.check(out, "backends", 1, None)?;

    if histogram {
        let total = regression::check_category_histogram(config.tasks)?;
        report.check(out, "histogram", total, None)?;
    }

    Ok(())
}
