// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Results reports.
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use headsup_eval::{CardSet, HandCatalog, HandClass, Outcomes, Score};

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human readable text.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// A matchup result line.
#[derive(Debug, Serialize)]
struct MatchupRecord {
    alice: String,
    bob: String,
    outcomes: Outcomes,
    total: u64,
    alice_ratio: f64,
    bob_ratio: f64,
    tie_ratio: f64,
}

/// A scored hand line.
#[derive(Debug, Serialize)]
struct ScoreRecord {
    cards: String,
    rank: String,
    score: u32,
    description: String,
}

/// A passed check line.
#[derive(Debug, Serialize)]
struct CheckRecord<'a> {
    check: &'a str,
    count: u64,
    fingerprint: Option<String>,
}

/// Writes results in the selected format.
#[derive(Debug, Clone, Copy)]
pub struct Report {
    format: Format,
}

impl Report {
    /// Creates a report for the given format.
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    /// Writes the starting hands in catalog order.
    pub fn hands(&self, out: &mut impl Write, catalog: &HandCatalog) -> Result<()> {
        let hands = catalog
            .hands()
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();

        match self.format {
            Format::Text => writeln!(out, "hands = {}", hands.join(" "))?,
            Format::Json => {
                serde_json::to_writer(&mut *out, &serde_json::json!({ "hands": hands }))?;
                writeln!(out)?;
            }
        }

        Ok(())
    }

    /// Writes a matchup result.
    pub fn matchup(
        &self,
        out: &mut impl Write,
        alice: HandClass,
        bob: HandClass,
        outcomes: &Outcomes,
    ) -> Result<()> {
        match self.format {
            Format::Text => {
                let total = outcomes.total();
                writeln!(out, "{alice} vs. {bob}:")?;
                writeln!(
                    out,
                    "  Alice: {}/{total} = {}",
                    outcomes.alice,
                    format_ratio(outcomes.alice_ratio())
                )?;
                writeln!(
                    out,
                    "  Bob:   {}/{total} = {}",
                    outcomes.bob,
                    format_ratio(outcomes.bob_ratio())
                )?;
                writeln!(
                    out,
                    "  Tie:   {}/{total} = {}",
                    outcomes.tie,
                    format_ratio(outcomes.tie_ratio())
                )?;
            }
            Format::Json => {
                let record = MatchupRecord {
                    alice: alice.to_string(),
                    bob: bob.to_string(),
                    outcomes: *outcomes,
                    total: outcomes.total(),
                    alice_ratio: outcomes.alice_ratio(),
                    bob_ratio: outcomes.bob_ratio(),
                    tie_ratio: outcomes.tie_ratio(),
                };
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
        }

        Ok(())
    }

    /// Writes the score of a hand.
    pub fn score(&self, out: &mut impl Write, cards: CardSet, score: Score) -> Result<()> {
        match self.format {
            Format::Text => writeln!(out, "{cards}: {score} (0x{:08x})", score.value())?,
            Format::Json => {
                let record = ScoreRecord {
                    cards: cards.to_string(),
                    rank: score.rank().to_string(),
                    score: score.value(),
                    description: score.to_string(),
                };
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
        }

        Ok(())
    }

    /// Writes a passed check with the number of checked items.
    pub fn check(
        &self,
        out: &mut impl Write,
        check: &str,
        count: u64,
        fingerprint: Option<u64>,
    ) -> Result<()> {
        let fingerprint = fingerprint.map(|f| format!("0x{f:016x}"));
        match self.format {
            Format::Text => {
                write!(out, "{check} test passed: {count} checked")?;
                if let Some(f) = &fingerprint {
                    write!(out, ", fingerprint {f}")?;
                }
                writeln!(out)?;
            }
            Format::Json => {
                let record = CheckRecord {
                    check,
                    count,
                    fingerprint,
                };
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
        }

        Ok(())
    }
}

/// Formats a ratio with 6 significant digits and no trailing zeros, like
/// the C `%g` conversion.
pub fn format_ratio(x: f64) -> String {
    const PRECISION: i32 = 6;

    if x == 0.0 || !x.is_finite() {
        return x.to_string();
    }

    // Rounds to the precision first, the exponent may change with rounding.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, x);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exp = exp.parse::<i32>().unwrap_or(0);

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs())
    } else {
        let decimals = (PRECISION - 1 - exp) as usize;
        trim_zeros(&format!("{x:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios() {
        assert_eq!(format_ratio(0.0), "0");
        assert_eq!(format_ratio(1.0), "1");
        assert_eq!(format_ratio(0.5), "0.5");
        assert_eq!(format_ratio(1.0 / 3.0), "0.333333");
        assert_eq!(format_ratio(2.0 / 3.0), "0.666667");
        assert_eq!(format_ratio(0.123456789), "0.123457");
        assert_eq!(format_ratio(0.0123), "0.0123");
        assert_eq!(format_ratio(0.00012), "0.00012");
        assert_eq!(format_ratio(0.00005), "5e-05");
        assert_eq!(format_ratio(0.0000123456789), "1.23457e-05");
        assert_eq!(format_ratio(0.9999999), "1");
    }

    #[test]
    fn text_matchup() {
        let outcomes = Outcomes {
            alice: 1,
            bob: 2,
            tie: 1,
        };

        let mut out = Vec::new();
        Report::new(Format::Text)
            .matchup(&mut out, "AKs".parse().unwrap(), "QQ".parse().unwrap(), &outcomes)
            .unwrap();

        let expected = "AKs vs. QQ:\n\
                        \x20 Alice: 1/4 = 0.25\n\
                        \x20 Bob:   2/4 = 0.5\n\
                        \x20 Tie:   1/4 = 0.25\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn json_matchup() {
        let outcomes = Outcomes {
            alice: 3,
            bob: 1,
            tie: 0,
        };

        let mut out = Vec::new();
        Report::new(Format::Json)
            .matchup(&mut out, "72o".parse().unwrap(), "AA".parse().unwrap(), &outcomes)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["alice"], "72o");
        assert_eq!(value["bob"], "AA");
        assert_eq!(value["outcomes"]["alice"], 3);
        assert_eq!(value["outcomes"]["tie"], 0);
        assert_eq!(value["total"], 4);
        assert_eq!(value["alice_ratio"], 0.75);
        assert!(out.ends_with(b"\n"));
    }

    #[test]
    fn hands_line() {
        let mut out = Vec::new();
        Report::new(Format::Text)
            .hands(&mut out, &HandCatalog::build())
            .unwrap();

        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with("hands = 22 33 32o 32s 44 42o"));
        assert!(line.contains(" AA A2o A2s "));
        assert!(line.ends_with("AQs AKo AKs\n"));
        assert_eq!(line.split_whitespace().count(), 169 + 2);
    }

    #[test]
    fn score_and_check_lines() {
        let cards = "AhKhQhJhTh2c3d".parse().unwrap();
        let score = headsup_eval::eval(cards);

        let mut out = Vec::new();
        let report = Report::new(Format::Text);
        report.score(&mut out, cards, score).unwrap();
        report.check(&mut out, "compare", 2, Some(0xab)).unwrap();
        report.check(&mut out, "histogram", 9, None).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert!(lines[0].contains("straight-flush"));
        assert_eq!(
            lines[1],
            "compare test passed: 2 checked, fingerprint 0x00000000000000ab"
        );
        assert_eq!(lines[2], "histogram test passed: 9 checked");
    }
}
