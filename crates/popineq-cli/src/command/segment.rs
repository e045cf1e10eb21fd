use std::path::PathBuf;

use popineq_analysis::segment;
use popineq_stats::breakpoints::{LowerBound, Strategy};
use rust_decimal::Decimal;

use crate::util;

/// Breakpoint strategy selected on the command line.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum StrategyKind {
    /// Count percentiles (`--percentiles`)
    #[default]
    Count,
    /// Cumulative-sum percentiles (`--percentiles`)
    Mass,
    /// Jenks natural breaks (`--classes`)
    Jenks,
    /// Head/tail breaks (`--num-breaks`)
    HeadTail,
    /// Shrinking percentile bands (`--num-breaks`, `--min-percentile`,
    /// `--max-percentile`)
    Shrinking,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SegmentArg {
    /// Path to the populations JSON file
    populations: PathBuf,
    /// Breakpoint strategy: count, mass, jenks, headtail or shrinking
    #[arg(long, default_value = "count")]
    strategy: StrategyKind,
    /// Percentile cut points for the count and mass strategies (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["25", "50", "75"])]
    percentiles: Vec<Decimal>,
    /// Number of classes for Jenks natural breaks
    #[arg(long, default_value_t = 5)]
    classes: usize,
    /// Number of breaks for head/tail and shrinking percentile bands
    #[arg(long, default_value_t = 4)]
    num_breaks: usize,
    /// First cut point of the shrinking percentile bands
    #[arg(long, default_value = "50")]
    min_percentile: Decimal,
    /// Last cut point of the shrinking percentile bands
    #[arg(long, default_value = "100")]
    max_percentile: Decimal,
    /// Leave values at or below this bound unassigned
    #[arg(long)]
    lower_bound: Option<Decimal>,
    /// Only segment the most populated groups
    #[arg(long)]
    num_groups: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SegmentArg {
    fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyKind::Count => Strategy::CountPercentile {
                percentiles: self.percentiles.clone(),
            },
            StrategyKind::Mass => Strategy::CumulativeSumPercentile {
                percentiles: self.percentiles.clone(),
            },
            StrategyKind::Jenks => Strategy::Jenks {
                classes: self.classes,
            },
            StrategyKind::HeadTail => Strategy::HeadTail {
                num_breaks: self.num_breaks,
            },
            StrategyKind::Shrinking => Strategy::ShrinkingPercentile {
                num_breaks: self.num_breaks,
                min_percentile: self.min_percentile,
                max_percentile: self.max_percentile,
            },
        }
    }

    fn lower_bound(&self) -> LowerBound {
        self.lower_bound
            .map_or(LowerBound::Unbounded, LowerBound::Explicit)
    }
}

pub(crate) fn run(arg: &SegmentArg) -> anyhow::Result<()> {
    let populations = util::read_populations_file(&arg.populations, arg.num_groups)?;
    let strategy = arg.strategy();

    eprintln!("Segmenting {} groups with {strategy:?}...", populations.len());
    let segmentations = segment::segment_all(&populations, &strategy, arg.lower_bound())?;
    for (group, result) in &segmentations {
        eprintln!("  {group}: {} bands", result.segmentation.scheme.len());
    }

    util::save_json(&segmentations, arg.output.as_deref())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[clap(flatten)]
        segment: SegmentArg,
    }

    fn parse(args: &[&str]) -> SegmentArg {
        TestArgs::parse_from(["popineq"].iter().chain(args)).segment
    }

    #[test]
    fn test_default_strategy_is_quartiles() {
        let arg = parse(&["input.json"]);
        assert_eq!(
            arg.strategy(),
            Strategy::CountPercentile {
                percentiles: vec![Decimal::from(25), Decimal::from(50), Decimal::from(75)],
            }
        );
        assert_eq!(arg.lower_bound(), LowerBound::Unbounded);
    }

    #[test]
    fn test_strategy_options() {
        let arg = parse(&[
            "input.json",
            "--strategy",
            "shrinking",
            "--num-breaks",
            "3",
            "--min-percentile",
            "90",
            "--lower-bound",
            "0",
        ]);
        assert_eq!(
            arg.strategy(),
            Strategy::ShrinkingPercentile {
                num_breaks: 3,
                min_percentile: Decimal::from(90),
                max_percentile: Decimal::ONE_HUNDRED,
            }
        );
        assert_eq!(arg.lower_bound(), LowerBound::Explicit(Decimal::ZERO));

        let arg = parse(&["input.json", "--strategy", "mass", "--percentiles", "50,80"]);
        assert_eq!(
            arg.strategy(),
            Strategy::CumulativeSumPercentile {
                percentiles: vec![Decimal::from(50), Decimal::from(80)],
            }
        );
    }
}
