use std::path::PathBuf;

use popineq_analysis::profile::{self, ProfileConfig};
use rust_decimal::Decimal;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProfileArg {
    /// Path to the populations JSON file
    populations: PathBuf,
    /// Top percentiles whose share of the total is reported (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["10", "1", "0.1"])]
    top_percentiles: Vec<Decimal>,
    /// Share of the total (in percent) the top contributors must reach
    #[arg(long, default_value = "80")]
    contributor_percentile: Decimal,
    /// Only profile the most populated groups
    #[arg(long)]
    num_groups: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ProfileArg) -> anyhow::Result<()> {
    let populations = util::read_populations_file(&arg.populations, arg.num_groups)?;
    let config = ProfileConfig {
        top_percentiles: arg.top_percentiles.clone(),
        contributor_percentile: arg.contributor_percentile,
    };

    eprintln!("Profiling {} groups...", populations.len());
    let profiles = profile::profile_all(&populations, &config)?;
    eprintln!("Profiles computed");

    util::save_json(&profiles, arg.output.as_deref())
}
