use std::path::PathBuf;

use popineq_analysis::band_variance::BandVariance;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BandVarianceArg {
    /// Path to the populations JSON file
    populations: PathBuf,
    /// Number of equal population bands per group
    #[arg(long, default_value_t = 5)]
    num_bands: usize,
    /// Only compare the most populated groups
    #[arg(long)]
    num_groups: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &BandVarianceArg) -> anyhow::Result<()> {
    let populations = util::read_populations_file(&arg.populations, arg.num_groups)?;

    eprintln!(
        "Computing {} band shares for {} groups...",
        arg.num_bands,
        populations.len()
    );
    let variance = BandVariance::new(&populations, arg.num_bands)?;
    for (band, cv) in variance.band_cv.iter().enumerate() {
        match cv {
            Some(cv) => eprintln!("  band {band}: CV {cv:.4}"),
            None => eprintln!("  band {band}: CV undefined"),
        }
    }

    util::save_json(&variance, arg.output.as_deref())
}
