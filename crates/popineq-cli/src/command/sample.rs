use std::path::PathBuf;

use popineq_stats::sampling;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SampleArg {
    /// Path to a JSON array of items, best ranked first
    items: PathBuf,
    /// Number of items to draw
    #[arg(long, default_value_t = 100)]
    count: usize,
    /// Seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SampleArg) -> anyhow::Result<()> {
    let items: Vec<serde_json::Value> = util::read_json_file("ranked items", &arg.items)?;
    eprintln!("Loaded {} ranked items", items.len());

    let sample = match arg.seed {
        Some(seed) => sampling::aslam_sample(&items, arg.count, &mut Pcg32::seed_from_u64(seed)),
        None => sampling::aslam_sample(&items, arg.count, &mut rand::rng()),
    };
    eprintln!("Sampled {} of {} requested items", sample.len(), arg.count);

    util::save_json(&sample, arg.output.as_deref())
}
