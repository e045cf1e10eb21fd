use clap::{Parser, Subcommand};

use self::{
    band_variance::BandVarianceArg, profile::ProfileArg, sample::SampleArg, segment::SegmentArg,
};
use crate::logger;

mod band_variance;
mod profile;
mod sample;
mod segment;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Print debug messages from the statistics to stderr
    #[arg(long, global = true)]
    verbose: bool,
    /// What analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute inequality scores of every group
    Profile(#[clap(flatten)] ProfileArg),
    /// Split every group into value bands
    Segment(#[clap(flatten)] SegmentArg),
    /// Compare equal population bands across groups
    BandVariance(#[clap(flatten)] BandVarianceArg),
    /// Draw a stratified sample from a ranked list
    Sample(#[clap(flatten)] SampleArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logger::init(args.verbose)?;
    match args.mode {
        Mode::Profile(arg) => profile::run(&arg)?,
        Mode::Segment(arg) => segment::run(&arg)?,
        Mode::BandVariance(arg) => band_variance::run(&arg)?,
        Mode::Sample(arg) => sample::run(&arg)?,
    }
    Ok(())
}
