use rust_decimal::Decimal;

/// Errors raised by the statistics in this crate.
///
/// These are hard failures: they point at malformed input coming from the
/// data pipeline. Ratios that are merely undefined for a sparse population
/// (a zero denominator in Palma or the 20/20 ratio) are reported as `None`
/// by the functions themselves and never reach this type.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("invalid percentile range: from_pc={from_pc:?}, to_pc={to_pc:?}")]
    InvalidRange {
        from_pc: Option<Decimal>,
        to_pc: Option<Decimal>,
    },
    #[display("percentile {percentile} is not in [0,100]")]
    PercentileOutOfBounds { percentile: Decimal },
    #[display("{value} is not in [0,1]")]
    OutOfUnitRange { value: f64 },
    #[display("negative value {value} in a non-negative series")]
    NegativeValue { value: Decimal },
    #[display("division by zero")]
    DivisionByZero,
    #[display("arithmetic overflow while summing the series")]
    Overflow,
    #[display("empty value series")]
    EmptySeries,
    #[display("cannot split {len} values into {classes} classes")]
    InvalidClassCount { classes: usize, len: usize },
    #[display("{len} values exceed the limit of {limit} for natural breaks")]
    TooManyValues { len: usize, limit: usize },
    #[display("scratch matrices need {cells} cells, limit is {limit}")]
    ScratchTooLarge { cells: usize, limit: usize },
    #[display("number of breaks must be at least 1")]
    InvalidBreakCount,
}
