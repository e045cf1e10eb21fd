use popineq_stats::StatsError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("group '{group}': {source}")]
    Group { group: String, source: StatsError },
    #[display("number of bands must be at least 1")]
    InvalidBandCount,
}

impl AnalysisError {
    pub(crate) fn in_group(group: &str) -> impl FnOnce(StatsError) -> Self + '_ {
        move |source| AnalysisError::Group {
            group: group.to_owned(),
            source,
        }
    }
}
