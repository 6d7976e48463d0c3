mod advisory_matcher;
mod source_policy;

pub use advisory_matcher::AdvisoryMatcher;
pub use source_policy::SourcePolicy;
