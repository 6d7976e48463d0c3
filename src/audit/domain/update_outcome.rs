/// Result of one attempt to refresh the local advisory database.
///
/// `Unavailable` is neither a success nor a failure, and its reason decides
/// whether the command may continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// New data was fetched (or the checkout was already current)
    Updated,
    /// The update ran and did not complete
    Failed,
    /// The update mechanism could not run at all
    Unavailable(UnavailableReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The external tool the update needs is not installed
    ToolMissing,
    /// The database is not something this tool can update (e.g. a plain directory)
    NothingToUpdate,
}
