use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("malformed AssumeRolePolicyDocument JSON: {0}")]
    MalformedDocument(#[source] serde_json::Error),

    #[error("unable to determine if external resource is up to date: {0}")]
    ComparisonInfrastructure(String),

    #[error("cannot construct role patch: {0}")]
    PatchConstruction(String),
}

impl DiffError {
    /// Verdict an up-to-date check reports alongside this error.
    ///
    /// Only comparison failures fail open; a malformed desired document is
    /// real drift that cannot be assessed.
    pub fn assume_up_to_date(&self) -> bool {
        matches!(self, DiffError::ComparisonInfrastructure(_))
    }
}

impl From<serde_json::Error> for DiffError {
    fn from(e: serde_json::Error) -> Self {
        DiffError::PatchConstruction(e.to_string())
    }
}
