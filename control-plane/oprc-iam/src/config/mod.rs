mod types;

pub use types::IamDiffConfig;
