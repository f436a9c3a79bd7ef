use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct IamDiffConfig {
    /// Default tracing directive when RUST_LOG is unset
    /// Env: OPRC_IAM_LOG
    #[envconfig(from = "OPRC_IAM_LOG", default = "info")]
    pub log: String,

    /// Treat comparison failures as "up to date" (no update attempted).
    /// The error is still reported.
    /// Env: OPRC_IAM_FAIL_OPEN
    #[envconfig(from = "OPRC_IAM_FAIL_OPEN", default = "true")]
    pub fail_open: bool,

    /// json | pretty
    /// Env: OPRC_IAM_OUTPUT
    #[envconfig(from = "OPRC_IAM_OUTPUT", default = "json")]
    pub output: String,
}

impl Default for IamDiffConfig {
    fn default() -> Self {
        Self {
            log: "info".into(),
            fail_open: true,
            output: "json".into(),
        }
    }
}

impl IamDiffConfig {
    pub fn pretty_output(&self) -> bool {
        self.output.eq_ignore_ascii_case("pretty")
    }

    pub fn render<T: serde::Serialize>(&self, value: &T) -> serde_json::Result<String> {
        if self.pretty_output() {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}
