use std::str::FromStr;
use std::time::Duration;

use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct AdmissionConfig {
    /// Default log directive, used when RUST_LOG is not set.
    /// Env: IRONCORE_ADMISSION_LOG
    #[envconfig(from = "IRONCORE_ADMISSION_LOG", default = "info")]
    pub log: String,

    #[envconfig(from = "IRONCORE_ADMISSION_LOG_JSON", default = "false")]
    pub log_json: bool,

    /// text | json
    #[envconfig(from = "IRONCORE_ADMISSION_OUTPUT", default = "text")]
    pub output: OutputFormat,

    /// Deadline for the whole run, enforced by cancelling the validation.
    /// 0 disables it.
    #[envconfig(
        from = "IRONCORE_ADMISSION_LOOKUP_TIMEOUT_SECS",
        default = "30"
    )]
    pub lookup_timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown output format {0:?}, expected text or json")]
pub struct UnknownOutputFormat(String);

impl FromStr for OutputFormat {
    type Err = UnknownOutputFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(UnknownOutputFormat(s.to_string())),
        }
    }
}

impl AdmissionConfig {
    /// Apply explicit command line values on top of the environment.
    pub fn apply_overrides(
        mut self,
        output: Option<OutputFormat>,
        lookup_timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(output) = output {
            self.output = output;
        }
        if let Some(secs) = lookup_timeout_secs {
            self.lookup_timeout_secs = secs;
        }
        self
    }

    pub fn lookup_timeout(&self) -> Option<Duration> {
        match self.lookup_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            log: "info".to_string(),
            log_json: false,
            output: OutputFormat::Text,
            lookup_timeout_secs: 30,
        }
    }
}
