//! Generation settings loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{Credits, PROMPT_SUGGESTIONS};

/// Configuration values for the generation demo.
///
/// Layered from defaults, a configuration file, `SITEGEN_*` environment
/// variables and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SITEGEN")]
pub struct GenerationSettings {
    /// Credits granted to a newly registered account.
    #[ortho_config(default = 5)]
    pub starting_credits: u32,
    /// Simulated backend latency in milliseconds.
    #[ortho_config(default = 3000)]
    pub latency_ms: u64,
    /// Make the simulated backend fail every request.
    #[ortho_config(default = false)]
    pub fail_generation: bool,
    /// Prompt to submit; the first curated suggestion when absent.
    pub prompt: Option<String>,
}

impl GenerationSettings {
    /// Opening balance for new accounts.
    pub fn starting_credits(&self) -> Credits {
        Credits::new(self.starting_credits)
    }

    /// Simulated backend latency.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Prompt to submit, falling back to the first suggestion.
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(PROMPT_SUGGESTIONS[0])
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for generation settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> GenerationSettings {
        GenerationSettings::load_from_iter([OsString::from("sitegen")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("SITEGEN_STARTING_CREDITS", None::<String>),
            ("SITEGEN_LATENCY_MS", None::<String>),
            ("SITEGEN_FAIL_GENERATION", None::<String>),
            ("SITEGEN_PROMPT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.starting_credits(), Credits::new(5));
        assert_eq!(settings.latency(), Duration::from_secs(3));
        assert!(!settings.fail_generation);
        assert_eq!(settings.prompt(), PROMPT_SUGGESTIONS[0]);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SITEGEN_STARTING_CREDITS", Some("0".to_owned())),
            ("SITEGEN_LATENCY_MS", Some("25".to_owned())),
            ("SITEGEN_FAIL_GENERATION", Some("true".to_owned())),
            ("SITEGEN_PROMPT", Some("A bakery site".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.starting_credits(), Credits::ZERO);
        assert_eq!(settings.latency(), Duration::from_millis(25));
        assert!(settings.fail_generation);
        assert_eq!(settings.prompt(), "A bakery site");
    }

    #[rstest]
    fn command_line_flags_are_parsed() {
        let _guard = lock_env([
            ("SITEGEN_STARTING_CREDITS", None::<String>),
            ("SITEGEN_LATENCY_MS", None::<String>),
        ]);

        let settings = GenerationSettings::load_from_iter([
            OsString::from("sitegen"),
            OsString::from("--starting-credits"),
            OsString::from("2"),
            OsString::from("--latency-ms"),
            OsString::from("40"),
        ])
        .expect("config should load");

        assert_eq!(settings.starting_credits(), Credits::new(2));
        assert_eq!(settings.latency(), Duration::from_millis(40));
    }
}
