//! Property-test run profile parsing for CI and local overrides.
//!
//! Every Shima property suite reads its case count, fork mode and repeat
//! count through this module so one set of environment variables tunes them
//! all.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const SHIMA_PBT_FORK_ENV_KEY: &str = "SHIMA_PBT_FORK";
/// Environment variable controlling how often determinism properties rerun
/// the same input.
pub const SHIMA_PBT_REPEAT_RUNS_ENV_KEY: &str = "SHIMA_PBT_REPEAT_RUNS";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
    repeat_runs: u32,
}

impl ProptestRunProfile {
    /// Load a profile from environment variables with provided defaults.
    ///
    /// The repeat count defaults to `4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shima_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// assert!(profile.repeat_runs() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::load_with_repeats(default_cases, default_fork, 4)
    }

    /// Like [`Self::load`], with an explicit default repeat count.
    #[must_use]
    pub fn load_with_repeats(default_cases: u32, default_fork: bool, default_repeats: u32) -> Self {
        let cases = read_env_or_default(PROGTEST_CASES_ENV_KEY, default_cases, parse_positive);
        let fork = read_env_or_default(SHIMA_PBT_FORK_ENV_KEY, default_fork, parse_bool);
        let repeat_runs = read_env_or_default(
            SHIMA_PBT_REPEAT_RUNS_ENV_KEY,
            default_repeats.max(1),
            parse_positive,
        );
        Self {
            cases,
            fork,
            repeat_runs,
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }

    /// How many times a determinism property relabels the same raster.
    #[must_use]
    pub fn repeat_runs(&self) -> u32 {
        self.repeat_runs
    }
}

fn read_env_or_default<T, F>(key: &'static str, default: T, parser: F) -> T
where
    T: Copy,
    F: Fn(&str) -> Result<T, String>,
{
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parser(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "invalid property-test profile override; using default",
        );
        default
    })
}

fn parse_positive(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("value must be > 0".to_owned()),
        Ok(parsed) => Ok(parsed),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}
