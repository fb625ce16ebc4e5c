#![forbid(unsafe_code)]

//! Per-instance configuration.
//!
//! Defaults: equal-share policy, flags `wrapped` and `measuring`, every
//! region observed. [`HeaderConfig::from_env`] lets `HBAR_WRAP_POLICY`
//! override the policy.

use std::fmt;

use hbar_layout::{ParseWrapPolicyError, WrapPolicy};

/// Environment variable selecting the wrap policy.
pub const WRAP_POLICY_ENV: &str = "HBAR_WRAP_POLICY";

/// Default flag set while the center sits on its own row.
pub const DEFAULT_WRAPPED_FLAG: &str = "wrapped";

/// Default flag set during a measurement pass.
pub const DEFAULT_MEASURING_FLAG: &str = "measuring";

/// Configuration rejected by [`HeaderConfig::validate`] or
/// [`HeaderConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown wrap policy name.
    Policy(ParseWrapPolicyError),
    /// A presentation flag name was empty.
    EmptyFlag(&'static str),
    /// Both presentation flags share one name.
    DuplicateFlag(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Policy(err) => write!(f, "{WRAP_POLICY_ENV}: {err}"),
            Self::EmptyFlag(which) => write!(f, "{which} flag name is empty"),
            Self::DuplicateFlag(name) => {
                write!(f, "wrapped and measuring flags are both {name:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Policy(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseWrapPolicyError> for ConfigError {
    fn from(err: ParseWrapPolicyError) -> Self {
        Self::Policy(err)
    }
}

/// Configuration for one header instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    /// Wrap predicate.
    pub policy: WrapPolicy,
    /// Flag toggled with the wrapped state.
    pub wrapped_flag: String,
    /// Flag toggled during the measuring phase.
    pub measuring_flag: String,
    /// Observe the three regions and nav column, not only the container.
    pub observe_regions: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            policy: WrapPolicy::default(),
            wrapped_flag: DEFAULT_WRAPPED_FLAG.to_string(),
            measuring_flag: DEFAULT_MEASURING_FLAG.to_string(),
            observe_regions: true,
        }
    }
}

impl HeaderConfig {
    /// Set the wrap policy.
    #[must_use]
    pub fn with_policy(mut self, policy: WrapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rename the presentation flags.
    #[must_use]
    pub fn with_flags(mut self, wrapped: impl Into<String>, measuring: impl Into<String>) -> Self {
        self.wrapped_flag = wrapped.into();
        self.measuring_flag = measuring.into();
        self
    }

    /// Observe only the container instead of every region.
    #[must_use]
    pub fn with_observe_regions(mut self, enabled: bool) -> Self {
        self.observe_regions = enabled;
        self
    }

    /// Check flag names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wrapped_flag.is_empty() {
            return Err(ConfigError::EmptyFlag("wrapped"));
        }
        if self.measuring_flag.is_empty() {
            return Err(ConfigError::EmptyFlag("measuring"));
        }
        if self.wrapped_flag == self.measuring_flag {
            return Err(ConfigError::DuplicateFlag(self.wrapped_flag.clone()));
        }
        Ok(())
    }

    /// Defaults, with `HBAR_WRAP_POLICY` applied when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_policy_override(std::env::var(WRAP_POLICY_ENV).ok().as_deref())
    }

    fn apply_policy_override(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.policy = value.parse()?;
        }
        self.validate()?;
        Ok(self)
    }
}
