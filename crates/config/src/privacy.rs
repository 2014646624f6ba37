//! Privacy configuration
//!
//! Captures what the end user consented to. Every assembler operation is
//! gated on one of the capability queries derived from the two levels; the
//! levels themselves are also reported to the collector (`dl=` / `cl=`).

use serde::Deserialize;

/// How much data the user allowed the agent to collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataCollectionLevel {
    /// Collect nothing
    Off,
    /// Performance data only, no user-identifiable data
    Performance,
    /// Full user-behaviour tracking
    UserBehavior,
}

impl DataCollectionLevel {
    /// Numeric value emitted as `dl=`
    #[inline]
    pub fn protocol_value(self) -> i32 {
        match self {
            Self::Off => 0,
            Self::Performance => 1,
            Self::UserBehavior => 2,
        }
    }
}

/// Whether crashes may be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrashReportingLevel {
    /// Crashes are never reported
    Off,
    /// User did not opt out, but did not opt in either
    OptOutCrashes,
    /// User explicitly opted in
    OptInCrashes,
}

impl CrashReportingLevel {
    /// Numeric value emitted as `cl=`
    #[inline]
    pub fn protocol_value(self) -> i32 {
        match self {
            Self::Off => 0,
            Self::OptOutCrashes => 1,
            Self::OptInCrashes => 2,
        }
    }
}

/// Privacy settings supplied by the host
///
/// # Example
///
/// ```toml
/// [privacy]
/// data-collection-level = "performance"
/// crash-reporting-level = "opt-in-crashes"
/// ```
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PrivacyConfig {
    /// Data collection level
    /// Default: user-behavior
    pub data_collection_level: DataCollectionLevel,

    /// Crash reporting level
    /// Default: opt-in-crashes
    pub crash_reporting_level: CrashReportingLevel,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            data_collection_level: DataCollectionLevel::UserBehavior,
            crash_reporting_level: CrashReportingLevel::OptInCrashes,
        }
    }
}

impl PrivacyConfig {
    /// The configured device id may be sent; otherwise a random one is used
    pub fn is_device_id_sending_allowed(&self) -> bool {
        self.data_collection_level == DataCollectionLevel::UserBehavior
    }

    /// The real session number may be sent; otherwise the literal 1 is used
    pub fn is_session_number_reporting_allowed(&self) -> bool {
        self.data_collection_level == DataCollectionLevel::UserBehavior
    }

    pub fn is_web_request_tracing_allowed(&self) -> bool {
        self.data_collection_level >= DataCollectionLevel::Performance
    }

    pub fn is_session_reporting_allowed(&self) -> bool {
        self.data_collection_level >= DataCollectionLevel::Performance
    }

    pub fn is_action_reporting_allowed(&self) -> bool {
        self.data_collection_level >= DataCollectionLevel::Performance
    }

    pub fn is_value_reporting_allowed(&self) -> bool {
        self.data_collection_level == DataCollectionLevel::UserBehavior
    }

    pub fn is_event_reporting_allowed(&self) -> bool {
        self.data_collection_level == DataCollectionLevel::UserBehavior
    }

    pub fn is_error_reporting_allowed(&self) -> bool {
        self.data_collection_level >= DataCollectionLevel::Performance
    }

    pub fn is_crash_reporting_allowed(&self) -> bool {
        self.crash_reporting_level == CrashReportingLevel::OptInCrashes
    }

    pub fn is_user_identification_allowed(&self) -> bool {
        self.data_collection_level == DataCollectionLevel::UserBehavior
    }
}
