//! Application identity and device facts
//!
//! Everything in here is fixed for the lifetime of the agent and flows into
//! the immutable prefix of every beacon.

use vantage_protocol::percent_encode;

/// Application identity and device facts supplied by the host at boot
#[derive(Debug, Clone)]
pub struct AppConfig {
    application_id: String,
    percent_encoded_application_id: String,
    application_name: Option<String>,
    application_version: Option<String>,
    operating_system: Option<String>,
    manufacturer: Option<String>,
    model_id: Option<String>,
    device_id: i64,
}

impl AppConfig {
    /// Create a config from the two mandatory facts.
    ///
    /// The percent-encoded form of the application id is precomputed here
    /// because it is embedded into every web-request tag.
    pub fn new(application_id: impl Into<String>, device_id: i64) -> Self {
        let application_id = application_id.into();
        let percent_encoded_application_id = percent_encode(&application_id, &['_']);
        Self {
            application_id,
            percent_encoded_application_id,
            application_name: None,
            application_version: None,
            operating_system: None,
            manufacturer: None,
            model_id: None,
            device_id,
        }
    }

    /// Set the human-readable application name
    #[must_use]
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Set the application version
    #[must_use]
    pub fn with_application_version(mut self, version: impl Into<String>) -> Self {
        self.application_version = Some(version.into());
        self
    }

    /// Set the operating system reported in the device block
    #[must_use]
    pub fn with_operating_system(mut self, os: impl Into<String>) -> Self {
        self.operating_system = Some(os.into());
        self
    }

    /// Set the device manufacturer reported in the device block
    #[must_use]
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Set the device model reported in the device block
    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    #[inline]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Application id in its percent-encoded wire form
    #[inline]
    pub fn percent_encoded_application_id(&self) -> &str {
        &self.percent_encoded_application_id
    }

    #[inline]
    pub fn application_name(&self) -> Option<&str> {
        self.application_name.as_deref()
    }

    #[inline]
    pub fn application_version(&self) -> Option<&str> {
        self.application_version.as_deref()
    }

    #[inline]
    pub fn operating_system(&self) -> Option<&str> {
        self.operating_system.as_deref()
    }

    #[inline]
    pub fn manufacturer(&self) -> Option<&str> {
        self.manufacturer.as_deref()
    }

    #[inline]
    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    /// Device id configured by the host; only sent when privacy allows
    #[inline]
    pub fn device_id(&self) -> i64 {
        self.device_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = AppConfig::new("my-app", 42);
        assert_eq!(config.application_id(), "my-app");
        assert_eq!(config.device_id(), 42);
        assert!(config.application_name().is_none());
        assert!(config.operating_system().is_none());
    }

    #[test]
    fn test_application_id_is_percent_encoded_with_reserved_underscore() {
        let config = AppConfig::new("my_app id", 1);
        assert_eq!(config.percent_encoded_application_id(), "my%5Fapp%20id");
    }

    #[test]
    fn test_builder_fields() {
        let config = AppConfig::new("app", 1)
            .with_application_name("Shop Frontend")
            .with_application_version("2.1.0")
            .with_operating_system("Linux")
            .with_manufacturer("Acme")
            .with_model_id("X200");
        assert_eq!(config.application_name(), Some("Shop Frontend"));
        assert_eq!(config.application_version(), Some("2.1.0"));
        assert_eq!(config.operating_system(), Some("Linux"));
        assert_eq!(config.manufacturer(), Some("Acme"));
        assert_eq!(config.model_id(), Some("X200"));
    }
}
