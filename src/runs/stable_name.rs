//! Stable test name resolution.
//!
//! Filename shape: `<timestamp>_<test name>[<browser>-<shard>-<total>].json`
//! where the bracketed suffix is optional.
//!
//! Example: `20241219180018_test_form_input_performance[chromium-4-10].json`
//! resolves to `test_form_input_performance`.

use crate::utils::config::TRACE_FILE_EXTENSION;
use crate::utils::error::NamingError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Timestamp, test name and optional bracketed run parameters of a
    /// filename with its extension removed
    static ref TEST_RUN_PATTERN: Regex =
        Regex::new(r"^(?P<timestamp>\d+)_(?P<name>[^\[\]]+?)(?:\[(?P<params>[^\[\]]*)\])?$")
            .unwrap();
}

/// Browser/shard suffix of a test run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    /// Bracket content as written, e.g. `chromium-4-10`
    pub raw: String,

    /// Browser the run executed in
    pub browser: String,

    /// Shard index, when the suffix carries one
    pub shard: Option<u32>,

    /// Total shard count, when the suffix carries one
    pub total: Option<u32>,
}

impl RunParameters {
    /// Split `browser-shard-total`. The browser segment may contain hyphens;
    /// shard and total are only taken when both trailing segments are numeric.
    fn parse(raw: &str) -> Self {
        let mut parts = raw.rsplitn(3, '-');
        let total = parts.next().and_then(|p| p.parse::<u32>().ok());
        let shard = parts.next().and_then(|p| p.parse::<u32>().ok());
        let browser = parts.next();

        match (browser, shard, total) {
            (Some(browser), Some(shard), Some(total)) => Self {
                raw: raw.to_string(),
                browser: browser.to_string(),
                shard: Some(shard),
                total: Some(total),
            },
            _ => Self {
                raw: raw.to_string(),
                browser: raw.to_string(),
                shard: None,
                total: None,
            },
        }
    }
}

/// One execution of a test, as described by its capture filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRun {
    pub filename: String,
    pub timestamp: String,
    pub stable_name: String,
    pub run_parameters: Option<RunParameters>,
}

/// Parse a `.json` capture filename into its run descriptor
///
/// # Errors
/// * `NamingError::InvalidExtension` - filename does not end with `.json`
/// * `NamingError::InvalidFormat` - filename lacks the timestamp/test-name shape
pub fn parse_test_run(filename: &str) -> Result<TestRun, NamingError> {
    parse_test_run_with_extension(filename, TRACE_FILE_EXTENSION)
}

/// Parse a capture filename carrying `extension` into its run descriptor
///
/// **Public** - used by the pipeline grouping stage with the configured extension
pub fn parse_test_run_with_extension(
    filename: &str,
    extension: &str,
) -> Result<TestRun, NamingError> {
    let stem = filename
        .strip_suffix(extension)
        .ok_or_else(|| NamingError::InvalidExtension {
            filename: filename.to_string(),
            expected: extension.to_string(),
        })?;

    let captures = TEST_RUN_PATTERN
        .captures(stem)
        .ok_or_else(|| NamingError::InvalidFormat(filename.to_string()))?;

    let timestamp = captures
        .name("timestamp")
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| NamingError::InvalidFormat(filename.to_string()))?;

    let stable_name = captures
        .name("name")
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| NamingError::InvalidFormat(filename.to_string()))?;

    let run_parameters = captures
        .name("params")
        .map(|m| RunParameters::parse(m.as_str()));

    Ok(TestRun {
        filename: filename.to_string(),
        timestamp,
        stable_name,
        run_parameters,
    })
}

/// Resolve the stable test name shared by all executions of a test
///
/// **Public** - main entry point for name resolution
pub fn stable_test_name(filename: &str) -> Result<String, NamingError> {
    parse_test_run(filename).map(|run| run.stable_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_parameters_with_shard() {
        let params = RunParameters::parse("chromium-4-10");
        assert_eq!(params.browser, "chromium");
        assert_eq!(params.shard, Some(4));
        assert_eq!(params.total, Some(10));
    }

    #[test]
    fn test_run_parameters_hyphenated_browser() {
        let params = RunParameters::parse("mobile-safari-2-5");
        assert_eq!(params.browser, "mobile-safari");
        assert_eq!(params.shard, Some(2));
        assert_eq!(params.total, Some(5));
    }

    #[test]
    fn test_run_parameters_browser_only() {
        let params = RunParameters::parse("webkit");
        assert_eq!(params.browser, "webkit");
        assert_eq!(params.shard, None);
        assert_eq!(params.total, None);
    }

    #[test]
    fn test_parse_test_run_full() {
        let run = parse_test_run("20241219180018_test_form_input_performance[webkit-1-10].json")
            .unwrap();
        assert_eq!(run.timestamp, "20241219180018");
        assert_eq!(run.stable_name, "test_form_input_performance");
        let params = run.run_parameters.unwrap();
        assert_eq!(params.raw, "webkit-1-10");
        assert_eq!(params.shard, Some(1));
    }

    #[test]
    fn test_parse_test_run_without_suffix() {
        let run = parse_test_run("20241219180035_test_something_performance.json").unwrap();
        assert_eq!(run.stable_name, "test_something_performance");
        assert!(run.run_parameters.is_none());
    }

    #[test]
    fn test_parse_test_run_custom_extension() {
        let run = parse_test_run_with_extension(
            "20241219180018_test_form_input_performance[chromium-2-4].trace",
            ".trace",
        )
        .unwrap();
        assert_eq!(run.stable_name, "test_form_input_performance");

        let err = parse_test_run_with_extension("20241219180018_test_form.json", ".trace")
            .unwrap_err();
        assert!(err.to_string().contains("Filename must end with '.trace'"));
    }

    #[test]
    fn test_missing_test_name_is_invalid() {
        assert!(matches!(
            parse_test_run("20241219180035_.json"),
            Err(NamingError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_test_run("20241219180035_[chromium-1-2].json"),
            Err(NamingError::InvalidFormat(_))
        ));
    }
}
