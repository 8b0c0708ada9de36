//! Scenario files: ordered registry operations with expected outcomes.
//!
//! ```yaml
//! steps:
//!   - op: register
//!     name: xyz
//!     version: "30.1.2"
//!     address: "0xcd2a..."
//!     abi: "[]"
//!     threshold_wei: 1000
//!   - op: get
//!     name: xyz
//!     expect: locked
//! ```
//!
//! Step keys are snake_case and unknown keys are rejected. Amounts and
//! thresholds are `u64`: steps are buffered through serde's internally tagged
//! enum support, which cannot hold `u128`. Registry totals are still `Wei`, so
//! report output for totals beyond `u64::MAX` carries the serialization error
//! instead of the record.

use std::path::Path;

use anyhow::Context;
use livelibs_registry::{LibraryInfo, RegisterOptions, Registry, RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub description: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Register(RegisterStep),
    Get(GetStep),
    Contribute(ContributeStep),
    Funding(FundingStep),
    Names(NamesStep),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterStep {
    pub name: String,
    pub version: String,
    pub address: String,
    pub abi: String,
    #[serde(default)]
    pub doc_url: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub threshold_wei: u64,
    #[serde(default)]
    pub expect: Outcome,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetStep {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub expect: Outcome,
    #[serde(default)]
    pub expect_fields: Option<ExpectFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContributeStep {
    pub name: String,
    pub version: String,
    pub amount_wei: u64,
    #[serde(default)]
    pub expect: Outcome,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FundingStep {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub expect: Outcome,
    #[serde(default)]
    pub expect_total_wei: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamesStep {
    #[serde(default)]
    pub expect_present: Vec<String>,
    #[serde(default)]
    pub expect_absent: Vec<String>,
}

/// Subset of `LibraryInfo` fields a `get` step checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectFields {
    pub address: Option<String>,
    pub version: Option<String>,
    pub abi: Option<String>,
    pub doc_url: Option<String>,
    pub source_url: Option<String>,
    pub threshold_wei: Option<u64>,
    pub total_value: Option<u64>,
}

impl ExpectFields {
    fn compare(&self, info: &LibraryInfo, mismatches: &mut Vec<String>) {
        check(mismatches, "address", self.address.as_deref(), info.address.as_str());
        check(mismatches, "version", self.version.as_deref(), info.version.as_str());
        check(mismatches, "abi", self.abi.as_deref(), info.abi.as_str());
        check(mismatches, "doc_url", self.doc_url.as_deref(), info.doc_url.as_str());
        check(
            mismatches,
            "source_url",
            self.source_url.as_deref(),
            info.source_url.as_str(),
        );
        check(
            mismatches,
            "threshold_wei",
            self.threshold_wei.map(u128::from),
            info.threshold_wei,
        );
        check(
            mismatches,
            "total_value",
            self.total_value.map(u128::from),
            info.total_value,
        );
    }
}

/// Result kind of one registry call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Ok,
    NotFound,
    Locked,
    NameTooLong,
    Invalid,
}

impl Outcome {
    fn of<T>(result: &RegistryResult<T>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(RegistryError::NotFound { .. }) => Self::NotFound,
            Err(RegistryError::Locked { .. }) => Self::Locked,
            Err(RegistryError::NameTooLong { .. }) => Self::NameTooLong,
            Err(_) => Self::Invalid,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ok => "ok",
            Self::NotFound => "not_found",
            Self::Locked => "locked",
            Self::NameTooLong => "name_too_long",
            Self::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub op: &'static str,
    pub target: String,
    pub expected: Outcome,
    pub actual: Outcome,
    pub passed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mismatches: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub passed: usize,
    pub failed: usize,
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Execute every step in order. Failed expectations do not stop the run.
    pub fn execute(&self, registry: &Registry) -> ScenarioReport {
        let steps: Vec<StepReport> = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| step.execute(i + 1, registry))
            .collect();
        let passed = steps.iter().filter(|s| s.passed).count();
        ScenarioReport {
            description: self.description.clone(),
            passed,
            failed: steps.len() - passed,
            steps,
        }
    }
}

fn key(name: &str, version: Option<&str>) -> String {
    match version {
        Some(v) => format!("{}@{}", name, v),
        None => name.to_string(),
    }
}

fn output_of<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| serde_json::json!(format!("unserializable output: {e}")))
}

fn check<T: PartialEq + std::fmt::Debug>(
    mismatches: &mut Vec<String>,
    field: &str,
    expected: Option<T>,
    actual: T,
) {
    if let Some(expected) = expected {
        if expected != actual {
            mismatches.push(format!("{}: expected {:?}, got {:?}", field, expected, actual));
        }
    }
}

impl Step {
    fn execute(&self, index: usize, registry: &Registry) -> StepReport {
        let mut mismatches = Vec::new();
        let (op, target, expected, actual, output) = match self {
            Step::Register(s) => {
                let options = RegisterOptions::default()
                    .with_doc_url(s.doc_url.clone())
                    .with_source_url(s.source_url.clone())
                    .with_threshold_wei(u128::from(s.threshold_wei));
                let result = registry.register(&s.name, &s.version, &s.address, &s.abi, options);
                let actual = Outcome::of(&result);
                let output = result.err().map(|e| serde_json::json!(e.to_string()));
                (
                    "register",
                    key(&s.name, Some(&s.version)),
                    s.expect,
                    actual,
                    output,
                )
            }
            Step::Get(s) => {
                let result = registry.get(&s.name, s.version.as_deref());
                let actual = Outcome::of(&result);
                let output = match &result {
                    Ok(info) => {
                        if let Some(fields) = &s.expect_fields {
                            fields.compare(info, &mut mismatches);
                        }
                        Some(output_of(info))
                    }
                    Err(e) => Some(serde_json::json!(e.to_string())),
                };
                ("get", key(&s.name, s.version.as_deref()), s.expect, actual, output)
            }
            Step::Contribute(s) => {
                let result =
                    registry.contribute_to(&s.name, &s.version, u128::from(s.amount_wei));
                let actual = Outcome::of(&result);
                let output = match &result {
                    Ok(status) => Some(output_of(status)),
                    Err(e) => Some(serde_json::json!(e.to_string())),
                };
                (
                    "contribute",
                    key(&s.name, Some(&s.version)),
                    s.expect,
                    actual,
                    output,
                )
            }
            Step::Funding(s) => {
                let result = registry.funding(&s.name, &s.version);
                let actual = Outcome::of(&result);
                let output = match &result {
                    Ok(status) => {
                        check(
                            &mut mismatches,
                            "total_value",
                            s.expect_total_wei.map(u128::from),
                            status.total_value,
                        );
                        Some(output_of(status))
                    }
                    Err(e) => Some(serde_json::json!(e.to_string())),
                };
                (
                    "funding",
                    key(&s.name, Some(&s.version)),
                    s.expect,
                    actual,
                    output,
                )
            }
            Step::Names(s) => {
                let names: Vec<String> = registry
                    .all_names()
                    .into_iter()
                    .map(|n| n.to_string())
                    .collect();
                for want in &s.expect_present {
                    if !names.contains(want) {
                        mismatches.push(format!("expected name {:?} to be present", want));
                    }
                }
                for unwanted in &s.expect_absent {
                    if names.contains(unwanted) {
                        mismatches.push(format!("expected name {:?} to be absent", unwanted));
                    }
                }
                (
                    "names",
                    "*".to_string(),
                    Outcome::Ok,
                    Outcome::Ok,
                    Some(serde_json::json!(names)),
                )
            }
        };

        if expected != actual {
            mismatches.insert(0, format!("expected {}, got {}", expected, actual));
        }

        StepReport {
            index,
            op,
            target,
            expected,
            actual,
            passed: mismatches.is_empty(),
            mismatches,
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUITE: &str = r#"
description: funding gate
steps:
  - op: register
    name: xyz
    version: "30.1.2"
    address: "0xcd2a3d9f938e13cd947ec05abc7fe734df8dd826"
    abi: "[]"
    threshold_wei: 1000
  - op: get
    name: xyz
    expect: locked
  - op: contribute
    name: xyz
    version: "30.1.2"
    amount_wei: 250
  - op: funding
    name: xyz
    version: "30.1.2"
    expect_total_wei: 250
  - op: contribute
    name: xyz
    version: "30.1.2"
    amount_wei: 750
  - op: get
    name: xyz
    expect_fields:
      total_value: 1000
  - op: names
    expect_present: [xyz]
"#;

    #[test]
    fn test_suite_passes() {
        let scenario = Scenario::from_yaml(SUITE).unwrap();
        let report = scenario.execute(&Registry::new());
        assert!(report.all_passed(), "{:#?}", report);
        assert_eq!(report.passed, 7);
        assert_eq!(report.description.as_deref(), Some("funding gate"));
    }

    #[test]
    fn test_wrong_expectation_fails_step() {
        let yaml = r#"
steps:
  - op: get
    name: baz
"#;
        let report = Scenario::from_yaml(yaml)
            .unwrap()
            .execute(&Registry::new());
        assert_eq!(report.failed, 1);
        assert_eq!(report.steps[0].actual, Outcome::NotFound);
        assert_eq!(report.steps[0].mismatches[0], "expected ok, got not_found");
    }

    #[test]
    fn test_field_mismatch_reported() {
        let yaml = r#"
steps:
  - op: register
    name: foo
    version: "0.1.2"
    address: "0xabc"
    abi: "[]"
  - op: get
    name: foo
    expect_fields:
      address: "0xdef"
"#;
        let report = Scenario::from_yaml(yaml)
            .unwrap()
            .execute(&Registry::new());
        assert_eq!(report.failed, 1);
        assert!(report.steps[1].mismatches[0].starts_with("address:"));
    }

    #[test]
    fn test_unknown_step_key_rejected() {
        let yaml = r#"
steps:
  - op: register
    name: abc
    version: "0.1.2"
    address: "0xabc"
    abi: "[]"
    thresholdWei: 1000
"#;
        let err = Scenario::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("thresholdWei"), "{err}");

        let yaml = r#"
steps:
  - op: names
    expect_presnt: [abc]
"#;
        assert!(Scenario::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_threshold_beyond_u64_rejected() {
        let yaml = r#"
steps:
  - op: register
    name: abc
    version: "0.1.2"
    address: "0xabc"
    abi: "[]"
    threshold_wei: 18446744073709551616
"#;
        assert!(Scenario::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_total_beyond_u64_keeps_output() {
        let yaml = r#"
steps:
  - op: register
    name: xyz
    version: "30.1.2"
    address: "0xabc"
    abi: "[]"
  - op: contribute
    name: xyz
    version: "30.1.2"
    amount_wei: 18446744073709551615
  - op: contribute
    name: xyz
    version: "30.1.2"
    amount_wei: 18446744073709551615
  - op: get
    name: xyz
  - op: funding
    name: xyz
    version: "30.1.2"
"#;
        let registry = Registry::new();
        let report = Scenario::from_yaml(yaml).unwrap().execute(&registry);
        assert!(report.all_passed(), "{:#?}", report);

        for step in &report.steps[2..] {
            let output = step.output.as_ref().expect("output recorded");
            let text = output.as_str().unwrap_or_default();
            assert!(text.starts_with("unserializable output:"), "{output}");
        }
        assert_eq!(
            registry.get("xyz", None).unwrap().total_value,
            2 * u128::from(u64::MAX)
        );
    }

    #[test]
    fn test_unknown_op_rejected() {
        let yaml = r#"
steps:
  - op: unregister
    name: foo
"#;
        assert!(Scenario::from_yaml(yaml).is_err());
    }
}
