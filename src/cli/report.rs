//! Operator-facing summaries that need no network.

use std::fmt;

use serde_json::Value;

use crate::config::{Secret, REQUIRED_ENV_VARS};

/// Characters of a value shown by `check-env`.
const PREVIEW_CHARS: usize = 15;

/// One required variable and a short preview of its value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvVarStatus {
    /// Variable name.
    pub name: &'static str,
    /// First characters of the value; `None` when unset or blank.
    pub preview: Option<String>,
}

/// Result of checking the required variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvReport {
    /// One entry per required variable, in declaration order.
    pub vars: Vec<EnvVarStatus>,
}

impl EnvReport {
    /// Names of unset or blank variables.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        self.vars
            .iter()
            .filter(|var| var.preview.is_none())
            .map(|var| var.name)
            .collect()
    }

    /// True when every required variable is set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.vars.iter().all(|var| var.preview.is_some())
    }
}

impl fmt::Display for EnvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for var in &self.vars {
            match &var.preview {
                Some(preview) => writeln!(f, "  [set]     {:<22} {preview}", var.name)?,
                None => writeln!(f, "  [missing] {}", var.name)?,
            }
        }
        Ok(())
    }
}

/// Checks [`REQUIRED_ENV_VARS`] against `lookup`.
#[must_use]
pub fn check_env(lookup: impl Fn(&str) -> Option<String>) -> EnvReport {
    let vars = REQUIRED_ENV_VARS
        .iter()
        .map(|&name| EnvVarStatus {
            name,
            preview: lookup(name)
                .and_then(|value| Secret::new(value, name).ok())
                .map(|secret| secret.preview(PREVIEW_CHARS)),
        })
        .collect();
    EnvReport { vars }
}

/// Outcome of one `integration` probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Probe label.
    pub name: &'static str,
    /// Detail on success, error message on failure.
    pub result: Result<String, String>,
}

impl ProbeOutcome {
    pub(crate) fn from_result<T, E: fmt::Display>(
        name: &'static str,
        result: Result<T, E>,
        detail: impl FnOnce(&T) -> String,
    ) -> Self {
        Self {
            name,
            result: result.as_ref().map(detail).map_err(ToString::to_string),
        }
    }
}

/// Renders `outcomes` as a fixed-width table with a pass count.
pub(crate) fn summary_table(outcomes: &[ProbeOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        let (status, detail) = match &outcome.result {
            Ok(detail) => ("PASS", detail),
            Err(error) => ("FAIL", error),
        };
        out.push_str(&format!("  {status}  {:<26} {detail}\n", outcome.name));
    }
    let passed = outcomes.iter().filter(|o| o.result.is_ok()).count();
    out.push_str(&format!("  {passed}/{} checks passed\n", outcomes.len()));
    out
}

/// Length of the array at JSON `pointer`, if there is one.
pub(crate) fn count_at(body: &Value, pointer: &str) -> Option<usize> {
    body.pointer(pointer).and_then(Value::as_array).map(Vec::len)
}

/// String at JSON `pointer`, or `-`.
pub(crate) fn str_at<'a>(body: &'a Value, pointer: &str) -> &'a str {
    body.pointer(pointer).and_then(Value::as_str).unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_check_env_previews_values() {
        let report = check_env(lookup(&[
            ("AMAZON_CLIENT_ID", "amzn1.application-oa2-client.0123"),
            ("AMAZON_CLIENT_SECRET", "short"),
            ("AMAZON_REFRESH_TOKEN", "Atzr|IwEBIJ"),
            ("SHOPIFY_SHOP_DOMAIN", "wipers-shop"),
            ("SHOPIFY_ACCESS_TOKEN", "shpat_0123456789abcdef"),
        ]));

        assert!(report.is_complete());
        assert_eq!(
            report.vars[0].preview.as_deref(),
            Some("amzn1.applicati...")
        );
        assert_eq!(report.vars[1].preview.as_deref(), Some("short"));
        assert_eq!(
            report.vars[4].preview.as_deref(),
            Some("shpat_012345678...")
        );
    }

    #[test]
    fn test_check_env_reports_missing_and_blank() {
        let report = check_env(lookup(&[
            ("AMAZON_CLIENT_ID", "id"),
            ("AMAZON_CLIENT_SECRET", "   "),
            ("SHOPIFY_SHOP_DOMAIN", "wipers-shop"),
        ]));

        assert!(!report.is_complete());
        assert_eq!(
            report.missing(),
            vec![
                "AMAZON_CLIENT_SECRET",
                "AMAZON_REFRESH_TOKEN",
                "SHOPIFY_ACCESS_TOKEN"
            ]
        );
        let rendered = report.to_string();
        assert!(rendered.contains("[missing] AMAZON_REFRESH_TOKEN"));
        assert!(rendered.contains("[set]     AMAZON_CLIENT_ID"));
    }

    #[test]
    fn test_summary_table() {
        let outcomes = vec![
            ProbeOutcome::from_result("Amazon token", Ok::<_, String>(3600), |s| {
                format!("expires in {s}s")
            }),
            ProbeOutcome::from_result("Shopify orders", Err::<u32, _>("HTTP 401"), |_| {
                String::new()
            }),
        ];

        let table = summary_table(&outcomes);
        assert!(table.contains("PASS  Amazon token"));
        assert!(table.contains("expires in 3600s"));
        assert!(table.contains("FAIL  Shopify orders"));
        assert!(table.contains("HTTP 401"));
        assert!(table.ends_with("1/2 checks passed\n"));
    }

    #[test]
    fn test_json_helpers() {
        let body = json!({"payload": {"Orders": [{"AmazonOrderId": "1"}, {}]}});

        assert_eq!(count_at(&body, "/payload/Orders"), Some(2));
        assert_eq!(count_at(&body, "/payload/missing"), None);
        assert_eq!(str_at(&body, "/payload/Orders/0/AmazonOrderId"), "1");
        assert_eq!(str_at(&body, "/payload/Orders/1/AmazonOrderId"), "-");
    }
}
