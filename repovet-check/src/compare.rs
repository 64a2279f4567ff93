//! Expected-vs-actual comparison for a single check.
//!
//! Pure functions over `serde_json::Value`; nothing here touches the
//! network or the report.

use serde_json::{Map, Value};

use repovet_core::types::{Expectation, Selector};

use crate::fetch::Fetched;

/// One field-level divergence between desired and live settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    /// Dotted path of the diverging field, or `[i]` for a missing array member.
    pub field: String,
    pub desired: Value,
    /// Live value, or `None` when the field/member was missing entirely.
    pub current: Option<Value>,
}

/// Result of evaluating one check against its fetched resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    Fail {
        /// One-line reason when there are no field-level rows to show
        /// (absent resource, failed element selection, wrong shape).
        detail: Option<String>,
        mismatches: Vec<Mismatch>,
    },
}

impl Outcome {
    fn fail_with(detail: impl Into<String>) -> Self {
        Outcome::Fail {
            detail: Some(detail.into()),
            mismatches: Vec::new(),
        }
    }

    fn from_mismatches(mismatches: Vec<Mismatch>) -> Self {
        if mismatches.is_empty() {
            Outcome::Pass
        } else {
            Outcome::Fail { detail: None, mismatches }
        }
    }
}

/// Decide pass/fail for one check.
///
/// A 404 (`Fetched::Absent`) fails every expectation shape, including pure
/// existence checks. When `select` is present and the body is an array, the
/// matching element becomes the comparison subject first.
pub fn evaluate(expect: &Expectation, select: Option<&Selector>, fetched: &Fetched) -> Outcome {
    let body = match fetched {
        Fetched::Absent => return Outcome::fail_with("resource absent (HTTP 404)"),
        Fetched::Body(body) => body,
    };

    let subject = match select_element(body, select) {
        Ok(subject) => subject,
        Err(outcome) => return outcome,
    };

    match expect {
        Expectation::Exists => Outcome::Pass,
        Expectation::Subset(fields) => Outcome::from_mismatches(subset_mismatches(fields, subject)),
        Expectation::Members { key, values } => match subject.as_array() {
            Some(elements) => Outcome::from_mismatches(member_mismatches(key, values, elements)),
            None => Outcome::fail_with("response is not an array"),
        },
    }
}

/// Apply a `match` selector: pick the array element whose `key` field equals
/// `value`. Non-array bodies pass through untouched.
fn select_element<'a>(body: &'a Value, select: Option<&Selector>) -> Result<&'a Value, Outcome> {
    let Some(selector) = select else {
        return Ok(body);
    };
    let Some(elements) = body.as_array() else {
        return Ok(body);
    };
    elements
        .iter()
        .find(|element| element.get(&selector.key) == Some(&selector.value))
        .ok_or_else(|| {
            Outcome::fail_with(format!(
                "no element with {} == {}",
                selector.key,
                display_value(&selector.value)
            ))
        })
}

/// Every declared field must be present and equal in `actual`; nested
/// mappings are compared recursively (subset at every level), arrays
/// element-wise by index. Extra fields in `actual` are ignored.
pub fn subset_mismatches(expected: &Map<String, Value>, actual: &Value) -> Vec<Mismatch> {
    let mut out = Vec::new();
    for (key, desired) in expected {
        compare_node(desired, actual.get(key), &mut vec![key.clone()], &mut out);
    }
    out
}

fn compare_node(
    desired: &Value,
    actual: Option<&Value>,
    path: &mut Vec<String>,
    out: &mut Vec<Mismatch>,
) {
    let field = path.join(".");
    let Some(actual) = actual else {
        out.push(Mismatch { field, desired: desired.clone(), current: None });
        return;
    };

    match desired {
        Value::Object(fields) => {
            if actual.is_object() {
                for (key, want) in fields {
                    path.push(key.clone());
                    compare_node(want, actual.get(key), path, out);
                    path.pop();
                }
            } else {
                out.push(Mismatch {
                    field,
                    desired: desired.clone(),
                    current: Some(actual.clone()),
                });
            }
        }
        Value::Array(wanted) => match actual.as_array() {
            Some(got) => {
                for (index, want) in wanted.iter().enumerate() {
                    path.push(index.to_string());
                    compare_node(want, got.get(index), path, out);
                    path.pop();
                }
            }
            None => out.push(Mismatch {
                field,
                desired: desired.clone(),
                current: Some(actual.clone()),
            }),
        },
        _ => {
            if desired != actual {
                out.push(Mismatch {
                    field,
                    desired: desired.clone(),
                    current: Some(actual.clone()),
                });
            }
        }
    }
}

/// Every declared scalar must appear among the elements' `key` fields.
/// Elements lacking the key are skipped; extra elements are ignored.
pub fn member_mismatches(key: &str, values: &[Value], elements: &[Value]) -> Vec<Mismatch> {
    let present: Vec<&Value> = elements.iter().filter_map(|e| e.get(key)).collect();
    values
        .iter()
        .enumerate()
        .filter(|(_, want)| !present.contains(want))
        .map(|(index, want)| Mismatch {
            field: format!("[{index}]"),
            desired: want.clone(),
            current: None,
        })
        .collect()
}

/// Human-oriented rendering of a JSON value (strings unquoted).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn subset(expected: Value) -> Expectation {
        match expected {
            Value::Object(fields) => Expectation::Subset(fields),
            other => panic!("expected object, got {other:?}"),
        }
    }

    fn body(value: Value) -> Fetched {
        Fetched::Body(value)
    }

    #[test]
    fn equal_object_passes() {
        let expect = subset(json!({"enabled": true, "allowed_actions": "all"}));
        let fetched = body(json!({"enabled": true, "allowed_actions": "all"}));
        assert_eq!(evaluate(&expect, None, &fetched), Outcome::Pass);
    }

    #[test]
    fn extra_fetched_keys_are_ignored() {
        let expect = subset(json!({"enabled": true, "allowed_actions": "all"}));
        let fetched = body(json!({
            "enabled": true,
            "allowed_actions": "all",
            "extra_field": "x",
        }));
        assert_eq!(evaluate(&expect, None, &fetched), Outcome::Pass);
    }

    #[test]
    fn missing_expected_key_fails() {
        let expect = subset(json!({"enabled": true, "allowed_actions": "all"}));
        let fetched = body(json!({"enabled": true}));
        match evaluate(&expect, None, &fetched) {
            Outcome::Fail { mismatches, .. } => {
                assert_eq!(mismatches.len(), 1);
                assert_eq!(mismatches[0].field, "allowed_actions");
                assert_eq!(mismatches[0].current, None);
            }
            Outcome::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn unequal_scalar_fails_with_both_values() {
        let expect = subset(json!({"enabled": true}));
        let fetched = body(json!({"enabled": false}));
        match evaluate(&expect, None, &fetched) {
            Outcome::Fail { mismatches, .. } => {
                assert_eq!(mismatches[0].desired, json!(true));
                assert_eq!(mismatches[0].current, Some(json!(false)));
            }
            Outcome::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn nested_mismatch_reports_dotted_path() {
        let expect = subset(json!({
            "required_pull_request_reviews": {"required_approving_review_count": 2}
        }));
        let fetched = body(json!({
            "required_pull_request_reviews": {"required_approving_review_count": 1}
        }));
        match evaluate(&expect, None, &fetched) {
            Outcome::Fail { mismatches, .. } => {
                assert_eq!(
                    mismatches[0].field,
                    "required_pull_request_reviews.required_approving_review_count"
                );
            }
            Outcome::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn nested_object_is_subset_not_exact() {
        let expect = subset(json!({"reviews": {"dismiss_stale": true}}));
        let fetched = body(json!({"reviews": {"dismiss_stale": true, "codeowners": false}}));
        assert_eq!(evaluate(&expect, None, &fetched), Outcome::Pass);
    }

    #[test]
    fn expected_array_compared_by_index() {
        let expect = subset(json!({"contexts": ["build", "lint"]}));
        let fetched = body(json!({"contexts": ["build", "test"]}));
        match evaluate(&expect, None, &fetched) {
            Outcome::Fail { mismatches, .. } => {
                assert_eq!(mismatches.len(), 1);
                assert_eq!(mismatches[0].field, "contexts.1");
            }
            Outcome::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn empty_expected_object_always_passes() {
        let expect = subset(json!({}));
        assert_eq!(evaluate(&expect, None, &body(json!({"anything": 1}))), Outcome::Pass);
    }

    #[test]
    fn membership_complete_passes() {
        let expect = Expectation::Members {
            key: "pattern".into(),
            values: vec![json!("v*"), json!("release-*")],
        };
        let fetched = body(json!([
            {"pattern": "release-*", "id": 1},
            {"pattern": "v*", "id": 2},
            {"pattern": "hotfix-*", "id": 3},
        ]));
        assert_eq!(evaluate(&expect, None, &fetched), Outcome::Pass);
    }

    #[test]
    fn missing_member_fails_with_index() {
        let expect = Expectation::Members {
            key: "pattern".into(),
            values: vec![json!("v*"), json!("release-*")],
        };
        let fetched = body(json!([{"pattern": "v*"}]));
        match evaluate(&expect, None, &fetched) {
            Outcome::Fail { mismatches, .. } => {
                assert_eq!(mismatches.len(), 1);
                assert_eq!(mismatches[0].field, "[1]");
                assert_eq!(mismatches[0].desired, json!("release-*"));
            }
            Outcome::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn membership_against_non_array_fails() {
        let expect = Expectation::Members { key: "k".into(), values: vec![json!("x")] };
        match evaluate(&expect, None, &body(json!({"k": "x"}))) {
            Outcome::Fail { detail, .. } => {
                assert_eq!(detail.as_deref(), Some("response is not an array"));
            }
            Outcome::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn elements_without_key_are_skipped() {
        let expect = Expectation::Members { key: "name".into(), values: vec![json!("ci")] };
        let fetched = body(json!([{"other": 1}, {"name": "ci"}]));
        assert_eq!(evaluate(&expect, None, &fetched), Outcome::Pass);
    }

    #[test]
    fn existence_check_passes_on_any_body() {
        assert_eq!(evaluate(&Expectation::Exists, None, &body(json!([]))), Outcome::Pass);
        assert_eq!(
            evaluate(&Expectation::Exists, None, &body(json!({"enabled": true}))),
            Outcome::Pass
        );
    }

    #[test]
    fn absent_resource_fails_every_shape() {
        for expect in [
            Expectation::Exists,
            subset(json!({"enabled": true})),
            Expectation::Members { key: "k".into(), values: vec![] },
        ] {
            match evaluate(&expect, None, &Fetched::Absent) {
                Outcome::Fail { detail, mismatches } => {
                    assert_eq!(detail.as_deref(), Some("resource absent (HTTP 404)"));
                    assert!(mismatches.is_empty());
                }
                Outcome::Pass => panic!("absent resource must not pass"),
            }
        }
    }

    #[test]
    fn selector_picks_matching_element() {
        let expect = subset(json!({"protected_branches": true}));
        let select = Selector { key: "name".into(), value: json!("production") };
        let fetched = body(json!([
            {"name": "staging", "protected_branches": false},
            {"name": "production", "protected_branches": true},
        ]));
        assert_eq!(evaluate(&expect, Some(&select), &fetched), Outcome::Pass);
    }

    #[test]
    fn selector_without_match_fails() {
        let expect = Expectation::Exists;
        let select = Selector { key: "name".into(), value: json!("production") };
        let fetched = body(json!([{"name": "staging"}]));
        match evaluate(&expect, Some(&select), &fetched) {
            Outcome::Fail { detail, .. } => {
                assert_eq!(detail.as_deref(), Some("no element with name == production"));
            }
            Outcome::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn selector_on_object_body_is_a_no_op() {
        let expect = subset(json!({"enabled": true}));
        let select = Selector { key: "name".into(), value: json!("production") };
        let fetched = body(json!({"enabled": true}));
        assert_eq!(evaluate(&expect, Some(&select), &fetched), Outcome::Pass);
    }
}
