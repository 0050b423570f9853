//! Threshold rule translation.
//!
//! A source rule carries both thresholds of a band; the target wants one
//! rule per direction, so every source rule becomes a scale-down rule
//! (`< threshold_min`, `-1`) plus a scale-up rule (`> threshold_max`, `+1`).

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConvertError, ConvertResult};
use crate::source::ThresholdRule;
use crate::target::{Adjustment, Operator, ScalingRule, metric};

/// Anything that can't appear in a target metric identifier.
static ILLEGAL_METRIC_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^[:alnum:]_]").expect("static regex is valid")
});

/// Source rule types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Cpu,
    Memory,
    HttpThroughput,
    HttpLatency,
    /// RabbitMQ queue depth.
    QueueDepth,
}

impl RuleKind {
    /// Built-in target metric for this kind. Queue depth has none; it
    /// becomes a custom metric named after the queue.
    pub fn builtin_metric(self) -> Option<&'static str> {
        match self {
            RuleKind::Cpu => Some(metric::CPU_UTIL),
            RuleKind::Memory => Some(metric::MEMORY_UTIL),
            RuleKind::HttpThroughput => Some(metric::THROUGHPUT),
            RuleKind::HttpLatency => Some(metric::RESPONSE_TIME),
            RuleKind::QueueDepth => None,
        }
    }
}

impl FromStr for RuleKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(RuleKind::Cpu),
            "memory" => Ok(RuleKind::Memory),
            "http_throughput" => Ok(RuleKind::HttpThroughput),
            "http_latency" => Ok(RuleKind::HttpLatency),
            "rabbitmq" => Ok(RuleKind::QueueDepth),
            other => Err(ConvertError::UnknownRuleKind(other.to_string())),
        }
    }
}

/// Custom metric name for a queue: `-` becomes `_`, anything else outside
/// `[A-Za-z0-9_]` is rejected.
pub fn queue_metric_name(queue: &str) -> ConvertResult<String> {
    let normalized = queue.replace('-', "_");
    if ILLEGAL_METRIC_CHARS.is_match(&normalized) {
        return Err(ConvertError::InvalidMetricName {
            queue: queue.to_string(),
            metric: normalized,
        });
    }
    Ok(format!("{normalized}_messages_ready"))
}

/// Translate one threshold rule into its scale-down and scale-up rules.
///
/// Thresholds are truncated toward zero because the target only accepts
/// integers.
pub fn translate_rule(rule: &ThresholdRule) -> ConvertResult<[ScalingRule; 2]> {
    let kind: RuleKind = rule.rule_type.parse()?;
    let metric_type = match kind.builtin_metric() {
        Some(name) => name.to_string(),
        None => queue_metric_name(&rule.queue_name)?,
    };

    Ok([
        ScalingRule {
            metric_type: metric_type.clone(),
            operator: Operator::LessThan,
            threshold: rule.threshold_min as i64,
            adjustment: Adjustment::Down,
            cool_down_secs: None,
            breach_duration_secs: None,
        },
        ScalingRule {
            metric_type,
            operator: Operator::GreaterThan,
            threshold: rule.threshold_max as i64,
            adjustment: Adjustment::Up,
            cool_down_secs: None,
            breach_duration_secs: None,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold_rule(rule_type: &str, min: f64, max: f64) -> ThresholdRule {
        ThresholdRule {
            comparison_metric: String::new(),
            metric: String::new(),
            queue_name: String::new(),
            rule_type: rule_type.to_string(),
            rule_sub_type: String::new(),
            threshold_min: min,
            threshold_max: max,
        }
    }

    fn queue_rule(queue: &str) -> ThresholdRule {
        ThresholdRule {
            queue_name: queue.to_string(),
            ..threshold_rule("rabbitmq", 5.0, 50.0)
        }
    }

    #[test]
    fn truncates_thresholds_toward_zero() {
        let [down, up] = translate_rule(&threshold_rule("cpu", 12.9, 49.4)).unwrap();

        assert_eq!(down.threshold, 12);
        assert_eq!(down.operator, Operator::LessThan);
        assert_eq!(down.adjustment, Adjustment::Down);

        assert_eq!(up.threshold, 49);
        assert_eq!(up.operator, Operator::GreaterThan);
        assert_eq!(up.adjustment, Adjustment::Up);
    }

    #[test]
    fn negative_thresholds_truncate_toward_zero() {
        let [down, up] = translate_rule(&threshold_rule("cpu", -1.7, -0.2)).unwrap();
        assert_eq!(down.threshold, -1);
        assert_eq!(up.threshold, 0);
    }

    #[test]
    fn maps_builtin_kinds() {
        let cases = [
            ("cpu", "cpu"),
            ("memory", "memoryutil"),
            ("http_throughput", "throughput"),
            ("http_latency", "responsetime"),
        ];
        for (kind, expected) in cases {
            let rules = translate_rule(&threshold_rule(kind, 1.0, 2.0)).unwrap();
            assert!(rules.iter().all(|r| r.metric_type == expected), "kind {kind}");
        }
    }

    #[test]
    fn unknown_kind_fails() {
        let err = translate_rule(&threshold_rule("disk", 1.0, 2.0)).unwrap_err();
        assert!(matches!(err, ConvertError::UnknownRuleKind(ref k) if k == "disk"));
        assert_eq!(err.to_string(), "unknown rule type `disk`");
    }

    #[test]
    fn queue_name_dashes_become_underscores() {
        let [down, up] = translate_rule(&queue_rule("order-events")).unwrap();
        assert_eq!(down.metric_type, "order_events_messages_ready");
        assert_eq!(up.metric_type, "order_events_messages_ready");
    }

    #[test]
    fn queue_name_with_illegal_chars_fails() {
        let err = translate_rule(&queue_rule("weird!name")).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::InvalidMetricName { ref queue, .. } if queue == "weird!name"
        ));
    }

    #[test]
    fn queue_name_rejects_non_ascii() {
        assert!(queue_metric_name("café").is_err());
        assert!(queue_metric_name("a.b").is_err());
        assert!(queue_metric_name("a b").is_err());
    }

    #[test]
    fn queue_name_keeps_alnum_and_underscore() {
        assert_eq!(queue_metric_name("Jobs_2").unwrap(), "Jobs_2_messages_ready");
    }

    #[test]
    fn queue_name_ignored_for_builtin_kinds() {
        let rule = ThresholdRule {
            queue_name: "weird!name".to_string(),
            ..threshold_rule("memory", 10.0, 90.0)
        };
        assert!(translate_rule(&rule).is_ok());
    }

    #[test]
    fn parses_source_rule_types() {
        let cases = [
            ("cpu", RuleKind::Cpu),
            ("memory", RuleKind::Memory),
            ("http_throughput", RuleKind::HttpThroughput),
            ("http_latency", RuleKind::HttpLatency),
            ("rabbitmq", RuleKind::QueueDepth),
        ];
        for (text, kind) in cases {
            assert_eq!(text.parse::<RuleKind>().unwrap(), kind);
        }
        assert!("CPU".parse::<RuleKind>().is_err());
    }
}
