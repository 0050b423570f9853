use std::path::Path;

use anyhow::Context;
use as2as_core::{Converted, ConvertedApp, ConvertedSpace, Dump, translate_policy};
use serde::Serialize;
use tracing::{info, warn};

use super::{read_input, write_output};
use crate::config::{FailurePolicy, OutputFormat};
use crate::report;

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub on_error: FailurePolicy,
    pub cool_down_secs: Option<i64>,
    pub breach_duration_secs: Option<i64>,
}

/// Per-run app counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConvertSummary {
    pub converted: usize,
    pub disabled: usize,
    pub skipped: usize,
}

/// Convert every app in the dump, keeping space and app order.
///
/// Under [`FailurePolicy::Skip`] a failing app is logged and left out;
/// under [`FailurePolicy::Abort`] the first failure is returned.
pub fn convert_dump(
    dump: &Dump,
    options: &ConvertOptions,
) -> anyhow::Result<(Converted, ConvertSummary)> {
    let mut summary = ConvertSummary::default();
    let mut spaces = Vec::with_capacity(dump.spaces.len());

    for space in &dump.spaces {
        let mut apps = Vec::with_capacity(space.apps.len());
        for app in &space.apps {
            let mut policy = match translate_policy(app) {
                Ok(policy) => policy,
                Err(e) if options.on_error == FailurePolicy::Skip => {
                    warn!(app = %app.guid, space = %space.guid, error = %e, "skipping app");
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("app `{}` in space `{}`", app.guid, space.guid)));
                }
            };

            match policy.as_mut() {
                Some(policy) => {
                    policy.apply_rule_timing(options.cool_down_secs, options.breach_duration_secs);
                    summary.converted += 1;
                }
                None => summary.disabled += 1,
            }
            apps.push(ConvertedApp {
                guid: app.guid.clone(),
                policy,
            });
        }
        spaces.push(ConvertedSpace {
            guid: space.guid.clone(),
            apps,
        });
    }

    Ok((Converted { spaces }, summary))
}

pub fn run(
    input: &str,
    output: Option<&Path>,
    format: OutputFormat,
    options: &ConvertOptions,
) -> anyhow::Result<()> {
    let dump: Dump = serde_json::from_str(&read_input(input)?)
        .with_context(|| format!("parsing dump document {input}"))?;
    let (converted, summary) = convert_dump(&dump, options)?;

    info!(
        converted = summary.converted,
        disabled = summary.disabled,
        skipped = summary.skipped,
        "conversion finished"
    );

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&converted)?,
        OutputFormat::Text => report::format_report(&converted, &summary),
    };
    write_output(output, &rendered)
}
