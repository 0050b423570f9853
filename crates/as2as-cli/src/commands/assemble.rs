use std::path::Path;

use anyhow::Context;
use as2as_core::ingest::{Scrape, assemble_app};
use as2as_core::{Dump, Space};
use tracing::info;

use super::{read_input, write_output};

/// Turn a raw scrape into a dump, keeping space and app order.
pub fn assemble_scrape(scrape: &Scrape) -> anyhow::Result<Dump> {
    let mut spaces = Vec::with_capacity(scrape.spaces.len());
    for space in &scrape.spaces {
        let apps = space
            .apps
            .iter()
            .map(|scraped| {
                assemble_app(&scraped.app, &scraped.rules, &scraped.scheduled_limit_changes)
                    .with_context(|| {
                        format!("app `{}` in space `{}`", scraped.app.guid, space.guid)
                    })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        spaces.push(Space {
            guid: space.guid.clone(),
            apps,
        });
    }
    Ok(Dump { spaces })
}

pub fn run(input: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let scrape: Scrape = serde_json::from_str(&read_input(input)?)
        .with_context(|| format!("parsing scrape document {input}"))?;
    let dump = assemble_scrape(&scrape)?;

    let apps: usize = dump.spaces.iter().map(|s| s.apps.len()).sum();
    info!(spaces = dump.spaces.len(), apps, "assembled dump");

    write_output(output, &serde_json::to_string_pretty(&dump)?)
}
