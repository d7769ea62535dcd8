// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sitegen::{BuildReport, generate_site};

use crate::common::SiteContext;

/// Generate the whole site into `output_dir`.
pub fn build_command<F>(
    ctx: &SiteContext,
    output_dir: &Path,
    build_time: DateTime<Utc>,
    mut handler: F,
) -> Result<BuildReport>
where
    F: FnMut(String),
{
    log::info!("Building site into {}", output_dir.display());
    let report = generate_site(&ctx.config, &ctx.store, output_dir, build_time)
        .with_context(|| format!("Site generation into {} failed", output_dir.display()))?;

    handler(format!(
        "Built {} pages and {} static files into {}",
        report.pages,
        report.assets,
        output_dir.display()
    ));
    Ok(report)
}
