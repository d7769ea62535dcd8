// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use chrono::{DateTime, Utc};
use sitegen::load_listings;
use sitegen::sitemap::{render_robots, render_sitemap};

use crate::common::SiteContext;

pub fn sitemap_command<F>(ctx: &SiteContext, now: DateTime<Utc>, mut handler: F) -> Result<()>
where
    F: FnMut(String),
{
    let listings = load_listings(&ctx.store)?;
    handler(render_sitemap(&ctx.config, &listings, now.date_naive()));
    Ok(())
}

pub fn robots_command<F>(ctx: &SiteContext, now: DateTime<Utc>, mut handler: F) -> Result<()>
where
    F: FnMut(String),
{
    handler(render_robots(&ctx.config, now));
    Ok(())
}
