//! `favicache get` and `favicache refresh`: resolve one site.

use anyhow::Result;
use favicache_core::{Resolution, Resolver};

fn print_resolution(resolution: &Resolution) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(resolution)?);
    Ok(())
}

pub async fn run_get(resolver: &Resolver, url: &str) -> Result<()> {
    let resolution = resolver.resolve(url, None, false).await;
    print_resolution(&resolution)
}

pub async fn run_refresh(resolver: &Resolver, url: &str) -> Result<()> {
    let resolution = resolver.resolve(url, None, true).await;
    print_resolution(&resolution)
}
