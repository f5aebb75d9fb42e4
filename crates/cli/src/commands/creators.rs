// Path: crates/cli/src/commands/creators.rs

use anyhow::{Context, Result};
use cfp_cli::view;
use cfp_client::{ClientContext, RegistryApi};

pub async fn run(ctx: &ClientContext) -> Result<()> {
    let creators = ctx
        .api()
        .creators()
        .await
        .context("Failed to list creators")?;
    let names = ctx.names();
    let mut shown = Vec::with_capacity(creators.len());
    for creator in &creators {
        shown.push(names.display_name(creator).await);
    }
    print!("{}", view::list("creators", &shown));
    Ok(())
}
