//! Read-only cart views.

use anyhow::Result;

use crate::context::Context;

/// Run the show command.
pub fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    if ctx.output.is_json() {
        ctx.output.json(&store.current_lines());
        return Ok(());
    }

    ctx.output.header(&format!(
        "Cart ({} items, {} lines)",
        store.item_count(),
        store.line_count()
    ));
    ctx.output.cart_table(store.current_lines());

    if ctx.output.is_verbose() {
        ctx.output.kv("Key", store.key());
        ctx.output.kv("Storage", &ctx.storage_dir().display().to_string());
    }

    Ok(())
}

/// Run the summary command.
pub fn summary(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let summary = store.summary();

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Order Summary");
    ctx.output.summary(&summary, store.policy());

    let policy = store.policy();
    if !store.is_empty() && !summary.is_free_shipping() {
        let needed = policy
            .free_shipping_threshold
            .amount_cents
            .saturating_sub(summary.subtotal.amount_cents)
            .saturating_add(1);
        let needed = turbo_cart::Money::new(needed, policy.currency);
        ctx.output
            .info(&format!("Add {} more for free shipping", needed.display()));
    }

    Ok(())
}
