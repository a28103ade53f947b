//! Cart mutation commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use turbo_cache::FileStore;
use turbo_cart::prelude::*;

use super::{AddArgs, ClearArgs, RemoveArgs, SetArgs, StepArgs};
use crate::context::Context;

/// Run the add command.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id.as_str());

    let (product, ignored) = product_for_add(store.line(&id), &args, store.currency())?;
    if ignored {
        ctx.output.warn(&format!(
            "'{}' is already in the cart; keeping its existing details",
            id
        ));
    }

    let name = product.name.clone();
    store.add_line(product, args.quantity)?;

    let quantity = store.line(&id).map(|l| l.quantity).unwrap_or_default();
    finish(
        &store,
        ctx,
        &format!("Added {} x {} (now {} in cart)", args.quantity, name, quantity),
    )
}

/// Product to add for `args`.
///
/// A product already in the cart keeps its stored details; the flag is set
/// when `args` carried details that will not be applied.
fn product_for_add(
    existing: Option<&CartLine>,
    args: &AddArgs,
    currency: Currency,
) -> Result<(Product, bool)> {
    if let Some(line) = existing {
        let ignored = args.name.is_some()
            || args.price.is_some()
            || args.image.is_some()
            || args.description.is_some()
            || args.category.is_some();
        return Ok((line.product.clone(), ignored));
    }

    let (Some(name), Some(price)) = (args.name.clone(), args.price) else {
        bail!(
            "Product '{}' is not in the cart. Pass --name and --price to add it.",
            args.id
        );
    };

    let mut product = Product::new(args.id.as_str(), name, Money::from_decimal(price, currency));
    if let Some(ref image) = args.image {
        product.image = image.clone();
    }
    if let Some(ref description) = args.description {
        product.description = description.clone();
    }
    if let Some(ref category) = args.category {
        product.category = category.clone();
    }
    Ok((product, false))
}

/// Run the remove command.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id);

    let Some(line) = store.line(&id) else {
        ctx.output.warn(&format!("Product '{}' is not in the cart", id));
        store.remove_line(&id);
        return finish(&store, ctx, "Nothing to remove");
    };
    let name = line.product.name.clone();

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} from your cart?", name))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    store.remove_line(&id);
    finish(&store, ctx, &format!("Removed {}", name))
}

/// Run the set command.
pub fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id);
    let existed = store.line(&id).is_some();

    store.set_quantity(&id, args.quantity);

    let msg = match (existed, store.line(&id)) {
        (false, _) => format!("Product '{}' is not in the cart", id),
        (true, Some(line)) => format!("Set {} to {}", line.product.name, line.quantity),
        (true, None) => format!("Removed '{}'", id),
    };
    finish(&store, ctx, &msg)
}

/// Run the inc command.
pub fn increment(args: StepArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id);

    if !store.increment(&id) {
        bail!("Product '{}' is not in the cart", id);
    }
    let quantity = store.line(&id).map(|l| l.quantity).unwrap_or_default();
    finish(&store, ctx, &format!("Quantity of '{}' is now {}", id, quantity))
}

/// Run the dec command.
pub fn decrement(args: StepArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id);

    if !store.decrement(&id) {
        match store.line(&id) {
            Some(_) => ctx
                .output
                .warn("Quantity is already 1; use `cart remove` to drop the item"),
            None => bail!("Product '{}' is not in the cart", id),
        }
        return finish(&store, ctx, "Cart unchanged");
    }
    let quantity = store.line(&id).map(|l| l.quantity).unwrap_or_default();
    finish(&store, ctx, &format!("Quantity of '{}' is now {}", id, quantity))
}

/// Run the clear command.
pub fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    if !store.is_empty() && !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} items from your cart?",
                store.item_count()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    store.clear();
    finish(&store, ctx, "Cart cleared")
}

/// Report the outcome of a mutation.
fn finish(store: &CartStore<FileStore>, ctx: &Context, msg: &str) -> Result<()> {
    if let PersistStatus::Failed { error, .. } = store.persist_status() {
        ctx.output
            .warn(&format!("Cart could not be saved: {}", error));
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": store.current_lines(),
            "summary": store.summary(),
            "saved": !store.persist_status().is_failed(),
        }));
        return Ok(());
    }

    ctx.output.success(msg);
    ctx.output.kv("Items", &store.item_count().to_string());
    ctx.output.kv("Total", &store.summary().total.display());
    Ok(())
}
