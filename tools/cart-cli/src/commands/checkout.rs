//! Proceed to checkout.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use turbo_cart::prelude::*;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    if store.is_empty() {
        bail!("Your cart is empty. Add something before checking out.");
    }

    let mut hook = store.on_checkout(|request| {
        tracing::debug!(
            revision = request.revision,
            items = request.lines.iter().map(|l| l.quantity).sum::<i64>(),
            "checkout requested"
        );
    });
    let request = store.proceed_to_checkout();
    hook.unsubscribe();

    if ctx.output.is_json() {
        ctx.output.json(&request);
        return Ok(());
    }

    ctx.output.header("Checkout");
    ctx.output.cart_table(&request.lines);
    ctx.output.summary(&request.summary, store.policy());

    let secs = args.notice_secs.unwrap_or(ctx.config.checkout.notice_secs);
    let notice = CheckoutNotice::show(Instant::now(), Duration::from_secs(secs));
    let spinner = ctx.output.spinner(notice.message());
    while notice.is_visible(Instant::now()) {
        std::thread::sleep(notice.remaining(Instant::now()).min(Duration::from_millis(100)));
    }
    spinner.finish_and_clear();

    ctx.output.success(&format!(
        "Order of {} ready for payment",
        request.summary.total.display()
    ));
    Ok(())
}
