//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use turbo_cart::cart::{CartLine, OrderSummary, PricingPolicy};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print the cart lines as a table.
    pub fn cart_table(&self, lines: &[CartLine]) {
        if self.json {
            return;
        }
        if lines.is_empty() {
            self.info("Your cart is empty");
            return;
        }

        let widths = [14, 24, 12, 5, 12];
        self.table_row(&["ID", "PRODUCT", "PRICE", "QTY", "TOTAL"], &widths);
        for line in lines {
            self.table_row(
                &[
                    line.product.id.as_str(),
                    &line.product.name,
                    &line.product.price.display(),
                    &line.quantity.to_string(),
                    &line.line_total().display(),
                ],
                &widths,
            );
        }
    }

    /// Print an order summary block.
    pub fn summary(&self, summary: &OrderSummary, policy: &PricingPolicy) {
        if self.json {
            return;
        }
        self.kv("Subtotal", &summary.subtotal.display());
        let shipping = if summary.is_free_shipping() {
            style("FREE").green().to_string()
        } else {
            summary.shipping.display()
        };
        self.kv("Shipping", &shipping);
        self.kv(
            &format!("Tax ({})", policy.tax_percent_label()),
            &summary.tax.display(),
        );
        self.kv("Total", &style(summary.total.display()).bold().to_string());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(template);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}
