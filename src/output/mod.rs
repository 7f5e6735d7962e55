//! Output formatting for CLI display
//!
//! Helpers shared by the `parse`, `products` and `replay` commands.

use crate::catalog::Product;
use colored::Colorize;

/// Format a price with two decimals
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// Format one query key and its raw value
#[must_use]
pub fn key_value(key: &str, value: &str, quiet: bool) -> String {
    if quiet {
        format!("{key}={value}")
    } else {
        format!("  {:<12} {}", key.cyan(), value)
    }
}

/// Format a product line, with its brand name when known
#[must_use]
pub fn product_line(product: &Product, brand: Option<&str>, quiet: bool) -> String {
    if quiet {
        return product.id.clone();
    }
    let brand = brand.unwrap_or(&product.brand_id);
    format!(
        "  {:<5} {:<28} {:>9}  {}",
        product.id.dimmed(),
        product.title,
        format_price(product.price).green(),
        brand.dimmed()
    )
}

/// Format a recorded navigation; refused ones are shown in red
#[must_use]
pub fn navigation_line(step: usize, href: &str, accepted: bool) -> String {
    let href = if href.is_empty() { "(empty)" } else { href };
    if accepted {
        format!("  [{step:>3}] navigate {}", href.green())
    } else {
        format!("  [{step:>3}] navigate {} {}", href.red(), "(refused)".red())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(3.5), "3.50");
        assert_eq!(format_price(129.0), "129.00");
    }

    #[test]
    fn test_quiet_key_value() {
        assert_eq!(key_value("search", "pump", true), "search=pump");
    }

    #[test]
    fn test_navigation_line_marks_refusal() {
        colored::control::set_override(false);
        let line = navigation_line(4, "?page=2", false);
        assert!(line.contains("[  4] navigate ?page=2"));
        assert!(line.contains("(refused)"));
    }
}
