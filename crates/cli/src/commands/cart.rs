//! Cart building.
//!
//! The cart lives for one invocation, so a whole session of cart edits is
//! given at once. Edits apply in a fixed order: adds, then quantity sets,
//! then removals, then checkout.
//!
//! ```bash
//! # Two copies of book 3, one of book 5, then drop book 5 and check out
//! booknest cart 3 3 5 --remove 5 --checkout
//!
//! # Add book 1 and set its quantity to 4
//! booknest cart 1 --set 1=4
//! ```

use std::io::{self, Write};

use clap::Args;

use booknest_core::BookId;
use booknest_storefront::{CartManager, Storefront};

#[derive(Debug, Args)]
pub struct CartArgs {
    /// Book IDs to add, one copy per occurrence
    pub add: Vec<BookId>,

    /// Set a line's quantity, as ID=QTY; zero removes the line
    #[arg(long = "set", value_name = "ID=QTY", value_parser = parse_set)]
    pub set: Vec<(BookId, u32)>,

    /// Remove a line
    #[arg(long = "remove", value_name = "ID")]
    pub remove: Vec<BookId>,

    /// Check out once the edits are applied
    #[arg(long)]
    pub checkout: bool,
}

fn parse_set(s: &str) -> Result<(BookId, u32), String> {
    let (id, quantity) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got `{s}`"))?;
    let id = id
        .parse::<BookId>()
        .map_err(|e| format!("invalid book ID `{id}`: {e}"))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity `{quantity}`: {e}"))?;
    Ok((id, quantity))
}

/// Apply the cart edits and render the drawer.
///
/// # Errors
///
/// Returns `AppError::BookNotFound` if an added ID is not in the catalog, or
/// an I/O error if writing to `out` fails.
pub fn run(
    storefront: &mut Storefront,
    args: &CartArgs,
    out: &mut impl Write,
) -> Result<(), crate::CliError> {
    for &id in &args.add {
        storefront.add_to_cart(id)?;
    }
    for &(id, quantity) in &args.set {
        storefront.update_quantity(id, quantity);
    }
    for &id in &args.remove {
        storefront.remove_from_cart(id);
    }

    storefront.open_cart();
    render(storefront.cart(), out)?;

    if args.checkout {
        match storefront.checkout() {
            Some(confirmation) => writeln!(
                out,
                "Order placed: {} items for {}",
                confirmation.item_count, confirmation.total_price
            )?,
            None => writeln!(out, "Nothing to check out.")?,
        }
    }
    Ok(())
}

fn render(cart: &CartManager, out: &mut impl Write) -> io::Result<()> {
    let summary = cart.summary();
    writeln!(out, "Shopping Cart ({})", summary.item_count)?;

    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    for line in cart.lines() {
        writeln!(
            out,
            "  {} x {:<32} {:>8} = {:>8}",
            line.quantity,
            line.title,
            line.price.to_string(),
            line.line_price().to_string()
        )?;
    }
    writeln!(out, "Total: {}", summary.total_price)?;
    Ok(())
}
