//! # Screen Rendering
//!
//! Turns a checkout's [`CheckoutView`] into the text the kiosk prints.
//!
//! ## Screens
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │ Cart                         │   │ Order Status                 │
//! │ Your Order                   │   │ Order Placed!                │
//! │   Pizza   ₹250.00   x 2      │   │ Order ID: ORD123             │
//! │ Tower 3  Floor 5  Apt 002    │   │ Placed: 16 Oct 2026, 12:30   │
//! │ Total            ₹500.00     │   │ [ Place Another Order ]      │
//! │ [ Confirm Order ]            │   └──────────────────────────────┘
//! └──────────────────────────────┘   ┌──────────────────────────────┐
//!                                    │ Order Status                 │
//!                                    │ Oops!                        │
//!                                    │ Sheet quota exceeded         │
//!                                    │ [ Try Again ]                │
//!                                    └──────────────────────────────┘
//! ```

use canteen_core::validation::validate_address;
use canteen_core::{Address, Cart, CheckoutController, CheckoutView};

/// Renders the full checkout panel for the checkout's current view.
pub fn screen(checkout: &CheckoutController, cart: &Cart) -> String {
    let view = checkout.view();
    let address = checkout.address();
    let mut lines = vec![view.title().to_string(), String::new()];

    match view {
        CheckoutView::Cart {
            show_address_warning,
            confirm_enabled,
        } => {
            lines.extend(cart_lines(cart));
            lines.push(String::new());
            lines.extend(address_lines(address, show_address_warning));
            lines.push(String::new());
            lines.push(format!("{:<28}{:>12}", "Total", cart.total().to_string()));
            lines.push(if confirm_enabled {
                "[ Confirm Order ]".to_string()
            } else {
                "[ Confirm Order ] (disabled)".to_string()
            });
        }
        CheckoutView::Placing => {
            lines.push("Placing Your Order...".to_string());
        }
        CheckoutView::Success { order_id } => {
            lines.push("Order Placed!".to_string());
            lines.push("Your delicious meal is on its way. Thank you!".to_string());
            lines.push(format!("Order ID: {order_id}"));
            if let Some(confirmed_at) = checkout.confirmed_at() {
                lines.push(format!(
                    "Placed: {}",
                    confirmed_at.format("%d %b %Y, %H:%M UTC")
                ));
            }
            lines.push(String::new());
            lines.push("[ Place Another Order ]".to_string());
        }
        CheckoutView::Error { message } => {
            lines.push("Oops!".to_string());
            lines.push("Something went wrong while placing your order.".to_string());
            lines.push(message);
            lines.push(String::new());
            lines.push("[ Try Again ]".to_string());
        }
    }

    lines.join("\n")
}

fn cart_lines(cart: &Cart) -> Vec<String> {
    let mut lines = vec!["Your Order".to_string()];

    if cart.is_empty() {
        lines.push("  (no items)".to_string());
    }

    for item in cart.items() {
        lines.push(format!(
            "  {:<20}{:>12}   x {}",
            item.name,
            item.unit_price.to_string(),
            item.quantity
        ));
    }

    lines
}

fn address_lines(address: &Address, show_warning: bool) -> Vec<String> {
    let shown = |v: &str| if v.is_empty() { "-".to_string() } else { v.to_string() };

    let mut lines = vec![format!(
        "Tower {}  Floor {}  Apartment {}",
        shown(&address.tower),
        shown(&address.floor),
        shown(&address.apartment)
    )];

    if show_warning {
        if let Err(warning) = validate_address(address) {
            lines.push(warning.to_string());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use canteen_core::{LineItem, Money, OrderId};

    fn cart() -> Cart {
        Cart::from_items(vec![LineItem::new(1, "Pizza", Money::from_rupees(250), 2)])
    }

    fn placing(cart: &Cart) -> CheckoutController {
        let mut checkout = CheckoutController::new();
        checkout.set_address(Address::new("3", "5", "002")).unwrap();
        checkout.confirm(cart, cart.total()).unwrap();
        checkout
    }

    #[test]
    fn test_cart_screen_with_warning() {
        let cart = cart();
        let mut checkout = CheckoutController::new();
        let _ = checkout.confirm(&cart, cart.total());

        let out = screen(&checkout, &cart);

        assert!(out.starts_with("Cart\n"));
        assert!(out.contains("Pizza"));
        assert!(out.contains("₹500.00"));
        assert!(out.contains("Please fill out all address fields."));
        assert!(out.contains("(disabled)"));
    }

    #[test]
    fn test_cart_screen_without_warning() {
        let mut checkout = CheckoutController::new();
        checkout.set_address(Address::new("3", "5", "002")).unwrap();

        let out = screen(&checkout, &cart());

        assert!(out.contains("Tower 3  Floor 5  Apartment 002"));
        assert!(!out.contains("Please fill out"));
        assert!(!out.contains("(disabled)"));
    }

    #[test]
    fn test_success_screen_shows_order_id_and_time() {
        let cart = cart();
        let mut checkout = placing(&cart);
        checkout.resolve(OrderId::new("ORD123")).unwrap();

        let out = screen(&checkout, &cart);

        assert!(out.starts_with("Order Status\n"));
        assert!(out.contains("Order Placed!"));
        assert!(out.contains("Order ID: ORD123"));
        assert!(out.contains("Placed: "));
        assert!(out.contains(" UTC"));
    }

    #[test]
    fn test_error_screen_shows_message() {
        let cart = cart();
        let mut checkout = placing(&cart);
        checkout.reject("Sheet quota exceeded").unwrap();

        let out = screen(&checkout, &cart);

        assert!(matches!(checkout.view(), CheckoutView::Error { .. }));
        assert!(out.contains("Oops!"));
        assert!(out.contains("Sheet quota exceeded"));
        assert!(out.contains("[ Try Again ]"));
    }
}
