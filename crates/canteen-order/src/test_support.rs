//! Shared fixtures for the crate's tests.

use axum::Router;
use tokio::net::TcpListener;
use url::Url;

use canteen_core::{Address, Cart, LineItem, Money, Order};

/// One pizza line, two of them.
pub(crate) fn pizza_cart() -> Cart {
    Cart::from_items(vec![LineItem::new(1, "Pizza", Money::from_rupees(250), 2)])
}

pub(crate) fn valid_address() -> Address {
    Address::new("3", "5", "002")
}

pub(crate) fn pizza_order() -> Order {
    let cart = pizza_cart();
    Order::new(&cart, &valid_address(), cart.total())
}

/// Serves `router` on a loopback port and returns the order URL on it.
pub(crate) async fn spawn_endpoint(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/api/google-sheets")).unwrap()
}

/// A loopback URL with nothing listening behind it.
pub(crate) async fn unreachable_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/api/google-sheets")).unwrap()
}
