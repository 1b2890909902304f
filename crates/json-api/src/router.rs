//! App Router

use salvo::Router;

use crate::{addresses, auth, carts, orders, payments, products, users};

/// API routes, mounted under `/api/v1`. Only the catalog is public.
pub(crate) fn app_router() -> Router {
    Router::with_path("api/v1")
        .push(Router::with_path("products/{product}").get(products::get::handler))
        .push(authenticated_router())
}

fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("me").get(users::me::handler))
        .push(
            Router::with_path("addresses")
                .get(addresses::index::handler)
                .post(addresses::create::handler)
                .push(Router::with_path("{address}").get(addresses::get::handler)),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(Router::with_path("clear").delete(carts::clear::handler))
                .push(
                    Router::with_path("items")
                        .post(carts::add_item::handler)
                        .push(
                            Router::with_path("{item}")
                                .patch(carts::update_item::handler)
                                .put(carts::update_item::handler)
                                .delete(carts::remove_item::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("create").post(orders::create::handler))
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("cancel").post(orders::cancel::handler))
                        .push(Router::with_path("pay").post(payments::confirm::handler))
                        .push(
                            Router::with_path("payment")
                                .post(payments::initiate::handler)
                                .push(Router::with_path("status").get(payments::status::handler)),
                        ),
                ),
        )
}
