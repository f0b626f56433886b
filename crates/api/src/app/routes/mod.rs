use axum::Router;

pub mod auth;
pub mod cashflow;
pub mod combos;
pub mod commissions;
pub mod products;
pub mod promotions;
pub mod sales;
pub mod system;
pub mod users;

/// Router for every domain-area endpoint.
pub fn router() -> Router {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/products", products::router())
        .nest("/api/combos", combos::router())
        .nest("/api/sales", sales::router())
        .nest("/api/commissions", commissions::router())
        .nest("/api/cashflow", cashflow::router())
        .nest("/api/promotions", promotions::router())
        .nest("/api/users", users::router())
}
