//! `doceria-api` — HTTP surface of the shop management service.

pub mod app;
