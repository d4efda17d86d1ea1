//! Resource clients for the marketplace API.
//!
//! Each client only builds the path, query and body for a call and returns
//! whatever the executor produces. Results are generic so callers can
//! decode into the `models` types or keep raw `serde_json::Value`s.

pub mod bookings;
pub mod providers;
pub mod users;

pub use bookings::BookingClient;
pub use providers::ProviderClient;
pub use users::UserClient;
