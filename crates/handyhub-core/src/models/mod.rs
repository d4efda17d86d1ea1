//! Wire types for the marketplace API.
//!
//! All fields use camelCase on the wire. Response types keep any fields
//! they do not name in a flattened `extra` map so nothing the server sends
//! is dropped when a record is cached or re-serialized.

pub mod booking;
pub mod provider;
pub mod user;

pub use booking::{Booking, BookingQuery, NewBooking};
pub use provider::{ProviderQuery, ReviewQuery, Review, ServiceProvider};
pub use user::{AuthResponse, ProfileUpdate, ProviderApplication, User};
