//! Repository Layer
//!
//! Data access abstractions and the in-memory booking store.

mod booking_store;
mod traits;


pub use booking_store::BookingStore;
pub use traits::Repository;
