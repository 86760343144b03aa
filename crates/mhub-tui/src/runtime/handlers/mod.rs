//! Effect handler implementations.
//!
//! Handlers are pure async functions that do the I/O and return the `UiEvent`
//! the runtime feeds back into the reducer.

pub mod sessions;

pub use sessions::sessions_fetch;
