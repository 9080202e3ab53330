//! AapdaMitra: geotagged disaster incident reporting.
//!
//! The server side lives in [`core`] and [`features`]; the terminal client's
//! state container, API client and map view model live in [`client`].

pub mod client;
pub mod core;
pub mod features;
pub mod shared;
