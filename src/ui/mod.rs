//! On-screen milestone messages

pub mod banner;

pub use banner::{Banner, HideRequest, HideTicket, MessageDisplay};
