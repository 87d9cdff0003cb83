//! Menu ordering cart: a persisted cart store, the presenters that mirror it
//! (menu cards, cart bar, order modal), and the page that routes UI commands
//! between them.

pub mod config;
pub mod domain;
pub mod metrics;
pub mod presentation;
pub mod state;
