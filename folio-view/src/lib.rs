//! Page state for the portfolio views: what is listed, what is open, and
//! whether editing is unlocked.

pub mod admin;
pub mod controller;
pub mod error;

pub use admin::{
    ADMIN_IDENTIFIER, AdminCapability, AdminGate, FileFlagStore, FlagStore, MemoryFlagStore,
};
pub use controller::{Notice, Outcome, Phase, ViewController, ViewState};
pub use error::ViewError;
