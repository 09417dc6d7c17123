pub mod collection;
pub mod filter;
pub mod model;
pub mod placeholder;
pub mod util;
