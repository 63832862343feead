//! Menu domain models
//!
//! Restaurant → Category → (SubCategory) → Dish → ServingInfo

pub mod category;
pub mod dish;
pub mod listing;
pub mod restaurant;

pub use category::*;
pub use dish::*;
pub use listing::*;
pub use restaurant::*;
