//! Domain models shared by repositories, services and the web layer
//!
//! These types are independent of the SeaORM entities; repositories convert
//! entity models into them before handing data upwards.

pub mod grading;
pub mod user;

pub use grading::*;
pub use user::*;
