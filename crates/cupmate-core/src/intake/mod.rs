//! Intake tracking.
//!
//! A fixed set of beverage [`Category`] values and an [`IntakeStore`]
//! holding how many ml of each were consumed this session.

mod category;
mod store;

pub use category::Category;
pub use store::{parse_amount, Applied, IntakeEntry, IntakeSnapshot, IntakeStore, CUP_FULL_ML};
