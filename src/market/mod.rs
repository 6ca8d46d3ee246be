pub mod catalog;
pub mod forms;

pub use catalog::{ALL_CATEGORIES, categories, filter_listings, seed_listings};
pub use forms::{ListingForm, RegistrationForm};
