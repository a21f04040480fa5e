mod error;
mod requests;
mod types;

pub use error::EntryFormError;
pub use requests::EntryForm;
pub use types::{format_hike_date, Difficulty, HikeEntry, NewHikeEntry, User};
