pub mod checks;
pub mod suite;
pub mod testing;
pub mod values;

pub use crate::domain::model::{CheckOutcome, DocumentRef, DocumentSnapshot};
pub use crate::domain::ports::{ConfigProvider, DocumentStore};
pub use crate::utils::error::Result;
