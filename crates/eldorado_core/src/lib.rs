pub mod dedup;
pub mod error;
pub mod store;
pub mod types;

pub use error::Error;
pub use store::UserStore;
pub use types::{ArticleRecord, UserRecord};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::types::ArticleRecord;
    pub use super::{Error, Result};
}
