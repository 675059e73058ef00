pub mod audit;
pub mod bronze;
pub mod db;
pub mod gold;
pub mod models;
pub mod schema;
pub mod silver;
pub mod table;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
