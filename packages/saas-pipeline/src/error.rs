use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read bronze input at {path:?}.")]
	ReadInput {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("Invalid input: {message}")]
	InvalidInput { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<saas_storage::Error> for Error {
	fn from(err: saas_storage::Error) -> Self {
		match err {
			saas_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			saas_storage::Error::InvalidArgument(message) => Self::InvalidInput { message },
		}
	}
}
