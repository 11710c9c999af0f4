pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot find a root for {anchor}.")]
	NoRoot { anchor: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Query error: {message}")]
	Query { message: String },
	#[error(transparent)]
	Config(#[from] outrank_config::Error),
}
