pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("{message}")]
	Upstream { status: u16, message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
}
impl From<repohealth_providers::Error> for Error {
	fn from(err: repohealth_providers::Error) -> Self {
		match err {
			repohealth_providers::Error::Status { status, message } =>
				Self::Upstream { status, message },
			other => Self::Provider { message: other.to_string() },
		}
	}
}
