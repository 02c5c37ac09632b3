#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("please fill all the fields before submitting, missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("reqwest `{0}`")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
