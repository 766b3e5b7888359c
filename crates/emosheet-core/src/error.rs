pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Character JSON is empty")]
    EmptyInput,

    #[error("Character JSON parse error: {message}")]
    InputJson { message: String },
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::InputJson {
            message: value.to_string(),
        }
    }
}
