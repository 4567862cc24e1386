#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("No records in {0}")]
    EmptyInput(String),

    #[error("Invalid JSON in {source_name}: {message}")]
    InvalidJson {
        source_name: String,
        message: String,
    },
}
