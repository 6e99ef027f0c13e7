#[derive(Debug, thiserror::Error)]
pub enum RobotsError {
    #[error("Invalid robots.txt origin '{0}': {1}")]
    InvalidOrigin(String, #[source] url::ParseError),

    #[error("HTTP Error Status Code = {0}")]
    HttpStatus(u16),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}
