use thiserror::Error;

#[derive(Debug, Error)]
pub enum LacesError {
    #[error("{0} has no template name and does not override render_html")]
    NotImplemented(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    #[error("Cannot render {0} as a component")]
    NotRenderable(String),

    #[error("Context error: {0}")]
    Context(String),

    #[error("Servable component not found: {0}")]
    ServableNotFound(String),

    #[error("Servable component already registered: {0}")]
    Duplicate(String),

    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl LacesError {
    /// HTTP status a host server should answer with when serving fails.
    pub fn status_code(&self) -> u16 {
        match self {
            LacesError::ServableNotFound(_) => 404,
            LacesError::BadRequest(_) | LacesError::InvalidSlug(_) => 400,
            _ => 500,
        }
    }
}

impl From<LacesError> for minijinja::Error {
    fn from(err: LacesError) -> Self {
        match err {
            LacesError::Template(inner) => inner,
            other => minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LacesError>;
