use thiserror::Error;

/// Errors raised while serializing a DOM tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    #[error("Invalid tag name: '{0}'")]
    InvalidTagName(String),

    #[error("Invalid attribute name '{name}' on <{tag}>")]
    InvalidAttributeName { tag: String, name: String },
}
