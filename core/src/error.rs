use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    #[error("Invalid gallery configuration: {0}")]
    InvalidConfig(String),
    #[error("Gallery configuration lists no images")]
    EmptyCatalog,
    #[error("Image {0:?} is listed more than once")]
    DuplicateImage(String),
    #[error("Special image {0:?} has a probability outside of [0, 1]")]
    InvalidProbability(String),
    #[error("No image selected to reveal from")]
    EmptySelection,
    #[error("Selection is locked while images are revealed")]
    SelectionLocked,
    #[error("Unknown image {0:?}")]
    UnknownImage(String),
    #[error("Storage failure: {0}")]
    Storage(String),
}

pub type Result<T> = core::result::Result<T, GalleryError>;
