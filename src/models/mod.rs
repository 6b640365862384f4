pub mod image;
pub mod quiz;
pub mod result;

pub use image::{ImageFormat, SelectedImage};
pub use quiz::{Quiz, QuizzesResponse};
pub use result::{ScoreEntry, SubmitResponse, UserResult};
