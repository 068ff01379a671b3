pub mod body;
pub mod form;
pub mod multipart;
