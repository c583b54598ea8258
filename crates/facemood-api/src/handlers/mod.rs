pub mod health;
pub mod home;
pub mod upload;
pub mod uploaded_file;
