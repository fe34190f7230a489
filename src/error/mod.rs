mod app_error;

#[allow(unused_imports)]
pub use app_error::{AppError, AppResult, ValidationFieldError};
