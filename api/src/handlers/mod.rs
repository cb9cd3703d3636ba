pub mod error;

pub use error::{handle_domain_error, handle_domain_error_with_lang, to_response};
