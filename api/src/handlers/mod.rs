pub mod error;

pub use error::{
    bad_request, handle_domain_error, handle_domain_error_in, json_error_handler, unauthorized,
    validation_error_response, ErrorContext,
};
