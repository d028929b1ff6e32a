//! Mail module - SMTP delivery of account emails

pub mod smtp;

pub use smtp::SmtpMailer;
