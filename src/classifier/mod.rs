mod client;
pub mod extract;

pub use client::{ClassifierClient, SubmitError};
