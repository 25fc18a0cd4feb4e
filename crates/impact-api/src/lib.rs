pub mod client;
pub mod credentials;
pub mod error;
pub mod schemas;

pub use client::Client;
pub use credentials::ImpactCredentials;
pub use error::ClientError;
pub use reqwest::Url;
