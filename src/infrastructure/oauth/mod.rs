pub mod google;

pub use google::{GoogleCredentials, GoogleTokenProvider, ServiceAccountKey};
