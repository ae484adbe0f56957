mod oauth;

pub use oauth::{percent_encode, OAuthCredentials, OAuthSigner};
