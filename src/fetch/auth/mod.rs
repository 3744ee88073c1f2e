//! Decorators that attach an API key to every request.

mod api_key;
mod url_param;

pub use api_key::ApiKey;
pub use url_param::UrlParam;
