use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes one prepared request. Wrappers such as
/// [`ApiKey`](super::auth::ApiKey) decorate an inner client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
