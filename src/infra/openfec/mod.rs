mod client;

pub use client::OpenFecClient;
