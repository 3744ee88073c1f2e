pub mod contributions_api;
