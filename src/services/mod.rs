pub mod batch_runner;
pub mod capabilities;
pub mod google_search;
pub mod http_retry;
pub mod linkedin_scraper;
pub mod openai_client;
pub mod profile_generator;
pub mod profile_selector;
pub mod sheets_auth;
pub mod sheets_client;
pub mod web_fetcher;
pub mod zenrows_client;

#[cfg(test)]
pub mod testing;

pub use batch_runner::*;
pub use capabilities::*;
pub use google_search::*;
pub use http_retry::*;
pub use linkedin_scraper::*;
pub use openai_client::*;
pub use profile_generator::*;
pub use profile_selector::*;
pub use sheets_auth::*;
pub use sheets_client::*;
pub use web_fetcher::*;
pub use zenrows_client::*;
