pub mod configuration;
pub mod error;
pub mod image_fetcher;
pub mod models;
pub mod run;
pub mod transport;
pub mod vk;
pub mod xkcd_client;

pub use configuration::Settings;
pub use models::Cli;
pub use run::run;
