pub mod app;
pub mod chat;
pub mod config;
pub mod entry;
pub mod entry_list;
pub mod error;
pub mod export;
pub mod network;
pub mod pages;
pub mod store;

use actix_web::HttpServer;
use actix_web::middleware;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use log::info;

pub use app::App;
pub use config::{Config, ConfigBuilder};
pub use entry::FitnessEntry;
pub use entry_list::EntryList;
pub use store::RecordStore;

/// builds the application state from `config` and serves it until shutdown
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let http_addr = config.bind_addr();
    let app_data = Data::new(App::from_config(&config));

    info!(
        "serving {} on {} with model {}",
        config.data_file.display(),
        http_addr,
        config.model
    );

    // Start the actix-web server.
    let server = HttpServer::new(move || {
        actix_web::App::new()
            .wrap(Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(app_data.clone())
            .configure(network::configure)
    });

    let x = server.bind(http_addr)?;

    Ok(x.run().await?)
}
