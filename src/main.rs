use mercado_rs::config::ConfigLoader;
use mercado_rs::logger::init_logger;
use mercado_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ConfigLoader::new().load()?;
    init_logger(&settings.logger)?;

    Server::new(settings).run().await
}
