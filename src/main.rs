use locale_gallery::{config::Config, dotenv, server::run_server};
use log::error;

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    run_server(config).await
}

#[tokio::main]
async fn main() {
    better_panic::install();
    dotenv().ok();
    env_logger::init();

    if let Err(err) = run().await {
        error!("{:?}", err);
        std::process::exit(1);
    }
}
