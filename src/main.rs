use taxi_gcs_loader::{LoaderRunner, Options};

#[tokio::main]
async fn main() {
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", "info");
    env_logger::Builder::from_env(env).init();

    let options = Options::parse();

    let runner = match LoaderRunner::new(&options).await {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("failed to create loader runner:\n{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runner.run().await {
        log::error!("failed to run loader:\n{}", e);
        std::process::exit(1);
    }
}
