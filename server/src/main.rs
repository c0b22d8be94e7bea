use grocery_server_lib::config::ServerConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rolling_logger::init_logger(&config.log_dir, "GroceryServer") {
        eprintln!("Failed to initialize logger: {}", e);
    }

    if let Err(e) = grocery_server_lib::run(config).await {
        log::error!("{}", e);
        if let Err(log_err) = rolling_logger::error(&e) {
            eprintln!("Failed to write error to log file: {}", log_err);
        }
        std::process::exit(1);
    }
}
