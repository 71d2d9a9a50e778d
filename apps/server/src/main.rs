use server::bootstrap;

mod telemetry;

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    println!("🚀 Starting service");

    // Configuration comes from ./config/config.yaml, overridable via APP_* variables
    let (config, db) = match bootstrap().await {
        Ok(started) => started,
        Err(e) => {
            eprintln!("❌ Startup failed: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "✅ Database connected driver={} address={}",
        config.database.driver, config.server.address
    );
    println!("{db:?}");
}
