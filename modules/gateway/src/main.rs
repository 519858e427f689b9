#[tokio::main]
async fn main() {
    if let Err(e) = gateway::start_server().await {
        eprintln!("gateway failed to start: {e}");
        std::process::exit(1);
    }
}
