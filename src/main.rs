#[tokio::main]
async fn main() {
    if let Err(e) = tasklist_lib::run().await {
        eprintln!("[TASKLIST] {}", e);
        std::process::exit(1);
    }
}
