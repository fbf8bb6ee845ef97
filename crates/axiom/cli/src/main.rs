#[tokio::main]
async fn main() {
    if let Err(err) = axiom_cli::run().await {
        axiom_cli::print_error(&err.to_string());
        std::process::exit(1);
    }
}
