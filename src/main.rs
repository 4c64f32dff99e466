use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cypher_repl::cli::parse();
    let code = cypher_repl::app::run_cli(cli).await;
    if code != 0 {
        std::process::exit(code);
    }
}
