use clap::Parser;
use tpch_q5::app::{handle_fatal_error, init_logging, run_query, AppConfig};
use tpch_q5::cli::{collect_layers, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let layer = collect_layers(&cli);

    let log_level = layer.as_ref().ok().and_then(|l| l.log_level.clone());
    let logging = init_logging(&AppConfig::new(cli.verbose).with_log_level(log_level));

    let result = match logging.and(layer).and_then(|l| l.validate()) {
        Ok(config) => run_query(config).await.map(|_| ()),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        handle_fatal_error(e.into(), cli.verbose);
    }
}
