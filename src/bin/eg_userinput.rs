use eg_userinput::{cli, logging, Command};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init();

    let command = Command::from_args(std::env::args().skip(1));
    eprintln!("{}", cli::banner(&command));

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted, stopping");
            on_ctrl_c.cancel();
        }
    });

    let result = cli::run(command, cancel).await;

    // A pending stdin read can't be cancelled and would hold up runtime
    // shutdown until the next Enter, so leave without waiting for it.
    std::process::exit(i32::from(cli::exit_status(&result)));
}
