use clap::ArgMatches;

pub async fn run(_matches: &ArgMatches) {
    server::run().await;
}
