use clap::{Command, arg, command, crate_name};
use client::UploadParams;

mod cli;

#[tokio::main]
async fn main() {
    let cli = command!(crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .subcommand(Command::new(cli::VERSION_SUBCOMMAND).about(cli::VERSION_DESCRIPTION))
        .subcommand(Command::new(cli::BUGREPORT_SUBCOMMAND).about(cli::BUGREPORT_DESCRIPTION))
        .subcommand(Command::new(cli::SERVER_SUBCOMMAND).about(cli::SERVER_DESCRIPTION))
        .subcommand(
            Command::new(cli::UPLOAD_SUBCOMMAND)
                .about(cli::UPLOAD_DESCRIPTION)
                .arg(arg!(-u --uri <URI>).required(true).help("Mstore URI"))
                .arg(
                    arg!(-f --file <FILE>)
                        .required(true)
                        .num_args(1..)
                        .help("Path(s) of the file(s) to upload"),
                ),
        )
        .subcommand(
            Command::new(cli::LIST_SUBCOMMAND)
                .about(cli::LIST_DESCRIPTION)
                .arg(arg!(-u --uri <URI>).required(true).help("Mstore URI")),
        )
        .subcommand(
            Command::new(cli::DELETE_SUBCOMMAND)
                .about(cli::DELETE_DESCRIPTION)
                .arg(arg!(-u --uri <URI>).required(true).help("Mstore URI"))
                .arg(
                    arg!(-i --id <ID>)
                        .required(true)
                        .value_parser(clap::value_parser!(i64))
                        .help("Id of the file to delete"),
                ),
        )
        .arg_required_else_help(true)
        .disable_version_flag(true)
        .get_matches();

    if cli.subcommand_matches(cli::VERSION_SUBCOMMAND).is_some() {
        cli::version::run();
    } else if cli.subcommand_matches(cli::BUGREPORT_SUBCOMMAND).is_some() {
        cli::bugreport::run();
    } else if let Some(server_matches) = cli.subcommand_matches(cli::SERVER_SUBCOMMAND) {
        cli::server::run(server_matches).await;
    } else if let Some(upload_matches) = cli.subcommand_matches(cli::UPLOAD_SUBCOMMAND) {
        let uri = upload_matches.get_one::<String>("uri").unwrap();
        let files: Vec<String> = upload_matches
            .get_many::<String>("file")
            .unwrap()
            .cloned()
            .collect();
        let params = UploadParams {
            uri: uri.clone(),
            files,
        };
        cli::client::upload_files(params).await;
    } else if let Some(list_matches) = cli.subcommand_matches(cli::LIST_SUBCOMMAND) {
        let uri = list_matches.get_one::<String>("uri").unwrap();
        cli::client::list_files(uri).await;
    } else if let Some(delete_matches) = cli.subcommand_matches(cli::DELETE_SUBCOMMAND) {
        let uri = delete_matches.get_one::<String>("uri").unwrap();
        let id = *delete_matches.get_one::<i64>("id").unwrap();
        cli::client::delete_file(uri, id).await;
    }
}
