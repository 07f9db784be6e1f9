use clap::{crate_description, crate_version, Arg, ArgAction, ArgMatches, Command};
use dbkeeper::Operation;
use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

mod config;

fn cli() -> Command {
    Command::new("dbkeeper")
        .about(crate_description!())
        .version(format!("v{}", crate_version!()))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("skip")
                .long("skip")
                .help("Skip execution, also enabled by DATABASE_SKIP=true")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log the statements and command lines that are run")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommands([
            Command::new("create").about("Create database"),
            Command::new("drop").about("Drop database if it exists"),
            Command::new("dump").about("Dump database into a file").arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .help("File to write the dump to, defaults to DATABASE_DUMP_FILE")
                    .action(ArgAction::Set),
            ),
        ])
}

// global flags land on the subcommand when given after it
fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches.get_flag(id)
        || matches
            .subcommand()
            .map(|(_, sub_matches)| sub_matches.get_flag(id))
            .unwrap_or(false)
}

fn operation(matches: &ArgMatches) -> Operation {
    match matches.subcommand() {
        Some(("create", ..)) => Operation::Create,
        Some(("drop", ..)) => Operation::Drop,
        Some(("dump", dump_matches)) => {
            let output = dump_matches
                .get_one::<String>("output")
                .cloned()
                .unwrap_or_else(config::dump_file);
            Operation::Dump {
                output: PathBuf::from(output),
            }
        }
        _ => unreachable!(), // If all subcommands are defined above, anything else is unreachable
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();

    let level = if flag(&matches, "verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)
        .expect("Failed to initialize logger");

    if flag(&matches, "skip") || config::skip() {
        info!("skipping execution");
        return;
    }

    let database_url = match config::database_url() {
        Ok(url) => url,
        Err(..) => {
            error!("No database url found, please set the DATABASE_URL environment variable");
            std::process::exit(1);
        }
    };
    let username = config::database_username();
    let password = config::database_password();

    match dbkeeper::run(&database_url, &username, &password, operation(&matches)).await {
        Err(err) if err.is_expected() => {
            error!("{}", err);
            std::process::exit(1);
        }
        Err(err) => {
            error!("Unexpected failure: {}", err);
            std::process::exit(1);
        }
        Ok(_) => info!("Success"),
    };
}
