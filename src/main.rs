mod cmd;

use clap::Parser;
use cmd::Cli;
use sql_seeder::SchemaError;

fn main() {
    let cli = Cli::parse();
    cmd::init_logging(cli.debug);

    if let Err(e) = cmd::run(cli) {
        if e.downcast_ref::<SchemaError>().is_some() {
            eprintln!("Error: {e:#}");
        } else {
            eprintln!("Unexpected error: {e:#}");
        }
        std::process::exit(1);
    }
}
