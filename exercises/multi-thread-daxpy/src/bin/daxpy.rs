use std::process;

use clap::{error::ErrorKind, Parser};
use multi_thread_daxpy::{run, DaxpyConfig, Error};

/// Two-thread DAXPY benchmark: c = 2.0 * a + b
#[derive(Debug, Parser)]
#[clap(name = "multi-thread-daxpy", version = "0.1.0")]
struct Cli {
    /// Number of elements in each vector
    #[clap(allow_negative_numbers = true)]
    vector_size: i64,
}

fn fail(err: Error) -> ! {
    eprintln!("{err}");
    process::exit(1);
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => fail(Error::Usage(e.to_string().trim_end().to_owned())),
    };

    if let Err(err) = DaxpyConfig::new(cli.vector_size).and_then(|config| run(&config)) {
        fail(err);
    }
}
