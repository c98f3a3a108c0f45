#![deny(missing_docs)]

//! # protoyamltag CLI
//!
//! Go tool to add YAML tag into structs generated from Protocol Buffers.
//!
//! Usage: `protoyamltag -f user.pb.go [-w]`

use clap::Parser;
use log::error;
use std::io;
use std::process::ExitCode;

mod annotate;

#[derive(Parser, Debug)]
#[clap(
    name = "protoyamltag",
    author,
    version,
    about = "Go tool to add YAML tag into structs generated from Protocol Buffers."
)]
struct Cli {
    #[clap(flatten)]
    args: annotate::AnnotateArgs,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match annotate::execute(&cli.args, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
