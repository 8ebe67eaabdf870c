use crate::ApplicationOptions;
use clap::Parser;
use log::info;

pub fn arg_parse() -> ApplicationOptions {
    env_logger::init();

    let cli = ApplicationOptions::parse();

    info!("Parsed following arguments: ");
    info!("{:?}", &cli);
    cli
}
