use std::process::ExitCode;

mod audio;
mod cartridge;
mod config;
mod error;
mod library;
mod naming;
mod playt;
mod runtime;

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    runtime::run()
}
