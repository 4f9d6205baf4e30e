use std::{env, fs, process::ExitCode};

use anyhow::Context;
use asl::vm::AslVm;
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;

const DEFAULT_SOURCE: &str = "test.asl";

fn main() -> ExitCode {
    // RUST_LOG overrides the level
    if let Err(err) = SimpleLogger::new().with_level(LevelFilter::Warn).env().init() {
        eprintln!("cannot install logger: {}", err);
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    let program =
        fs::read_to_string(&path).with_context(|| format!("Error: Cant read file {}", path))?;

    let mut vm = AslVm::load(&program)?;
    vm.run()?;

    debug!("{} finished: {:?}", path, vm.halt);
    Ok(())
}
