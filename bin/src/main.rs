use std::process::exit;

use bin::executor::*;
use clap::Parser;
use log::error;

fn main() {
    // examples:
    // rotate-exec
    // rotate-exec --rows 1024 --cols 4096 --threads-per-block 256 --quiet
    // RUST_LOG=debug rotate-exec --strategy row-copy --times 3
    env_logger::init();
    let args = RotateExecArgs::parse();

    match execute(&args) {
        Ok(summary) => print!("{}", render_summary(&summary, args.quiet)),
        Err(e) => {
            error!("{}", e);
            eprintln!("rotate-exec: {}", e);
            exit(1);
        }
    }
}
