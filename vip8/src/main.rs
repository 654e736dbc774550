use std::env;
use std::path::PathBuf;
use std::process;

mod audio;
mod keymap;
mod run;

fn main() {
    env_logger::init();

    let rom = match env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: vip8 <rom-file>");
            process::exit(2);
        }
    };

    if let Err(e) = run::run(&rom) {
        eprintln!("vip8: {}", e);
        process::exit(1);
    }
}
