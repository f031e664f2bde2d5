//! `cloudview [OPTIONS.toml]`: open the point-cloud viewer window.

use std::path::Path;

use cloudview::{Options, Viewer, ViewerError};

fn run() -> Result<(), ViewerError> {
    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };
    Viewer::builder().with_options(options).build().run()
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
