//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huffpack::compression::{compress::compress, decompress::decompress};
use huffpack::tools::cli::{huffopts_init, report_options, Mode};

use log::info;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use tikv_jemallocator::Jemalloc;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() {
    let options = huffopts_init();

    // Standard out may be carrying compressed data, so log to standard error.
    if let Err(e) = TermLogger::init(
        options.verbose.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not start logging: {}", e);
    }
    report_options(&options);

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress(&options),
        Mode::Unzip | Mode::Test => decompress(&options),
    };

    // Every failure was already logged against its file
    match result {
        Ok(()) => info!("Done.\n"),
        Err(_) => std::process::exit(1),
    }
}
