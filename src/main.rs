//! changeme's main application entry point.
//! Parses the command line, sets up logging and dispatches the action.

use changeme::{
    cli::{get_args, resolve_root, Args},
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::execute,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let root = resolve_root(&args.root)?;
    log::debug!("Working in {}", root.display());

    let outcome = execute(args.action, &root)?;

    println!("Done in {}: {}.", root.display(), outcome);
    Ok(())
}
