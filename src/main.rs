use color_eyre::Result;
use sseconv::cli::{parse_args, run_cli_command, USAGE};
use sseconv::logging::init_default_logging;

fn main() -> Result<()> {
    color_eyre::install()?;
    init_default_logging();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(e.exit_code());
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let code = runtime.block_on(run_cli_command(command))?;

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
