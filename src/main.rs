use std::env;
use std::process;

use husk::core::config::ShellConfig;
use husk::error::ShellError;
use husk::flags::Flags;
use husk::shell::{CommandHandler, Session, Shell};

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("husk: {}", e);
            1
        }
    };
    process::exit(code);
}

fn run() -> Result<i32, ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(0);
    }

    if flags.is_set("version") {
        println!("husk {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let config = ShellConfig::from_flags(&flags)?;
    let default_level = if config.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    log::debug!("history file: {}", config.history_file.display());

    if let Some(line) = flags.get_value("command") {
        let mut session = Session::new(config);
        if let Err(e) = session.load_history() {
            log::warn!("history not loaded: {}", e);
        }
        session.execute_line(line)?;
        return Ok(session.state().last_exit_code);
    }

    let mut shell = Shell::new(config)?;
    shell.run()
}
