include!(concat!(env!("OUT_DIR"), "/sentry_dsn.rs"));

use env_logger::{Builder, Env};
use gitrecipe::cli::commands::commit::CommitCommand;
use gitrecipe::cli::CliCommand;
use gitrecipe::config::load_config;
use gitrecipe::context::Context;
use log::LevelFilter;
use sentry::ClientInitGuard;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = env!("CARGO_PKG_NAME"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
struct Opt {
    #[structopt(subcommand)]
    cmd: Option<CliCommand>,

    #[structopt(
        short,
        long,
        global = true,
        parse(from_os_str),
        help = "Configuration file (defaults to ./gitrecipe.toml)"
    )]
    config: Option<PathBuf>,

    #[structopt(
        long = "non-interactive",
        global = true,
        help = "Never prompt; every answer must come from flags"
    )]
    non_interactive: bool,

    #[structopt(short, long, global = true, help = "Show debug output")]
    verbose: bool,

    #[structopt(short, long, global = true, help = "Only show errors")]
    quiet: bool,
}

fn init_logger(opt: &Opt) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if opt.quiet {
        builder.filter_level(LevelFilter::Error);
    } else if opt.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).format_target(false).init();
}

fn main() {
    let opt = Opt::from_args();
    init_logger(&opt);

    let mut _guard: Option<ClientInitGuard> = None;
    if SENTRY_DSN != "undefined" {
        _guard = Some(sentry::init((
            SENTRY_DSN,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        )));
    }

    let config = match load_config(opt.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let ctx = Context::new(config, opt.non_interactive);

    let result = match &opt.cmd {
        Some(cmd) => cmd.execute(&ctx),
        None => CliCommand::Commit(CommitCommand::default()).execute(&ctx),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
