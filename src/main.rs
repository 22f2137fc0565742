use clap::Parser;
use miette::Result;
use mkbom::cli::commands::report::ReportArgs;
use mkbom::cli::{Cli, Commands, GlobalOpts};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .wrap_lines(false)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(&global);

    match cli.command.unwrap_or_else(|| Commands::Report(ReportArgs::default())) {
        Commands::Init(args) => mkbom::cli::commands::init::run(args),
        Commands::Report(args) => mkbom::cli::commands::report::run(args, &global),
        Commands::Check(args) => mkbom::cli::commands::check::run(args, &global),
        Commands::Tree(args) => mkbom::cli::commands::tree::run(args, &global),
        Commands::WhereUsed(args) => mkbom::cli::commands::where_used::run(args, &global),
        Commands::Completions(args) => mkbom::cli::commands::completions::run(args),
    }
}

/// Log to stderr so stdout carries only the report
fn init_logging(global: &GlobalOpts) {
    let default_level = if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env("MKBOM_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
