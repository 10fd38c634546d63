use clap::Parser;
use miette::Result;
use parts::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "PARTS_LOG";

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
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
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    init_tracing(global.verbose);

    match cli.command {
        Commands::Init(args) => parts::cli::commands::init::run(args),
        Commands::List => parts::cli::commands::part::run_list(&global),
        Commands::Filter(args) => parts::cli::commands::part::run_filter(args, &global),
        Commands::Reset => parts::cli::commands::part::run_reset(&global),
        Commands::Sort(args) => parts::cli::commands::part::run_sort(args, &global),
        Commands::New(args) => parts::cli::commands::part::run_new(args, &global),
        Commands::Edit(args) => parts::cli::commands::part::run_edit(args, &global),
        Commands::Show(args) => parts::cli::commands::part::run_show(args, &global),
        Commands::Delete(args) => parts::cli::commands::part::run_delete(args, &global),
        Commands::Export(args) => parts::cli::commands::export::run(args, &global),
        Commands::Import(args) => parts::cli::commands::import::run(args, &global),
        Commands::Completions(args) => parts::cli::commands::completions::run(args),
    }
}

/// Log to stderr; `PARTS_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "parts=debug" } else { "parts=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
