use fixtrack::commands::Cli;
use fixtrack::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fixtrack=debug"));
        fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
    }

    Cli::menu()
}
