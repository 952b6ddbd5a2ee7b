use clap::Parser;
use pwm::cli::{validate_username, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Validate the username early to catch typos before any prompting.
    if let Err(e) = validate_username(&cli.user) {
        pwm::cli::output::error(&e.to_string());
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Init => pwm::cli::commands::init::execute(&cli),
        Commands::Add { ref name, ref login } => {
            pwm::cli::commands::add::execute(&cli, name, login.as_deref())
        }
        Commands::Get {
            ref name,
            login,
            show,
        } => pwm::cli::commands::get::execute(&cli, name, login, show),
        Commands::Remove { ref name, force } => {
            pwm::cli::commands::remove::execute(&cli, name, force)
        }
        Commands::List => pwm::cli::commands::list::execute(&cli),
        Commands::Drop { force } => pwm::cli::commands::drop_cmd::execute(&cli, force),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            pwm::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { ref shell } => pwm::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        pwm::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
