use campus::error::CampusError;

mod cli;

fn main() {
    if let Err(e) = cli::commands::run() {
        let message = match &e {
            CampusError::Api(msg) | CampusError::Config(msg) => msg.clone(),
            other => other.user_message(),
        };
        tracing::debug!("command failed: {}", e);
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}
