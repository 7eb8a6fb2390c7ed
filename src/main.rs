//! Evalguard - command-line entry point

use evalguard::cli::{CliApp, exit_codes};

#[tokio::main]
async fn main() {
    let code = match CliApp::new().await {
        Ok(app) => match app.run().await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                exit_codes::INTERNAL_ERROR
            }
        },
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::CONFIG_ERROR
        }
    };

    std::process::exit(code);
}
