use clap::{Args, Subcommand};
use trip_admin_core::Storage;

#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand)]
pub enum AuthSubcommand {
    /// Store an admin token
    Login {
        /// Token value
        token: String,
    },

    /// Remove the stored admin token
    Logout,

    /// Show whether an admin token is stored
    Status,
}

impl AuthCommand {
    pub fn run(&self, storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
        let session = storage.session();
        match &self.command {
            AuthSubcommand::Login { token } => {
                if token.trim().is_empty() {
                    return Err("Token cannot be empty".into());
                }
                session.store_token(token.trim())?;
                println!("Logged in");
            }
            AuthSubcommand::Logout => {
                session.clear_token()?;
                println!("Logged out");
            }
            AuthSubcommand::Status => {
                if session.token_present()? {
                    println!("Logged in");
                } else {
                    println!("Not logged in");
                }
            }
        }
        Ok(())
    }
}
