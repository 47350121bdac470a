// src/cli/api_key.rs
use std::io::{self, BufRead};

use super::{ApiKeyCommand, CliError};
use crate::ai::api_key::{api_key_status, clear_api_key, store_api_key};

pub fn run(action: ApiKeyCommand) -> Result<(), CliError> {
    match action {
        ApiKeyCommand::Set { key } => {
            let key = match key {
                Some(k) => k,
                None => {
                    let mut line = String::new();
                    io::stdin().lock().read_line(&mut line)?;
                    line
                }
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::InvalidArgument("API key is empty".to_string()));
            }
            store_api_key(key)?;
            println!("API key stored.");
        }
        ApiKeyCommand::Clear => {
            clear_api_key()?;
            println!("API key cleared.");
        }
        ApiKeyCommand::Status => println!("{}", api_key_status().label()),
    }
    Ok(())
}
