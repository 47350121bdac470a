// src/cli/session.rs
use std::io::{self, BufRead, Write};

use super::CliError;
use crate::auth::{AuthService, MainView, UserRepository};

const PASSWORD_ENV: &str = "DASHLY_PASSWORD";

fn read_password() -> Result<String, CliError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn login<R: UserRepository>(
    auth: &AuthService<R>,
    emp_id: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = match password {
        Some(p) => p,
        None => read_password()?,
    };
    let user = auth.login(emp_id, &password)?;
    println!("Welcome back, {}.", user.name);
    Ok(())
}

pub fn logout<R: UserRepository>(auth: &AuthService<R>) -> Result<(), CliError> {
    auth.logout()?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami<R: UserRepository>(auth: &AuthService<R>) -> Result<(), CliError> {
    let Some(user) = auth.current_user()? else {
        println!("Not logged in.");
        return Ok(());
    };
    println!("{} ({}, {:?})", user.name, user.emp_id, user.role);
    for view in MainView::ALL {
        if user.can_access(view) {
            println!("  {}", view.label());
        }
    }
    Ok(())
}
