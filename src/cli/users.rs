// src/cli/users.rs
use super::{CliError, UsersCommand};
use crate::auth::{AuthService, MainView, UserDraft, UserRepository};

fn permission_list(permissions: &[MainView]) -> String {
    permissions
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run<R: UserRepository>(auth: &AuthService<R>, action: UsersCommand) -> Result<(), CliError> {
    auth.require(MainView::AdminPanel)?;
    match action {
        UsersCommand::List => {
            println!("{:<12} {:<24} {:<10} {}", "Emp ID", "Name", "Role", "Permissions");
            println!("{}", "-".repeat(80));
            for user in auth.registry()? {
                println!(
                    "{:<12} {:<24} {:<10} {}",
                    user.emp_id,
                    user.name,
                    format!("{:?}", user.role),
                    permission_list(&user.permissions)
                );
            }
        }
        UsersCommand::Add {
            emp_id,
            name,
            password,
            permissions,
        } => {
            let user = auth.save_user(
                UserDraft {
                    emp_id,
                    name,
                    password: Some(password),
                    permissions,
                },
                None,
            )?;
            println!("Added {} ({})", user.name, user.emp_id);
        }
        UsersCommand::Update {
            emp_id,
            new_emp_id,
            name,
            password,
            permissions,
        } => {
            let current = auth
                .registry()?
                .into_iter()
                .find(|u| u.emp_id == emp_id)
                .ok_or_else(|| CliError::InvalidArgument(format!("Unknown employee id {}", emp_id)))?;
            let user = auth.save_user(
                UserDraft {
                    emp_id: new_emp_id.unwrap_or_else(|| current.emp_id.clone()),
                    name: name.unwrap_or(current.name),
                    password,
                    permissions: permissions.unwrap_or(current.permissions),
                },
                Some(&emp_id),
            )?;
            println!("Updated {} ({})", user.name, user.emp_id);
        }
        UsersCommand::Delete { emp_id } => {
            auth.delete_user(&emp_id)?;
            println!("Deleted {}", emp_id);
        }
    }
    Ok(())
}
