//! `login`, `logout` and `status` commands.

use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::auth::{AuthenticatedClient, LoginCredentials};

/// Prompt for the password and sign in.
pub async fn handle_login_command(client: &AuthenticatedClient, email: &str) -> Result<()> {
    let password = rpassword::prompt_password(format!("Password for {}: ", email))
        .wrap_err("Failed to read password")?;
    if password.is_empty() {
        return Err(eyre!("Password must not be empty"));
    }

    client
        .session()
        .login(&LoginCredentials::new(email, password))
        .await
        .map_err(|e| eyre!(e.user_message()).wrap_err(format!("Login failed [{}]", e.error_code())))?;

    println!("Signed in as {}", email);
    Ok(())
}

pub async fn handle_logout_command(client: &AuthenticatedClient) -> Result<()> {
    client
        .session()
        .logout()
        .await
        .wrap_err("Failed to clear stored session")?;
    println!("Signed out");
    Ok(())
}

pub async fn handle_status_command(client: &AuthenticatedClient) -> Result<()> {
    let base_url = &client.config().base_url;
    if client.session().is_authenticated().await {
        println!("Signed in ({})", base_url);
    } else {
        println!("Not signed in ({}). Run: eventmap login <email>", base_url);
    }
    Ok(())
}
