use anyhow::Result;
use colored::*;

use relay::auth::{AuthApi, Credentials};
use relay::client;

use crate::session_file;

use super::{drop_rejected_session, prompt_password, require_session};

pub async fn signup(email: &str) -> Result<()> {
  let password = prompt_password()?;
  let relay = client::get_relay()?;

  let principal = relay.signup(&Credentials::new(email, password)).await?;
  println!("{} Account created for {}", "✓".green(), principal.email.cyan());
  println!("Run 'analyzer login {}' to start a session", principal.email);
  Ok(())
}

pub async fn login(email: &str) -> Result<()> {
  let password = prompt_password()?;
  let relay = client::get_relay()?;

  let session = relay.authenticate(&Credentials::new(email, password)).await?;
  session_file::store(&session)?;

  println!("{} Logged in as {}", "✓".green(), session.principal().email.cyan());
  Ok(())
}

pub fn logout() -> Result<()> {
  session_file::clear()?;
  println!("{} Logged out", "✓".green());
  Ok(())
}

pub async fn whoami() -> Result<()> {
  let ctx = require_session()?;
  let relay = client::get_relay()?;

  match relay.resolve_principal(ctx.token()).await {
    Ok(principal) => {
      println!("{} (account {})", principal.email.cyan(), principal.id);
      Ok(())
    }
    Err(err) if err.is_unauthorized() => {
      drop_rejected_session()?;
      Err(err.into())
    }
    Err(err) => Err(err.into()),
  }
}
