use anyhow::{bail, Context, Result};
use colored::*;
use std::io::{self, Write};

use relay::auth::SessionContext;

use crate::session_file;

pub mod account;
pub mod saved;
pub mod scan;

/// Load the stored session or explain how to get one
pub(crate) fn require_session() -> Result<SessionContext> {
  session_file::load()?
    .context("not logged in; run 'analyzer login <email>' first")
}

/// Forget the stored session after the authority rejected its token
pub(crate) fn drop_rejected_session() -> Result<()> {
  session_file::clear()?;
  println!("{} Session expired; run 'analyzer login <email>' to sign in again", "✗".red());
  Ok(())
}

pub(crate) fn prompt_password() -> Result<String> {
  print!("Password: ");
  io::stdout().flush()?;

  let mut input = String::new();
  io::stdin().read_line(&mut input)?;
  let password = input.trim().to_string();

  if password.is_empty() {
    bail!("password cannot be empty");
  }
  Ok(password)
}

pub(crate) fn confirm(question: &str) -> Result<bool> {
  print!("{question} (y/N) ");
  io::stdout().flush()?;

  let mut input = String::new();
  io::stdin().read_line(&mut input)?;
  let answer = input.trim().to_lowercase();
  Ok(answer == "y" || answer == "yes")
}
