//! Account commands.
//!
//! ```bash
//! booknest account sign-up -e emma@example.com -p secret -n Emma
//! booknest account sign-in -e emma@example.com -p secret
//! booknest account whoami
//! booknest account sign-out
//! ```

use std::io::Write;

use clap::Subcommand;

use booknest_storefront::{AccountView, Storefront};

use crate::CliError;

#[derive(Debug, Subcommand)]
pub enum AccountAction {
    /// Create an account and sign in
    SignUp {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long)]
        name: String,
    },
    /// Sign in to an existing account
    SignIn {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    SignOut,
    /// Show the signed-in account
    Whoami,
}

/// Run an account action.
///
/// # Errors
///
/// Returns `AppError::Auth` (wrapped) when the action is rejected or the
/// store fails, or an I/O error if writing to `out` fails.
pub fn run(
    storefront: &Storefront,
    action: &AccountAction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match action {
        AccountAction::SignUp {
            email,
            password,
            name,
        } => {
            let session = storefront.sign_up(email, password, name)?;
            writeln!(out, "Signed up as {} <{}>", session.name, session.email)?;
        }
        AccountAction::SignIn { email, password } => {
            let session = storefront.sign_in(email, password)?;
            writeln!(out, "Signed in as {} <{}>", session.name, session.email)?;
        }
        AccountAction::SignOut => {
            storefront.sign_out()?;
            writeln!(out, "Signed out")?;
        }
        AccountAction::Whoami => match storefront.account_view()? {
            AccountView::Profile { name, email } => writeln!(out, "{name} <{email}>")?,
            AccountView::SignIn => writeln!(out, "Not signed in")?,
        },
    }
    Ok(())
}
