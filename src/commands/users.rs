// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::auth::{LoginOutcome, RegistrationOutcome};
use crate::context::AppContext;
use crate::utils::non_empty;

pub async fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => register(ctx, sub).await?,
        Some(("login", sub)) => login(ctx, sub).await?,
        Some(("logout", _)) => {
            if ctx.session.is_logged_in() {
                ctx.session.end().await?;
                println!("Logged out");
            } else {
                println!("Not logged in");
            }
        }
        Some(("whoami", _)) => match ctx.session.email() {
            Some(email) => println!("{}", email),
            None => println!("Not logged in"),
        },
        _ => {}
    }
    Ok(())
}

/// Create the account. Logging in is a separate step.
async fn register(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let name = non_empty(sub.get_one::<String>("name").context("name is required")?, "name")?;
    let email = non_empty(sub.get_one::<String>("email").context("email is required")?, "email")?;
    let password = sub.get_one::<String>("password").context("password is required")?;

    match ctx.auth.register(&name, &email, password).await? {
        RegistrationOutcome::Registered(user) => {
            println!(
                "Registered {} <{}>; log in with `tally user login`",
                user.name, user.email
            );
        }
        RegistrationOutcome::EmailAlreadyExists => {
            println!("An account with {} already exists", email);
        }
    }
    Ok(())
}

async fn login(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").context("email is required")?;
    let password = sub.get_one::<String>("password").context("password is required")?;

    match ctx.auth.log_in(email.trim(), password).await? {
        LoginOutcome::Success(user) => {
            ctx.session.start(&user.email).await?;
            println!("Welcome back, {}", user.name);
        }
        LoginOutcome::InvalidCredentials => println!("Invalid email or password"),
    }
    Ok(())
}
