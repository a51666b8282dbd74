// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Issue a signed bearer token for the users API.
//!
//! ```text
//! JWT_SECRET=... generate_token --subject reporting-job --ttl-hours 24
//! ```
//!
//! The token alone is printed to stdout; diagnostics go to stderr.

use chrono::Duration;
use clap::Parser;
use tracing::{error, info};

use users_api::{
    auth::{claims::DEFAULT_SUBJECT, TokenCodec},
    config::{LogFormat, Secret},
    logging,
};

#[derive(Debug, Parser)]
#[command(name = "generate_token", about = "Issue a signed bearer token for the users API")]
struct Args {
    /// Value of the token's `user` claim
    #[arg(long, env = "JWT_SUBJECT", default_value = DEFAULT_SUBJECT)]
    subject: String,

    /// Hours until the token expires
    #[arg(long, default_value_t = 72, value_parser = clap::value_parser!(i64).range(1..))]
    ttl_hours: i64,
}

fn main() {
    dotenvy::dotenv().ok();
    logging::init(LogFormat::Pretty);

    let args = Args::parse();

    let secret = match Secret::from_env() {
        Ok(secret) => secret,
        Err(e) => {
            error!(error = %e, "Cannot issue token");
            std::process::exit(1);
        }
    };

    let codec = TokenCodec::new(&secret).with_lifetime(Duration::hours(args.ttl_hours));
    match codec.issue(&args.subject) {
        Ok(token) => {
            info!(subject = %args.subject, ttl_hours = args.ttl_hours, "Token issued");
            println!("{token}");
        }
        Err(e) => {
            error!(error = %e, "Error generating token");
            std::process::exit(1);
        }
    }
}
