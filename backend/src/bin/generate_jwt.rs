//! Mint a local access token for exercising the protected endpoints

use anyhow::Context;
use clap::Parser;

use coffee_tasting::{security, Config};

#[derive(Parser, Debug)]
#[command(name = "generate-jwt", about = "Generate a Supabase-style access token for local testing")]
struct Args {
    /// Token subject
    user_id: String,

    email: String,

    #[arg(long, default_value = "authenticated")]
    role: String,

    /// Lifetime in hours, at most one year
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..=MAX_HOURS))]
    hours: i64,
}

const MAX_HOURS: i64 = 24 * 365;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let config = Config::load().context("failed to load configuration")?;

    let token = security::generate_access_token(
        config.jwt_secret(),
        &config.algorithm,
        &args.user_id,
        Some(&args.email),
        &args.role,
        chrono::Duration::hours(args.hours),
    )?;

    let claims = security::validate_access_token(&token, config.jwt_secret(), &config.algorithm)?;

    println!("Token:\n{}\n", token);
    println!("Authorization: Bearer {}\n", token);
    println!("Payload:\n{}", serde_json::to_string_pretty(&claims)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["generate-jwt", "user-1", "a@example.com"]).unwrap();
        assert_eq!(args.role, "authenticated");
        assert_eq!(args.hours, 1);
    }

    #[test]
    fn test_hours_out_of_range_rejected() {
        for hours in ["99999999999", "0", "-5", "8761"] {
            let result = Args::try_parse_from([
                "generate-jwt",
                "user-1",
                "a@example.com",
                "--hours",
                hours,
            ]);
            assert!(result.is_err(), "--hours {hours} accepted");
        }

        let args = Args::try_parse_from([
            "generate-jwt",
            "user-1",
            "a@example.com",
            "--hours",
            "8760",
        ])
        .unwrap();
        assert_eq!(args.hours, MAX_HOURS);
    }
}
