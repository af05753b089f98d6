use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use jsonwebtoken::{EncodingKey, Header};
use serde::Serialize;

/// Mint an HS256 access token for local testing of the protected routes.
///
/// The token carries `{id, email, provider, iat, exp}` and is signed with the
/// same shared secret the API verifies with (`JWT_SECRET`).
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    #[arg(long, default_value = "test-user-123")]
    id: String,

    #[arg(long, default_value = "test@example.com")]
    email: String,

    /// Identity provider name (google, microsoft, ...)
    #[arg(long, default_value = "google")]
    provider: String,

    /// Lifetime in seconds. Negative values produce an already expired token.
    #[arg(long, default_value_t = 24 * 60 * 60, allow_negative_numbers = true)]
    expires_in: i64,

    /// Signing secret; must match the server's JWT_SECRET.
    #[arg(long, env = "JWT_SECRET", default_value = "dev-secret-change-in-production")]
    secret: String,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Serialize)]
struct Claims<'a> {
    id: &'a str,
    email: &'a str,
    provider: &'a str,
    iat: i64,
    exp: i64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.secret.is_empty() {
        bail!("secret must not be empty");
    }

    let iat = Utc::now().timestamp();
    let claims = Claims {
        id: &args.id,
        email: &args.email,
        provider: &args.provider,
        iat,
        exp: iat + args.expires_in,
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(args.secret.as_bytes()),
    )
    .context("signing token")?;

    if args.quiet {
        println!("{token}");
        return Ok(());
    }

    println!("Access token:");
    println!("{token}");
    println!();
    println!("Payload: id={} email={} provider={}", args.id, args.email, args.provider);
    println!("Expires in: {}s", args.expires_in);
    println!();
    println!("Usage:");
    println!("  curl -H \"Authorization: Bearer {token}\" http://localhost:3001/api/v1/auth/me");

    Ok(())
}
