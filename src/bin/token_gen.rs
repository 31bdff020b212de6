use clap::Parser;
use todo_api::services::auth::TokenSigner;
use uuid::Uuid;

/// Mint an `x-auth-token` credential for local development.
///
/// Signs `{ id, iat, exp }` with HS256 using the same secret the API verifies
/// with, so a token can be produced without running the account service.
/// Prints the token on stdout.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Subject (user id) to embed. Default: random UUID v4.
    #[arg(long)]
    sub: Option<String>,

    /// HS256 secret. Falls back to $JWT_SECRET (also read from .env).
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    secret: String,

    /// Lifetime in seconds.
    #[arg(long, default_value_t = 3600)]
    ttl_seconds: u64,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let sub = args.sub.unwrap_or_else(|| Uuid::new_v4().to_string());
    if sub.trim().is_empty() {
        anyhow::bail!("--sub must not be blank");
    }

    let token = TokenSigner::new(args.secret.as_bytes(), args.ttl_seconds).sign(&sub)?;

    if args.quiet {
        println!("{token}");
    } else {
        println!("sub: {sub}");
        println!("expires_in: {}s", args.ttl_seconds);
        println!("x-auth-token: {token}");
    }

    Ok(())
}
