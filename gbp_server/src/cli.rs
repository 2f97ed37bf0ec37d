use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty. Returns true if help was printed.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Be explicit about which envars to print, so as to avoid accidentally exposing secrets
    const DISPLAY_ENVS: [&str; 10] = [
        "RUST_LOG",
        "GBP_HOST",
        "GBP_PORT",
        "GBP_DATABASE_URL",
        "GBP_PRICE_FEED_URL",
        "GBP_PRICE_FEED_TIMEOUT",
        "GBP_PRICE_REFRESH_INTERVAL",
        "GBP_CHAT_REPLY_DELAY_MS",
        "GBP_RUN_MIGRATIONS",
        "GBP_SEED_DATA",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    });
    let admin_key = if env::var("GBP_ADMIN_API_KEY").map(|k| !k.trim().is_empty()).unwrap_or(false) {
        "Set"
    } else {
        "Not set"
    };
    println!("  {:<35} {admin_key:<15}", "GBP_ADMIN_API_KEY");
}
