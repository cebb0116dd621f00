//! Basic usage example for name-registry.
//!
//! Demonstrates:
//! - Registering values through a registration wrapper
//! - Resolving them by parameter name with a resolution wrapper
//! - Explicit keyword arguments overriding the registry
//! - Duplicate names being rejected
//!
//! Run with: `cargo run --example basic_usage`

use name_registry::{define_registry, Args, InjectError};

// Create an isolated registry for this example
define_registry!(app);

#[derive(Debug)]
struct AppConfig {
    name: String,
    version: u32,
    debug_mode: bool,
}

struct Greeter {
    greeting: String,
}

fn main() -> Result<(), InjectError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("name_registry=info")),
        )
        .init();

    println!("=== name-registry: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Register values through wrappers
    // -------------------------------------------------------------------------
    println!("1. Registering injectables...");

    let config = app::injectable("config", |(name, version): (&'static str, u32)| AppConfig {
        name: name.to_string(),
        version,
        debug_mode: true,
    });
    config.call(("MyApp", 1))?;

    app::register_injectable("greeter", |g: &'static str| Greeter { greeting: g.to_string() }, "Hello")?;

    println!("   Registered: config, greeter");

    // -------------------------------------------------------------------------
    // 2. Resolve dependencies by parameter name
    // -------------------------------------------------------------------------
    println!("\n2. Resolving by parameter name...");

    let banner = app::inject(["config", "greeter", "user"], |args: Args| {
        let config = args.get::<AppConfig>("config")?;
        let greeter = args.get::<Greeter>("greeter")?;
        let user = args
            .optional::<String>("user")?
            .map(|u| u.to_string())
            .unwrap_or_else(|| "stranger".to_string());
        Ok(format!(
            "{}, {}! Welcome to {} v{} (debug: {})",
            greeter.greeting, user, config.name, config.version, config.debug_mode
        ))
    });

    println!("   {}", banner.call(Args::new())?);

    // -------------------------------------------------------------------------
    // 3. Explicit keywords win over the registry
    // -------------------------------------------------------------------------
    println!("\n3. Supplying a keyword explicitly...");

    println!("   {}", banner.call(Args::new().keyword("user", "Derp".to_string()))?);

    // -------------------------------------------------------------------------
    // 4. Duplicate names are rejected
    // -------------------------------------------------------------------------
    println!("\n4. Registering `config` again...");

    match config.call(("Other", 2)) {
        Ok(_) => println!("   Unexpectedly registered twice"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    println!("\n=== Registry contents ===");
    app::print_injectables();

    Ok(())
}
