//! Trait contracts example for name-registry.
//!
//! Demonstrates the **contract-based dependency injection** pattern:
//! - Define traits (contracts) that specify behavior
//! - Declare the contracts a registered value answers to with `with_capability`
//! - Resolve them as `Arc<dyn Trait>` by name, or discover them all by type
//! - Swap implementations after clearing the registry
//!
//! Run with: `cargo run --example trait_contracts`

use name_registry::{define_registry, Args, Inject, InjectError};
use std::sync::Arc;

// Create an isolated registry for this example
define_registry!(services);

// =============================================================================
// Contract Definitions (Traits)
// =============================================================================

/// Contract for a logging service.
trait Logger: Send + Sync {
    fn log(&self, message: &str);
    fn name(&self) -> &str;
}

/// Contract for a notification service.
trait Notifier: Send + Sync {
    fn notify(&self, recipient: &str, message: &str);
    fn service_type(&self) -> &str;
}

// =============================================================================
// Concrete Implementations
// =============================================================================

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        println!("[CONSOLE] {}", message);
    }

    fn name(&self) -> &str {
        "ConsoleLogger"
    }
}

/// File-based logger implementation (simulated).
struct FileLogger {
    path: String,
}

impl Logger for FileLogger {
    fn log(&self, message: &str) {
        println!("[FILE:{}] {}", self.path, message);
    }

    fn name(&self) -> &str {
        "FileLogger"
    }
}

struct EmailNotifier {
    smtp_server: String,
}

impl Notifier for EmailNotifier {
    fn notify(&self, recipient: &str, message: &str) {
        println!(
            "[EMAIL via {}] To: {} - {}",
            self.smtp_server, recipient, message
        );
    }

    fn service_type(&self) -> &str {
        "Email"
    }
}

/// Logs and notifies at once, so it answers to both contracts.
struct AuditTrail;

impl Logger for AuditTrail {
    fn log(&self, message: &str) {
        println!("[AUDIT] {}", message);
    }

    fn name(&self) -> &str {
        "AuditTrail"
    }
}

impl Notifier for AuditTrail {
    fn notify(&self, recipient: &str, message: &str) {
        println!("[AUDIT] notified {}: {}", recipient, message);
    }

    fn service_type(&self) -> &str {
        "Audit"
    }
}

// =============================================================================
// Application Code (Uses Contracts, Not Implementations)
// =============================================================================

/// Business logic that depends on the `logger` and `notifier` names.
fn process_order() -> Inject<()> {
    services::inject(["order_id", "logger", "notifier"], |args: Args| {
        let order_id = *args.get::<u32>("order_id")?;
        let logger = args.get::<dyn Logger>("logger")?;
        let notifier = args.get::<dyn Notifier>("notifier")?;

        logger.log(&format!("Processing order #{}", order_id));
        logger.log("Order confirmed!");
        notifier.notify("customer@example.com", &format!("Order #{} confirmed!", order_id));
        Ok(())
    })
}

fn register_console_and_email() -> Result<(), InjectError> {
    services::injectable("logger", |()| ConsoleLogger)
        .with_capability(|l| l as Arc<dyn Logger>)
        .create()?;
    services::injectable("notifier", |smtp: &'static str| EmailNotifier {
        smtp_server: smtp.to_string(),
    })
    .with_capability(|n| n as Arc<dyn Notifier>)
    .call("smtp.example.com")?;
    Ok(())
}

fn main() -> Result<(), InjectError> {
    println!("=== name-registry: Trait Contracts ===\n");

    // -------------------------------------------------------------------------
    // 1. Register initial implementations
    // -------------------------------------------------------------------------
    println!("1. Registering initial implementations...");
    register_console_and_email()?;
    println!("   logger: ConsoleLogger, notifier: EmailNotifier");

    // -------------------------------------------------------------------------
    // 2. Use the contracts (business logic is decoupled)
    // -------------------------------------------------------------------------
    println!("\n2. Processing order with initial implementations...\n");
    let process = process_order();
    process.call(Args::new().keyword("order_id", 1001u32))?;

    // -------------------------------------------------------------------------
    // 3. Swap implementations
    // -------------------------------------------------------------------------
    println!("\n3. Swapping to different implementations...");

    // Names are bound once; clear before rebinding.
    services::injection_clear_cache();
    services::injectable("logger", |path: &'static str| FileLogger {
        path: path.to_string(),
    })
    .with_capability(|l| l as Arc<dyn Logger>)
    .call("/var/log/app.log")?;
    services::injectable("notifier", |()| AuditTrail)
        .with_capability(|a| a as Arc<dyn Logger>)
        .with_capability(|a| a as Arc<dyn Notifier>)
        .create()?;

    println!("\n4. Processing another order with new implementations...\n");
    process.call(Args::new().keyword("order_id", 1002u32))?;

    // -------------------------------------------------------------------------
    // 5. Discover every implementation of a contract
    // -------------------------------------------------------------------------
    println!("\n5. Every registered Logger:");
    for (name, logger) in services::injectables_by_type_keyed::<dyn Logger>() {
        println!("   {} -> {}", name, logger.name());
    }

    println!("\n   Every registered Notifier:");
    for notifier in services::injectables_by_type::<dyn Notifier>() {
        println!("   {}", notifier.service_type());
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
