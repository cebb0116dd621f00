//! Method injection example for name-registry.
//!
//! Demonstrates:
//! - Wrapping a method whose first parameter is the receiver (`self`)
//! - Wrapping a function with its own error type via `Inject::new`
//! - Registering a value under its type's snake_case name
//!
//! Run with: `cargo run --example method_injection`

use name_registry::{define_registry, Args, Inject, InjectError, RegistryApi, RECEIVER};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

define_registry!(bank);

#[derive(Debug, thiserror::Error)]
enum BankError {
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u64, requested: u64 },

    #[error(transparent)]
    Inject(#[from] InjectError),
}

/// Exchange rates, registered as `rate_table`.
struct RateTable {
    eur_per_usd: f64,
}

struct Account {
    owner: String,
    cents: AtomicU64,
}

impl Account {
    /// `withdraw(self, amount, rate_table)` with `rate_table` injected.
    fn withdraw() -> Inject<u64, BankError> {
        Inject::new(
            bank::registry(),
            [RECEIVER, "amount", "rate_table"],
            |args: Args| {
                let me = args.receiver::<Account>()?;
                let amount = *args.get::<u64>("amount")?;
                let rates = args.get::<RateTable>("rate_table")?;

                let balance = me.cents.load(Ordering::SeqCst);
                if amount > balance {
                    return Err(BankError::InsufficientFunds {
                        balance,
                        requested: amount,
                    });
                }
                me.cents.fetch_sub(amount, Ordering::SeqCst);

                let eur = amount as f64 / 100.0 * rates.eur_per_usd;
                println!("   {} withdrew {} cents (~{:.2} EUR)", me.owner, amount, eur);
                Ok(balance - amount)
            },
        )
    }
}

fn main() -> Result<(), BankError> {
    println!("=== name-registry: Method Injection ===\n");

    println!("1. Registering the rate table under its type name...");
    bank::API.register_injectable_from_type(|rate: f64| RateTable { eur_per_usd: rate }, 0.92)?;
    println!("   Registered: {:?}", bank::registry().names());

    let account = Arc::new(Account {
        owner: "alice".to_string(),
        cents: AtomicU64::new(10_000),
    });
    let withdraw = Account::withdraw();

    println!("\n2. Calling the method with its receiver...");
    let left = withdraw.call(
        Args::new()
            .receiver_arc(Arc::clone(&account))
            .keyword("amount", 2_500u64),
    )?;
    println!("   Balance left: {} cents", left);

    println!("\n3. Errors of the wrapped function pass through unchanged...");
    match withdraw.call(
        Args::new()
            .receiver_arc(Arc::clone(&account))
            .keyword("amount", 1_000_000u64),
    ) {
        Ok(_) => println!("   Unexpected success"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    println!("\n4. Only the receiver may be positional...");
    match withdraw.call(
        Args::new()
            .receiver_arc(account)
            .positional(name_registry::Instance::new(5u64)),
    ) {
        Ok(_) => println!("   Unexpected success"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
