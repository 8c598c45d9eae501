use std::io::{self, BufRead, Write};

use anyhow::Context;
use hd_token_scan::wallet::parse_count;
use hd_token_scan::{ScanConfig, StateStore, Storage, WalletManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    // Set RUST_LOG=debug for per-attempt output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ScanConfig::from_env();
    let storage = Storage::new_with_path(config.state_file.clone());
    let mut input = io::stdin().lock();

    let start = prompt_choice(
        &mut input,
        "Choose:",
        &["Generate new seed phrase", "Import existing seed phrase"],
    )?;

    let mut manager = match start {
        Some(0) => {
            let (manager, info) = WalletManager::generate(config, storage)
                .context("Failed to generate wallet")?;
            println!("\n✅ Seed phrase generated");
            println!("Seed phrase:\n {}", info.mnemonic);
            println!("Account 1: {}", info.first_address);
            manager
        }
        Some(_) => {
            let phrase = prompt(&mut input, "Enter seed phrase (12 / 24 words):")?
                .context("No seed phrase given")?;
            let (manager, info) = WalletManager::import(config, storage, &phrase)
                .context("Failed to import wallet")?;
            println!("ℹ️  Found {} existing account(s)", info.prior_accounts);
            if let Some(first) = info.created_first {
                println!("Account 1: {}", first);
            }
            manager
        }
        None => return Ok(()),
    };

    loop {
        let action = prompt_choice(
            &mut input,
            "Menu:",
            &["Mass add accounts", "Scan token balances", "Exit"],
        )?;

        match action {
            Some(0) => mass_add(&mut input, &mut manager)?,
            Some(1) => {
                println!(
                    "\n🔍 Scanning {} balances of {} account(s)",
                    manager.config().token_symbol,
                    manager.state().len()
                );
                let report = manager.scan().await?;
                println!("{}", report);
            }
            _ => return Ok(()),
        }
    }
}

fn mass_add<S: StateStore>(
    input: &mut impl BufRead,
    manager: &mut WalletManager<S>,
) -> anyhow::Result<()> {
    let raw = prompt(input, "How many accounts to add? [1]")?.unwrap_or_default();
    let raw = if raw.trim().is_empty() { "1".to_string() } else { raw };

    let count = match parse_count(&raw) {
        Ok(count) => count,
        Err(e) => {
            println!("❌ {}", e);
            return Ok(());
        }
    };

    let outcome = manager.mass_add(count).context("Failed to add accounts")?;
    for (index, address) in &outcome.added {
        println!("Account {}: {}", index + 1, address);
    }
    println!("✅ {} account(s) added", outcome.added.len());
    println!("Total accounts: {}", outcome.total());
    Ok(())
}

/// Read one trimmed line; `None` on end of input
fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<Option<String>> {
    print!("{} ", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Numbered menu; returns the zero-based choice, `None` on end of input
fn prompt_choice(
    input: &mut impl BufRead,
    message: &str,
    choices: &[&str],
) -> io::Result<Option<usize>> {
    loop {
        println!("\n{}", message);
        for (i, choice) in choices.iter().enumerate() {
            println!("  {}. {}", i + 1, choice);
        }

        let Some(answer) = prompt(input, ">")? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(n) if (1..=choices.len()).contains(&n) => return Ok(Some(n - 1)),
            _ => println!("Please enter a number between 1 and {}", choices.len()),
        }
    }
}
