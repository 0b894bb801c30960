use alloy::primitives::TxHash;
use chrono::Local;
use colored::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `fallback_level` (e.g. from `LOG_LEVEL`) is used.
pub fn init_tracing(fallback_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub struct Logger;

impl Logger {
    fn get_logs_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("logs")
    }

    fn get_log_file_name() -> PathBuf {
        let date = Local::now().format("%Y-%m-%d").to_string();
        Self::get_logs_dir().join(format!("workflow-{}.log", date))
    }

    pub(crate) fn write_to_file(message: &str) {
        let _ = (|| -> std::io::Result<()> {
            fs::create_dir_all(Self::get_logs_dir())?;
            let log_entry = format!("[{}] {}\n", Local::now().to_rfc3339(), message);

            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(Self::get_log_file_name())?;
            file.write_all(log_entry.as_bytes())
        })();
    }

    pub fn format_address(address: &str) -> String {
        if address.len() >= 10 {
            format!("{}...{}", &address[..6], &address[address.len() - 4..])
        } else {
            address.to_string()
        }
    }

    pub fn mask_address(address: &str) -> String {
        if address.len() >= 10 {
            format!("{}****{}", &address[..6], &address[address.len() - 4..])
        } else {
            address.to_string()
        }
    }

    pub fn header(title: &str) {
        println!("\n{}", "━".repeat(70).cyan());
        println!("{}", format!("  {}", title).cyan().bold());
        println!("{}\n", "━".repeat(70).cyan());
        Self::write_to_file(&format!("HEADER: {}", title));
    }

    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
        Self::write_to_file(&format!("INFO: {}", message));
    }

    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
        Self::write_to_file(&format!("SUCCESS: {}", message));
    }

    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
        Self::write_to_file(&format!("WARNING: {}", message));
    }

    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
        Self::write_to_file(&format!("ERROR: {}", message));
    }

    pub fn separator() {
        println!("{}", "─".repeat(70).bright_black());
    }

    pub fn transaction_sent(label: &str, hash: &TxHash) {
        println!("{} {}", "→".cyan(), format!("Transaction Sent: {:#x}", hash).bright_black());
        Self::write_to_file(&format!("TX SENT: {} | {:#x}", label, hash));
    }

    pub fn transaction_confirmed(label: &str, url: &str) {
        let capitalized = label
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>() + &label[c.len_utf8()..])
            .unwrap_or_default();
        println!(
            "{} {} {}",
            "✓".green(),
            format!("{} Transaction Confirmed!", capitalized).green().bold(),
            url.blue().underline()
        );
        Self::write_to_file(&format!("TX CONFIRMED: {} | {}", label, url));
    }

    pub fn step(index: usize, total: usize, name: &str) {
        println!(
            "\n{} {}",
            format!("[{}/{}]", index, total).bright_black(),
            name.white().bold()
        );
        Self::write_to_file(&format!("STEP {}/{}: {}", index, total, name));
    }

    /// Writes a single machine-readable line to the log file only.
    pub fn record(kind: &str, json: &serde_json::Value) {
        Self::write_to_file(&format!("{}: {}", kind, json));
    }

    pub fn startup(wallet: &str, network: &str, amount: &str) {
        println!("{}", "━".repeat(70).cyan());
        println!("{}", "  🔄 SWAP & SUPPLY".cyan().bold());
        println!("{}", "━".repeat(70).cyan());
        println!("{}", format!("   Network: {}", network).bright_black());
        println!("{}", format!("   Wallet:  {}", Self::mask_address(wallet)).bright_black());
        println!("{}\n", format!("   Amount:  {}", amount).bright_black());
        Self::write_to_file(&format!(
            "STARTUP: network={} wallet={} amount={}",
            network,
            Self::mask_address(wallet),
            amount
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_shortened() {
        let addr = "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238";
        assert_eq!(Logger::format_address(addr), "0x1c7D...7238");
        assert_eq!(Logger::mask_address(addr), "0x1c7D****7238");
        assert_eq!(Logger::format_address("0x12"), "0x12");
    }
}
