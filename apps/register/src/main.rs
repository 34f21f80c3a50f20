//! # scanlane
//!
//! Command-line register for ScanLane POS.
//!
//! ```text
//! scanlane [-v...] [--config register.toml] <COMMAND>
//!
//!   scan <file>               decode a scan file and print the cart
//!   checkout <file> [--json]  decode, check out, print the receipt
//!   encode <code>...          print the 95-module symbol of each code
//!   classify <file>           print the kind of each numeric code
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use scanlane_core::{CartTotals, ScanReport};
use scanlane_register::{
    classify_file, encode_codes, init_tracing, PosSession, Receipt, RegisterConfig,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "scanlane", version, about = "UPC-A scan batches, cart assembly and checkout")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML file with [data] and [output] paths
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Process a scan file and print the cart summary
    Scan {
        /// Newline-delimited 95-module bit strings
        file: PathBuf,
    },

    /// Process a scan file, check out and print the receipt
    Checkout {
        file: PathBuf,

        /// Print the receipt as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the 95-module symbol for each 12-digit code
    Encode {
        #[arg(required = true)]
        codes: Vec<String>,
    },

    /// Print the kind of each numeric code in a file
    Classify { file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan { file } => {
            let mut session = open_session(cli.config)?;
            let report = session.process_scan_file(&file)?;
            print_report(&report);
            print_totals(&session.totals());
        }
        Command::Checkout { file, json } => {
            let mut session = open_session(cli.config)?;
            let report = session.process_scan_file(&file)?;
            let receipt = session.checkout()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            } else {
                print_report(&report);
                print_receipt(&receipt);
            }
        }
        Command::Encode { codes } => {
            for symbol in encode_codes(&codes)? {
                println!("{symbol}");
            }
        }
        Command::Classify { file } => {
            for line in classify_file(&file)? {
                match line.kind {
                    Ok(Some(kind)) => println!("{}\t{kind}", line.code),
                    Ok(None) => println!("{}\tunclassified", line.code),
                    Err(e) => println!("{}\terror: {e}", line.code),
                }
            }
        }
    }
    Ok(())
}

fn open_session(config_path: Option<PathBuf>) -> anyhow::Result<PosSession> {
    let config = RegisterConfig::load(config_path.as_deref()).context("loading configuration")?;
    info!(inventory = %config.data.inventory.display(), "Opening stores");
    let session = PosSession::open(config).context("opening stores")?;
    Ok(session)
}

fn print_report(report: &ScanReport) {
    println!(
        "Scanned {} lines: {} accepted ({} reversed), {} dropped, {} skipped",
        report.scanned,
        report.accepted,
        report.reversed,
        report.dropped.len(),
        report.skipped()
    );
    for dropped in &report.dropped {
        println!("  line {}: {}", dropped.line, dropped.reason);
    }
}

fn print_totals(totals: &CartTotals) {
    println!("Items:               {}", totals.item_count);
    println!("Coupons:             {}", totals.coupon_count);
    println!(
        "Member:              {}",
        totals.member.as_deref().unwrap_or("-")
    );
    println!("Subtotal:            {:.2}", totals.subtotal);
    println!("Coupon discount:     {:.2}", totals.coupon_discount);
    println!("Membership discount: {:.2}", totals.membership_discount);
    println!("Total:               {:.3}", totals.total);
}

fn print_receipt(receipt: &Receipt) {
    println!("Receipt {}", receipt.id);
    println!("Issued  {}", receipt.issued_at.to_rfc3339());
    for item in &receipt.items {
        println!("  {item}");
    }
    println!("Subtotal:            {:.2}", receipt.subtotal);
    println!("Coupon discount:     {:.2}", receipt.coupon_discount);
    println!("Membership discount: {:.3}", receipt.membership_discount);
    println!("Total:               {:.3}", receipt.total);
    if let Some(member) = &receipt.member {
        println!("Points earned by {member}: {:.2}", receipt.points_earned);
    }
}
