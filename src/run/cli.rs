use anyhow::Result;
use rust_decimal::Decimal;
use std::io::{self, Write};

use super::{parse_amount, print_receipt};
use crate::bank::Bank;
use crate::models::NewUser;
use crate::report;
use crate::store::AccountStore;
use crate::ui::util::format_amount;

pub(crate) fn as_cli<S: AccountStore>(args: &[String], bank: &mut Bank<S>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let Some(command) = args.first() else {
        print_usage(&mut out)?;
        return Ok(());
    };
    match command.as_str() {
        "register" => cli_register(&args[1..], bank, &mut out),
        "deposit" => cli_deposit(&args[1..], bank, &mut out),
        "stats" => cli_stats(&args[1..], bank, &mut out),
        "templates" => cli_templates(bank, &mut out),
        "--help" | "-h" | "help" => print_usage(&mut out),
        "--version" | "-V" | "version" => {
            writeln!(out, "alcancia {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(&mut out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Alcancía — split every deposit into a savings plan")?;
    writeln!(out)?;
    writeln!(out, "Usage: alcancia [--db <path> | --memory] [command]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  (none)                                    Start the interactive menu")?;
    writeln!(out, "  register <name> <email> <password> [initial-balance]")?;
    writeln!(out, "                                            Register a user")?;
    writeln!(out, "  deposit <email> <password> <amount>       Deposit and show the suggested split")?;
    writeln!(out, "    --template <n>                          Budget template (default: 1)")?;
    writeln!(out, "  stats <email> <password>                  Print monthly deposit totals")?;
    writeln!(out, "    --plot                                  Also draw the savings trend")?;
    writeln!(out, "  templates                                 List budget templates")?;
    writeln!(out, "  --help, -h                                Show this help")?;
    writeln!(out, "  --version, -V                             Show version")?;
    writeln!(out)?;
    writeln!(out, "The database path can also be set with ALCANCIA_DB_PATH.")?;
    Ok(())
}

/// Positional arguments, skipping `--flag value` pairs and bare switches.
fn positionals<'a>(args: &'a [String], valued_flags: &[&str]) -> Vec<&'a str> {
    let mut result = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if valued_flags.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            result.push(arg.as_str());
        }
    }
    result
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn cli_register<S: AccountStore>(
    args: &[String],
    bank: &mut Bank<S>,
    out: &mut impl Write,
) -> Result<()> {
    let pos = positionals(args, &[]);
    let [name, email, password, rest @ ..] = pos.as_slice() else {
        anyhow::bail!("Usage: alcancia register <name> <email> <password> [initial-balance]");
    };
    let balance = match rest.first() {
        Some(raw) => parse_amount(raw)?,
        None => Decimal::ZERO,
    };

    let user = bank.register(&NewUser::new(name, email, password, balance)?)?;
    writeln!(
        out,
        "[Login] User {} registered successfully with balance {}.",
        user.name,
        format_amount(user.balance)
    )?;
    Ok(())
}

fn cli_deposit<S: AccountStore>(
    args: &[String],
    bank: &mut Bank<S>,
    out: &mut impl Write,
) -> Result<()> {
    let pos = positionals(args, &["--template"]);
    let [email, password, amount] = pos.as_slice() else {
        anyhow::bail!("Usage: alcancia deposit <email> <password> <amount> [--template <n>]");
    };
    let template = match flag_value(args, "--template") {
        Some(raw) => bank.catalog().parse_index(raw)?,
        None => 1,
    };
    let amount = parse_amount(amount)?;

    let user = bank.login(email, password)?;
    let receipt = bank.deposit(user.id, amount, template)?;
    print_receipt(&receipt, out)
}

fn cli_stats<S: AccountStore>(args: &[String], bank: &Bank<S>, out: &mut impl Write) -> Result<()> {
    if !bank.keeps_ledger() {
        anyhow::bail!("Statistics need the SQLite store (drop --memory)");
    }
    let pos = positionals(args, &[]);
    let [email, password] = pos.as_slice() else {
        anyhow::bail!("Usage: alcancia stats <email> <password> [--plot]");
    };

    let user = bank.login(email, password)?;
    let rows = bank.monthly_report(user.id)?;
    let deposits = bank.transactions(user.id)?.len();

    writeln!(out, "Alcancía — {}", user.name)?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Balance:   {}", format_amount(bank.balance(user.id)?))?;
    writeln!(out, "  Deposits:  {deposits}")?;
    writeln!(out, "  Since:     {}", member_since(&user.created_at))?;
    writeln!(out)?;
    report::render_report(&rows, out)?;

    if args.iter().any(|a| a == "--plot") {
        out.flush()?;
        crate::ui::trend::render_trend(&bank.trend(user.id)?)?;
    }
    Ok(())
}

/// Date part of an RFC 3339 timestamp.
fn member_since(created_at: &str) -> &str {
    created_at.get(..10).unwrap_or(created_at)
}

fn cli_templates<S: AccountStore>(bank: &Bank<S>, out: &mut impl Write) -> Result<()> {
    for (index, template) in bank.catalog().iter() {
        writeln!(out, "{index}. {template}")?;
    }
    Ok(())
}
