use anyhow::Result;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

use super::{parse_amount, print_receipt};
use crate::bank::Bank;
use crate::budget::TemplateCatalog;
use crate::error::{recoverable, FinanceError};
use crate::models::{NewUser, User};
use crate::report::{self, TrendPoint};
use crate::store::AccountStore;
use crate::validate;

type Plotter = fn(&[TrendPoint]) -> Result<()>;

enum Flow {
    Continue,
    Quit,
}

/// Start the numbered menu on stdin/stdout.
pub(crate) fn as_menu<S: AccountStore>(bank: &mut Bank<S>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(bank, stdin.lock(), stdout.lock(), crate::ui::trend::render_trend).run()
}

pub(crate) struct Menu<'a, S, R, W> {
    bank: &'a mut Bank<S>,
    input: R,
    out: W,
    plot: Plotter,
}

impl<'a, S: AccountStore, R: BufRead, W: Write> Menu<'a, S, R, W> {
    pub(crate) fn new(bank: &'a mut Bank<S>, input: R, out: W, plot: Plotter) -> Self {
        Self {
            bank,
            input,
            out,
            plot,
        }
    }

    pub(crate) fn run(&mut self) -> Result<()> {
        writeln!(self.out, "Welcome to Alcancía, your savings manager\n")?;
        loop {
            self.print_options()?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };

            let outcome = match choice.as_str() {
                "1" => self.register(),
                "2" => self.login_and_deposit(),
                "3" if self.bank.keeps_ledger() => self.statistics(),
                "4" => self.list_templates().map(|_| Flow::Continue),
                "5" => {
                    writeln!(self.out, "Exiting. Goodbye!")?;
                    break;
                }
                _ => {
                    writeln!(self.out, "[Error] Invalid option. Try again.\n")?;
                    Ok(Flow::Continue)
                }
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => match recoverable(&e) {
                    Some(err) => writeln!(self.out, "[Error] {err}\n")?,
                    None => return Err(e),
                },
            }
        }
        Ok(())
    }

    fn print_options(&mut self) -> Result<()> {
        writeln!(self.out, "1. Register user")?;
        writeln!(self.out, "2. Log in and deposit")?;
        if self.bank.keeps_ledger() {
            writeln!(self.out, "3. View statistics")?;
        }
        writeln!(self.out, "4. List budget templates")?;
        writeln!(self.out, "5. Exit")?;
        Ok(())
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until `parse` accepts the answer, printing each rejection.
    fn prompt_until<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.out, "[Error] {e}")?,
            }
        }
    }

    fn register(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt_until("Name: ", |s| Ok(validate::name(s)?))? else {
            return Ok(Flow::Quit);
        };
        let Some(email) = self.prompt_until("Email: ", |s| Ok(validate::email(s)?))? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = self.prompt_until("Password: ", |s| {
            validate::password(s)?;
            Ok(s.to_string())
        })?
        else {
            return Ok(Flow::Quit);
        };
        let Some(balance) = self.prompt_until("Initial balance: ", |s| {
            let amount = parse_amount(s)?;
            if amount < Decimal::ZERO {
                return Err(FinanceError::InvalidAmount(amount).into());
            }
            Ok(amount)
        })?
        else {
            return Ok(Flow::Quit);
        };

        let new_user = NewUser::new(&name, &email, &password, balance)?;
        let user = self.bank.register(&new_user)?;
        writeln!(self.out, "\n[Login] User {} registered successfully.\n", user.name)?;
        Ok(Flow::Continue)
    }

    fn login(&mut self) -> Result<Option<User>> {
        let Some(email) = self.prompt("\nEmail: ")? else {
            return Ok(None);
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(None);
        };
        let user = self.bank.login(&email, &password)?;
        writeln!(self.out, "[Login] Welcome {}!\n", user.name)?;
        Ok(Some(user))
    }

    fn login_and_deposit(&mut self) -> Result<Flow> {
        let Some(user) = self.login()? else {
            return Ok(Flow::Quit);
        };

        let Some(amount) = self.prompt_until("Deposit amount: ", |s| {
            let amount = parse_amount(s)?;
            if amount <= Decimal::ZERO {
                return Err(FinanceError::InvalidAmount(amount).into());
            }
            Ok(amount)
        })?
        else {
            return Ok(Flow::Quit);
        };

        self.list_templates()?;
        let catalog: TemplateCatalog = self.bank.catalog().clone();
        let label = format!("Choose a template (1-{}): ", catalog.len());
        let Some(index) = self.prompt_until(&label, |s| Ok(catalog.parse_index(s)?))?
        else {
            return Ok(Flow::Quit);
        };

        let receipt = self.bank.deposit(user.id, amount, index)?;
        print_receipt(&receipt, &mut self.out)?;
        writeln!(self.out)?;
        Ok(Flow::Continue)
    }

    fn statistics(&mut self) -> Result<Flow> {
        let Some(user) = self.login()? else {
            return Ok(Flow::Quit);
        };
        writeln!(self.out, "Generating statistics...")?;
        let rows = self.bank.monthly_report(user.id)?;
        report::render_report(&rows, &mut self.out)?;
        writeln!(self.out)?;
        (self.plot)(&self.bank.trend(user.id)?)?;
        Ok(Flow::Continue)
    }

    fn list_templates(&mut self) -> Result<()> {
        writeln!(self.out, "Budget templates:")?;
        for (index, template) in self.bank.catalog().iter() {
            writeln!(self.out, "  {index}. {template}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "menu_tests.rs"]
mod tests;
