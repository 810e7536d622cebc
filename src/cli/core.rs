//! Core CLI dispatch, view rendering, and ledger actions.

use std::io;

use chrono::Local;
use dialoguer::theme::ColorfulTheme;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigManager, ViewTab},
    core::{
        errors::LedgerError,
        services::{SummaryService, ViewService},
        LedgerStore,
    },
    domain::{
        format_amount, Category, Displayable, Identifiable, RawTransactionInput, TransactionKind,
        DATE_FORMAT,
    },
    storage::JsonStorage,
};

pub use crate::core::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};
use super::ui::{
    chart,
    table::{Table, TableColumn},
};

pub(crate) const ADD_USAGE: &str =
    "usage: add <description> <amount> <category> <Income|Expense> <YYYY-MM-DD>";
pub(crate) const DELETE_USAGE: &str = "usage: delete <row|id>";

/// Row arguments are short numbers; anything longer is taken as an id prefix.
const MAX_ROW_DIGITS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl ShellContext {
    /// Builds a context backed by the on-disk store and configuration.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain_mode: mode == CliMode::Script,
        });

        let config_manager = ConfigManager::new()?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                cli_io::print_warning(format!("{err}; using default settings"));
                Config::default()
            }
        };

        let storage = JsonStorage::new_default()?;
        let (store, metadata) =
            LedgerStore::open_with_key(Box::new(storage), config.storage_key.clone());
        for warning in &metadata.warnings {
            cli_io::print_warning(warning);
        }

        Ok(Self::with_store(mode, store, config, Some(config_manager)))
    }

    pub fn with_store(
        mode: CliMode,
        store: LedgerStore,
        config: Config,
        config_manager: Option<ConfigManager>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let mut context = ShellContext {
            mode,
            registry,
            store,
            theme: ColorfulTheme::default(),
            filter: config.default_filter,
            view: config.default_view,
            config,
            config_manager,
            listed_ids: Vec::new(),
            last_command: None,
            running: true,
        };
        context.refresh_listed_ids();
        context
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Names and aliases, for tab completion.
    pub fn command_words(&self) -> Vec<&'static str> {
        self.registry.words()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        format!("expense [{} | {}]> ", self.view, self.filter)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        match self.registry.suggest(input) {
            Some(name) => cli_io::print_warning(format!(
                "Unknown command `{}`. Did you mean `{}`?",
                input, name
            )),
            None => cli_io::print_warning(format!(
                "Unknown command `{}`. Type `help` to see available commands.",
                input
            )),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Io(err) => Err(CliError::Io(err)),
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        cli_io::confirm_action(&self.theme, "Exit the expense shell?", true).or(Ok(true))
    }

    fn money(&self, amount: f64) -> String {
        let currency = self.config.currency.trim();
        if currency.is_empty() {
            format_amount(amount)
        } else {
            format!("{} {}", format_amount(amount), currency)
        }
    }

    fn refresh_listed_ids(&mut self) {
        self.listed_ids = ViewService::display_order(self.store.transactions(), self.filter)
            .into_iter()
            .map(|txn| txn.id())
            .collect();
    }

    /// Filtered, date-ordered table followed by the overall balance.
    pub fn render_list(&mut self) -> String {
        let rows = ViewService::rows(self.store.transactions(), self.filter, &self.config.currency);
        self.listed_ids = rows.iter().map(|row| row.id).collect();

        let mut out = if rows.is_empty() {
            "No transactions to show.".to_string()
        } else {
            let mut table = Table::new(vec![
                TableColumn::right("#"),
                TableColumn::left("Date"),
                TableColumn::left("Description").max_width(32),
                TableColumn::left("Category"),
                TableColumn::right("Amount"),
                TableColumn::left("Id"),
            ]);
            for (idx, row) in rows.iter().enumerate() {
                table.push_row(vec![
                    (idx + 1).to_string(),
                    row.date.format(DATE_FORMAT).to_string(),
                    row.description.clone(),
                    row.category.to_string(),
                    row.signed_amount.clone(),
                    short_id(row.id),
                ]);
            }
            table.render()
        };
        let balance = SummaryService::net_balance(self.store.transactions());
        out.push_str(&format!("\nBalance: {}", self.money(balance)));
        out
    }

    pub fn render_chart(&self) -> String {
        let totals = SummaryService::expense_breakdown(self.store.transactions());
        if totals.total() == 0.0 {
            return "No expenses recorded yet.".to_string();
        }
        chart::render_breakdown(&totals, self.config.currency.trim())
    }

    pub fn render_stats(&self) -> String {
        let stats = SummaryService::summary_statistics(self.store.transactions());
        [
            ("Total income", self.money(stats.total_income)),
            ("Total expenses", self.money(stats.total_expenses)),
            ("Net balance", self.money(stats.net_balance)),
            ("Transactions", stats.count.to_string()),
        ]
        .iter()
        .map(|(label, value)| format!("{:<15} {}", label, value))
        .collect::<Vec<_>>()
        .join("\n")
    }

    pub fn show_view(&mut self, view: ViewTab) {
        self.view = view;
        match view {
            ViewTab::List => {
                output::section(format!("Transactions ({})", self.filter));
                let body = self.render_list();
                cli_io::print_info(body);
            }
            ViewTab::Chart => {
                output::section("Expenses by category");
                cli_io::print_info(self.render_chart());
            }
            ViewTab::Stats => {
                output::section("Statistics");
                cli_io::print_info(self.render_stats());
            }
        }
    }

    pub fn show_current(&mut self) {
        self.show_view(self.view);
    }

    pub(crate) fn add_transaction(&mut self, args: &[&str]) -> CommandResult {
        let input = match args {
            [description, amount, category, kind, date] => {
                RawTransactionInput::new(*description, *amount, *category, *kind, *date)
            }
            [] if self.mode() == CliMode::Interactive => match self.transaction_wizard()? {
                Some(input) => input,
                None => {
                    cli_io::print_info("Add cancelled.");
                    return Ok(());
                }
            },
            _ => return Err(CommandError::InvalidArguments(ADD_USAGE.into())),
        };

        self.store.submit(&input)?;
        let label = self
            .store
            .transactions()
            .last()
            .map(|txn| txn.display_label())
            .unwrap_or_default();
        cli_io::print_success(format!("Added {label}"));
        self.refresh_listed_ids();
        self.show_current();
        Ok(())
    }

    pub(crate) fn delete_transaction(&mut self, args: &[&str]) -> CommandResult {
        let id = match args.first() {
            Some(target) => self.resolve_target(target)?,
            None if self.mode() == CliMode::Interactive => match self.select_listed()? {
                Some(id) => id,
                None => {
                    cli_io::print_info("Delete cancelled.");
                    return Ok(());
                }
            },
            None => return Err(CommandError::InvalidArguments(DELETE_USAGE.into())),
        };

        let label = self
            .store
            .find(id)
            .map(|txn| txn.display_label())
            .ok_or(LedgerError::TransactionNotFound(id))?;
        if self.mode() == CliMode::Interactive
            && !cli_io::confirm_action(&self.theme, &format!("Delete `{label}`?"), false)?
        {
            cli_io::print_info("Delete cancelled.");
            return Ok(());
        }

        self.store.remove(id)?;
        cli_io::print_success(format!("Deleted {label}"));
        self.refresh_listed_ids();
        self.show_current();
        Ok(())
    }

    /// Maps a row number from the last list, or an id prefix, to an id.
    pub(crate) fn resolve_target(&self, target: &str) -> Result<Uuid, CommandError> {
        let trimmed = target.trim();
        if trimmed.len() <= MAX_ROW_DIGITS {
            if let Ok(row) = trimmed.parse::<usize>() {
                return row
                    .checked_sub(1)
                    .and_then(|idx| self.listed_ids.get(idx))
                    .copied()
                    .ok_or_else(|| {
                        CommandError::InvalidArguments(format!(
                            "no row {} in the current list ({} shown)",
                            row,
                            self.listed_ids.len()
                        ))
                    });
            }
        }
        Ok(self.store.find_by_prefix(trimmed)?.id())
    }

    fn select_listed(&self) -> Result<Option<Uuid>, CommandError> {
        if self.listed_ids.is_empty() {
            cli_io::print_info("No transactions to delete.");
            return Ok(None);
        }
        let labels: Vec<String> = self
            .listed_ids
            .iter()
            .filter_map(|id| self.store.find(*id))
            .map(|txn| txn.display_label())
            .collect();
        let selection = cli_io::prompt_select(&self.theme, "Delete which transaction?", &labels)?;
        Ok(selection.and_then(|idx| self.listed_ids.get(idx).copied()))
    }

    fn transaction_wizard(&self) -> Result<Option<RawTransactionInput>, CommandError> {
        let description = cli_io::prompt_text(&self.theme, "Description", None)?;
        let amount = cli_io::prompt_text(&self.theme, "Amount", None)?;
        let Some(category_idx) = cli_io::prompt_select(&self.theme, "Category", &Category::ALL)?
        else {
            return Ok(None);
        };
        let kinds = [TransactionKind::Expense, TransactionKind::Income];
        let Some(kind_idx) = cli_io::prompt_select(&self.theme, "Type", &kinds)? else {
            return Ok(None);
        };
        let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
        let date = cli_io::prompt_text(&self.theme, "Date (YYYY-MM-DD)", Some(&today))?;
        Ok(Some(RawTransactionInput::new(
            description,
            amount,
            Category::ALL[category_idx].as_str(),
            kinds[kind_idx].as_str(),
            date,
        )))
    }

    /// Validates, persists, and applies one configuration change.
    pub(crate) fn update_config(&mut self, key: &str, value: &str) -> CommandResult {
        let mut updated = self.config.clone();
        updated.set(key, value)?;
        if let Some(manager) = &self.config_manager {
            manager.save(&updated)?;
        }
        let storage_key_changed = updated.storage_key != self.config.storage_key;
        self.config = updated;
        cli_io::print_success(format!("Set {} = {}", key, value));
        if storage_key_changed {
            cli_io::print_info("The new storage key takes effect the next time the shell starts.");
        }
        Ok(())
    }
}

fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}
