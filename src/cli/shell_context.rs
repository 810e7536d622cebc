//! Shared runtime state for CLI interactions and command execution.

use dialoguer::theme::ColorfulTheme;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigManager, ViewTab},
    core::LedgerStore,
    domain::CategoryFilter,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub config_manager: Option<ConfigManager>,
    pub filter: CategoryFilter,
    pub view: ViewTab,
    /// Ids of the rows in the most recently rendered list, in display order.
    pub listed_ids: Vec<Uuid>,
    pub last_command: Option<String>,
    pub running: bool,
}
