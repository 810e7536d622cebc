use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

const CONFIG_USAGE: &str = "config [show] | config set <key> <value>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change settings (currency, storage_key, default_filter, default_view)",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show_config(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            context.update_config(key, &value.join(" "))
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: {}",
            CONFIG_USAGE
        ))),
    }
}

fn show_config(context: &ShellContext) {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {:<15} {}", key, value));
    }
    if let Some(manager) = &context.config_manager {
        io::print_info(format!("  {:<15} {}", "file", manager.path().display()));
    }
}
