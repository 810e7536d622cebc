use crate::cli::core::{CommandResult, ShellContext, ADD_USAGE, DELETE_USAGE};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an income or expense (prompts when no arguments are given)",
            ADD_USAGE,
            cmd_add,
        ),
        CommandEntry::new(
            "delete",
            "Remove a transaction by list row or id prefix",
            DELETE_USAGE,
            cmd_delete,
        )
        .with_aliases(&["rm"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.add_transaction(args)
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.delete_transaction(args)
}
