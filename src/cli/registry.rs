//! Lookup table from typed words to shell commands.

use std::collections::HashMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Maximum edit distance for a "did you mean" suggestion.
const SUGGESTION_DISTANCE: usize = 2;

pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    /// Extra words that run the same command, such as `rm` for `delete`.
    pub fn with_aliases(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    fn words(&self) -> impl Iterator<Item = &'static str> {
        let aliases = self.aliases;
        std::iter::once(self.name).chain(aliases.iter().copied())
    }
}

/// Commands in registration order, addressable by name or alias.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`; a later entry claiming an existing word replaces the
    /// earlier binding for that word only.
    pub fn register(&mut self, entry: CommandEntry) {
        let position = self.entries.len();
        for word in entry.words() {
            if let Some(previous) = self.index.insert(word, position) {
                tracing::debug!(word, previous, "command word rebound");
            }
        }
        self.entries.push(entry);
    }

    pub fn get(&self, word: &str) -> Option<&CommandEntry> {
        self.index.get(word).map(|&position| &self.entries[position])
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.entries.iter().collect()
    }

    /// Primary command names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Every word the shell accepts, aliases included; used for completion.
    pub fn words(&self) -> Vec<&'static str> {
        self.entries.iter().flat_map(CommandEntry::words).collect()
    }

    pub fn handler(&self, word: &str) -> Option<CommandHandler> {
        self.get(word).map(|entry| entry.handler)
    }

    /// Closest command name to a mistyped word, if any is near enough.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_ascii_lowercase();
        self.entries
            .iter()
            .filter_map(|entry| {
                let distance = entry
                    .words()
                    .map(|word| strsim::levenshtein(&needle, word))
                    .min()?;
                (distance <= SUGGESTION_DISTANCE).then_some((entry.name, distance))
            })
            .min_by_key(|(_, distance)| *distance)
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "", "list", noop).with_aliases(&["ls"]));
        registry.register(CommandEntry::new("delete", "", "delete", noop).with_aliases(&["rm"]));
        registry
    }

    #[test]
    fn aliases_resolve_to_the_primary_entry() {
        let registry = registry();
        assert_eq!(registry.get("rm").map(|entry| entry.name), Some("delete"));
        assert_eq!(registry.get("ls").map(|entry| entry.name), Some("list"));
        assert!(registry.get("remove").is_none());
    }

    #[test]
    fn names_exclude_aliases_but_words_include_them() {
        let registry = registry();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["list", "delete"]);
        assert_eq!(registry.words(), vec!["list", "ls", "delete", "rm"]);
    }

    #[test]
    fn suggestion_reports_primary_name() {
        let registry = registry();
        assert_eq!(registry.suggest("rn"), Some("delete"));
        assert_eq!(registry.suggest("lsit"), Some("list"));
        assert_eq!(registry.suggest("balance"), None);
    }
}
