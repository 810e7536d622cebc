pub mod config;
pub mod system;
pub mod transaction;
pub mod view;

use crate::cli::registry::CommandRegistry;

/// Registers every shell command in the order `help` lists them.
pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        transaction::definitions(),
        view::definitions(),
        config::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}
