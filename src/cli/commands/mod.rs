mod drag;
mod items;
mod month;
mod system;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(month::definitions());
    commands.extend(items::definitions());
    commands.extend(drag::definitions());
    commands.extend(system::definitions());
    commands
}
