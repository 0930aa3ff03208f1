use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;

use crate::{
    cli::{
        output,
        registry::{CommandEntry, CommandRegistry},
        render,
        shell::parse_command_line,
    },
    config::{Config, ConfigManager},
    core::{Command, CommandOutcome, MonthItemStore, Session},
    currency::CurrencyStyle,
    domain::{Displayable, Identifiable, ItemId, MonthKey},
    errors::{CliError, ConfigError, StoreError, ValidationError},
    storage::FileBlobStore,
    utils::persistence::LoadSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Per-command failures; reported to the user, never fatal to the shell.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session,
    pub config: Config,
    pub data_dir: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Opens the document under the configured data directory for the current month.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let data_dir = config_manager.base_dir().to_path_buf();
        let backend = FileBlobStore::new(Some(data_dir.clone()))?;
        let store = MonthItemStore::open(Box::new(backend), config.storage_key.clone());
        tracing::info!(
            key = %config.storage_key,
            data_dir = %data_dir.display(),
            "session started"
        );
        let context = Self::from_parts(mode, store, config, data_dir, MonthKey::current());
        context.report_load();
        Ok(context)
    }

    pub fn from_parts(
        mode: CliMode,
        store: MonthItemStore,
        config: Config,
        data_dir: PathBuf,
        month: MonthKey,
    ) -> Self {
        Self {
            mode,
            registry: CommandRegistry::with_defaults(),
            session: Session::new(store, month),
            config,
            data_dir,
            last_command: None,
            running: true,
        }
    }

    fn report_load(&self) {
        let store = self.session.store();
        match store.load_source() {
            LoadSource::Corrupt => output::warning(
                "Stored wishes could not be read; starting from an empty document.",
            ),
            LoadSource::Stored if !store.load_warnings().is_empty() => {
                output::warning(format!(
                    "Repaired {} problem(s) in stored wishes.",
                    store.load_warnings().len()
                ));
            }
            _ => {}
        }
    }

    pub fn prompt(&self) -> String {
        match self.session.drag().dragging_id() {
            Some(id) => format!(
                "wish [{} | dragging {}]> ",
                self.session.month(),
                render::short_id(id)
            ),
            None => format!("wish [{}]> ", self.session.month()),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn style(&self) -> CurrencyStyle {
        self.config.currency_style()
    }

    /// Forwards a typed command to the session.
    pub fn run(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        Ok(self.session.dispatch(command)?)
    }

    /// Exact id, or a prefix matching exactly one item of the current month.
    pub fn resolve_id(&self, raw: &str) -> Result<ItemId, CommandError> {
        let needle = raw.trim();
        if needle.is_empty() {
            return Err(CommandError::InvalidArguments("an item id is required".into()));
        }
        let items = self.session.items();
        if let Some(item) = items.iter().find(|item| item.id().as_str() == needle) {
            return Ok(item.id().clone());
        }
        let mut matches = items
            .iter()
            .filter(|item| item.id().as_str().starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item.id().clone()),
            (None, _) => Err(CommandError::InvalidArguments(format!(
                "no wish with id `{}` in {}",
                needle,
                self.session.month()
            ))),
            (Some(_), Some(_)) => Err(CommandError::InvalidArguments(format!(
                "id prefix `{}` matches more than one wish",
                needle
            ))),
        }
    }

    /// `name [quad]` of an item in the current month, falling back to its short id.
    pub fn label(&self, id: &ItemId) -> String {
        self.session
            .store()
            .item(self.session.month(), id)
            .map(Displayable::display_label)
            .unwrap_or_else(|| render::short_id(id).to_string())
    }

    pub fn dispatch(
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

    /// Splits one input line and dispatches it.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}
