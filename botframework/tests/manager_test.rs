//! Integration tests for CommandRegistry, the register! macro and ApplicationManager.

use std::io;
use std::sync::{Arc, Mutex};

use botframework::{
    register, ApplicationManager, CommandRegistry, Config, Context, ManagerError, Result, Update,
    BASE_HANDLER_GROUP,
};
use tracing_subscriber::fmt::MakeWriter;

mod common;

async fn a(_update: Update, _context: Context) -> Result<()> {
    Ok(())
}

async fn b(_update: Update, _context: Context) -> Result<()> {
    Ok(())
}

async fn c(_update: Update, _context: Context) -> Result<()> {
    Ok(())
}

fn config(extra: &str) -> Config {
    let contents = format!(
        r#"
        api_token = "123456:TEST-TOKEN"
        persistence = false
        add_base_handler = false
        {}
        "#,
        extra
    );
    Config::parse(&contents, |_| None).unwrap()
}

fn config_with_commands() -> Config {
    config(
        r#"
        [commands.a]
        active = true
        [commands.b]
        active = true
        [commands.c]
        active = false
        "#,
    )
}

#[test]
fn test_register_macro_uses_function_name() {
    let mut registry = CommandRegistry::new();
    register!(registry, a);

    let entry = registry.get("a").unwrap();
    assert_eq!(entry.group, None);
    assert_eq!(entry.group(), 0);
    assert_eq!(entry.handler.name(), "command:/a");
}

#[test]
fn test_register_macro_overrides() {
    let mut registry = CommandRegistry::new();
    register!(registry, a, name = "x", group = 5);
    register!(registry, b, group = 2);
    register!(registry, b, name = "y");

    assert!(!registry.contains("a"));
    assert_eq!(registry.get("x").map(|e| e.group), Some(Some(5)));
    assert_eq!(registry.get("b").map(|e| e.group), Some(Some(2)));
    assert_eq!(registry.get("y").map(|e| e.group), Some(None));
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["b", "x", "y"]);
}

#[tokio::test]
async fn test_registered_function_stays_callable() {
    let mut registry = CommandRegistry::new();
    register!(registry, a);
    assert_eq!(registry.len(), 1);

    let bot = common::mock_bot::MockBot::new();
    let context = Context::new(bot, Default::default());
    a(common::text_update(1, 1, "/a"), context).await.unwrap();
}

#[test]
fn test_registry_holds_one_entry_per_module() {
    let mut registry = CommandRegistry::new();
    register!(registry, a);
    register!(registry, b);
    register!(registry, c);
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_enable_configured_handlers_skips_unregistered() {
    let config = config_with_commands();
    let mut registry = CommandRegistry::new();
    register!(registry, a);
    register!(registry, c);

    let mut manager = ApplicationManager::new(&config, registry).unwrap();
    let enabled = manager.enable_configured_handlers();

    assert_eq!(enabled, 1);
    assert!(manager.is_enabled("a"));
    assert!(!manager.is_registered("b"));
    assert!(!manager.is_enabled("c"));
    assert_eq!(manager.application().handler_count(), 1);
}

#[test]
fn test_enable_unregistered_fails() {
    let config = config_with_commands();
    let mut manager = ApplicationManager::new(&config, CommandRegistry::new()).unwrap();

    let err = manager.enable_command_handler("b").unwrap_err();
    assert!(matches!(err, ManagerError::HandlerNotRegistered(ref name) if name == "b"));
    assert!(matches!(
        manager.disable_command_handler("b"),
        Err(ManagerError::HandlerNotRegistered(_))
    ));
    assert_eq!(manager.application().handler_count(), 0);
}

#[test]
fn test_enable_ignores_active_flag() {
    let config = config_with_commands();
    let mut registry = CommandRegistry::new();
    register!(registry, c);

    let mut manager = ApplicationManager::new(&config, registry).unwrap();
    manager.enable_command_handler("c").unwrap();
    assert!(manager.is_enabled("c"));
}

#[test]
fn test_disable_detaches_handler() {
    let config = config_with_commands();
    let mut registry = CommandRegistry::new();
    register!(registry, a, group = 3);

    let mut manager = ApplicationManager::new(&config, registry).unwrap();
    manager.enable_configured_handlers();
    assert_eq!(manager.application().groups(), vec![3]);

    manager.disable_command_handler("a").unwrap();
    assert!(!manager.is_enabled("a"));
    assert!(manager.application().groups().is_empty());

    // Not attached any more: still Ok.
    manager.disable_command_handler("a").unwrap();
}

#[test]
fn test_base_handler_attached_first() {
    let config = config(
        r#"
        [commands.a]
        active = true
        "#,
    );
    let config = Config {
        add_base_handler: true,
        ..config
    };
    let mut registry = CommandRegistry::new();
    register!(registry, a);

    let mut manager = ApplicationManager::new(&config, registry).unwrap();
    manager.enable_configured_handlers();

    let app = manager.application();
    assert_eq!(app.groups(), vec![BASE_HANDLER_GROUP, 0]);
    assert_eq!(app.handlers(BASE_HANDLER_GROUP)[0].name(), "type:update");
}

#[test]
fn test_no_base_handler_when_disabled() {
    let manager = ApplicationManager::new(&config(""), CommandRegistry::new()).unwrap();
    assert_eq!(manager.application().handler_count(), 0);
}

#[test]
fn test_persistence_configured() {
    let dir = tempfile::tempdir().unwrap();
    let base = config("");
    let config = Config {
        persistence: true,
        persistence_filepath: Some(dir.path().join("bot.json")),
        ..base
    };

    let manager = ApplicationManager::new(&config, CommandRegistry::new()).unwrap();
    assert!(manager.application().has_persistence());
}

#[test]
fn test_invalid_config_rejected() {
    let config = Config {
        persistence: true,
        persistence_filepath: None,
        ..config("")
    };
    let result = ApplicationManager::new(&config, CommandRegistry::new());
    assert!(matches!(result, Err(ManagerError::Config(_))));
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_enable_configured_handlers_warns_for_unregistered() {
    let config = config_with_commands();
    let mut registry = CommandRegistry::new();
    register!(registry, a);
    let mut manager = ApplicationManager::new(&config, registry).unwrap();

    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let enabled = tracing::subscriber::with_default(subscriber, || {
        manager.enable_configured_handlers()
    });

    assert_eq!(enabled, 1);
    let output = logs.contents();
    let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
    assert_eq!(warnings.len(), 1, "{output}");
    assert!(warnings[0].contains("Command is active but has no registered handler"));
    assert!(warnings[0].contains("command=b"));
}
