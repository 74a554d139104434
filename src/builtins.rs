//! Built-in console commands.
//!
//! [`BuiltinCommands`] registers `qqq`, `help`, `test` and `findcmd`, and
//! subscribes the executor listener that actually runs dispatched handlers.
//! Tearing it down removes both again.

use bevy::prelude::*;

use crate::config::ConsoleConfig;
use crate::core::{
    paginate, CommandArgs, CommandBus, CommandRegistry, ConCommand, History, Severity,
    SubscriptionToken, Transcript,
};

/// Handle to the installed built-in commands.
///
/// # Examples
///
/// ```ignore
/// let builtins = BuiltinCommands::install(world);
/// // ...
/// builtins.uninstall(world);
/// ```
#[derive(Resource, Debug)]
pub struct BuiltinCommands {
    executor: SubscriptionToken,
    registered: Vec<&'static str>,
}

impl BuiltinCommands {
    /// Register the built-in commands and the executor listener.
    ///
    /// Missing console resources are created, so a bare [`World`] works.
    /// A built-in whose name is already taken is skipped with a warning.
    pub fn install(world: &mut World) -> Self {
        world.init_resource::<CommandRegistry>();
        world.init_resource::<CommandBus>();
        world.init_resource::<History>();
        world.init_resource::<Transcript>();

        let mut registry = world.resource_mut::<CommandRegistry>();
        let mut registered = Vec::new();

        for (name, cmd) in builtin_commands() {
            match registry.register(cmd) {
                Ok(_) => registered.push(name),
                Err(err) => warn!("Console: Skipping built-in '{}': {}", name, err),
            }
        }

        let executor = world
            .resource_mut::<CommandBus>()
            .subscribe(|invocation, world| invocation.invoke(world));

        Self {
            executor,
            registered,
        }
    }

    /// Names of the built-ins this handle registered.
    pub fn names(&self) -> &[&'static str] {
        &self.registered
    }

    /// Unregister the built-ins and detach the executor.
    pub fn uninstall(self, world: &mut World) {
        if let Some(mut registry) = world.get_resource_mut::<CommandRegistry>() {
            for name in &self.registered {
                registry.unregister(name);
            }
        }

        if let Some(mut bus) = world.get_resource_mut::<CommandBus>() {
            bus.unsubscribe(self.executor);
        }
    }
}

/// The built-in command definitions.
fn builtin_commands() -> [(&'static str, ConCommand); 4] {
    [
        (
            "qqq",
            ConCommand::new("qqq", exit_app).help("Quick close the game"),
        ),
        (
            "help",
            ConCommand::new("help", show_help)
                .help("Show all commands, add page number after to change page")
                .params("$i")
                .exact_arity(false),
        ),
        (
            "test",
            ConCommand::new("test", smoke_test)
                .help("Check that commands are dispatched")
                .params("$s $i $f $b")
                .exact_arity(true),
        ),
        (
            "findcmd",
            ConCommand::new("findcmd", find_command)
                .help("Search commands by string")
                .params("$s $i")
                .exact_arity(false),
        ),
    ]
}

/// qqq - Request application exit.
fn exit_app(_args: &CommandArgs, world: &mut World) {
    info!("Console: Exit requested");
    world.write_message(AppExit::Success);
}

/// help [page] - List every command with its help text.
fn show_help(args: &CommandArgs, world: &mut World) {
    let requested = args.parse_or::<i64>(0, 1);
    let page_size = page_size(world);

    let output = {
        let registry = world.resource::<CommandRegistry>();
        let entries = registry.help_entries();
        page_lines(&entries, page_size, requested)
    };

    write_lines(world, output);
}

/// test - Smoke test for the dispatch path.
fn smoke_test(args: &CommandArgs, world: &mut World) {
    info!("Console: Test command dispatched with {:?}", args.as_slice());
    world.resource_mut::<Transcript>().success("Test worked");
}

/// findcmd <substring> [page] - List commands whose name contains a substring.
fn find_command(args: &CommandArgs, world: &mut World) {
    let Some(needle) = args.get(0) else {
        world
            .resource_mut::<Transcript>()
            .error("Usage: findcmd <substring> [page]");
        return;
    };

    let requested = args.parse_or::<i64>(1, 1);
    let page_size = page_size(world);

    let output = {
        let registry = world.resource::<CommandRegistry>();
        let matches = registry.search(needle);
        if matches.is_empty() {
            vec![(format!("No commands match '{}'", needle), Severity::Info)]
        } else {
            page_lines(&matches, page_size, requested)
        }
    };

    write_lines(world, output);
}

fn page_size(world: &World) -> usize {
    world
        .get_resource::<ConsoleConfig>()
        .map_or_else(|| ConsoleConfig::default().page_size, |config| config.page_size)
}

/// Render one page of `(name, help)` entries plus the page footer.
fn page_lines(
    entries: &[(&str, &'static str)],
    page_size: usize,
    requested: i64,
) -> Vec<(String, Severity)> {
    let page = paginate(entries, page_size, requested);

    page.items
        .iter()
        .map(|(name, help)| (format!("{}: {}", name, help), Severity::Success))
        .chain(std::iter::once((
            format!("Page {} of {}", page.page, page.total_pages),
            Severity::Info,
        )))
        .collect()
}

fn write_lines(world: &mut World, lines: Vec<(String, Severity)>) {
    let mut transcript = world.resource_mut::<Transcript>();
    for (text, severity) in lines {
        transcript.append(text, severity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{submit_line, SubmitOutcome};

    fn world() -> (World, BuiltinCommands) {
        let mut world = World::new();
        world.init_resource::<History>();
        world.init_resource::<Transcript>();
        world.insert_resource(ConsoleConfig {
            echo_input: false,
            ..default()
        });
        let builtins = BuiltinCommands::install(&mut world);
        (world, builtins)
    }

    fn output(world: &World) -> Vec<String> {
        world
            .resource::<Transcript>()
            .lines()
            .iter()
            .map(|line| line.text.clone())
            .collect()
    }

    fn register_many(world: &mut World, count: usize) {
        let mut registry = world.resource_mut::<CommandRegistry>();
        for i in 0..count {
            let name = format!("cmd_{:02}", i);
            registry
                .register(ConCommand::new(name, |_, _| {}).help("generated"))
                .unwrap();
        }
    }

    #[test]
    fn test_install_registers_signatures() {
        let (world, builtins) = world();
        let registry = world.resource::<CommandRegistry>();

        assert_eq!(builtins.names(), &["qqq", "help", "test", "findcmd"]);
        assert_eq!(registry.get("qqq").unwrap().signature(), "");
        assert_eq!(registry.get("help").unwrap().signature(), "$i");
        assert_eq!(registry.get("test").unwrap().signature(), "$s $i $f $b");
        assert!(registry.get("test").unwrap().requires_exact_arity());
        assert_eq!(registry.get("findcmd").unwrap().signature(), "$s $i");
        assert!(!registry.get("findcmd").unwrap().requires_exact_arity());
        assert_eq!(world.resource::<CommandBus>().len(), 1);
    }

    #[test]
    fn test_help_lists_sorted_first_page() {
        let (mut world, _builtins) = world();

        submit_line(&mut world, "help");

        assert_eq!(
            output(&world),
            vec![
                "findcmd: Search commands by string",
                "help: Show all commands, add page number after to change page",
                "qqq: Quick close the game",
                "test: Check that commands are dispatched",
                "Page 1 of 1",
            ]
        );
    }

    #[test]
    fn test_help_pages_clamp() {
        let (mut world, _builtins) = world();
        register_many(&mut world, 8);

        // 12 commands, 5 per page
        submit_line(&mut world, "help 3");
        let lines = output(&world);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "Page 3 of 3");

        world.resource_mut::<Transcript>().clear();
        submit_line(&mut world, "help 99");
        assert_eq!(output(&world).last().unwrap(), "Page 3 of 3");

        world.resource_mut::<Transcript>().clear();
        submit_line(&mut world, "help 0");
        let lines = output(&world);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "cmd_00: generated");
        assert_eq!(lines[5], "Page 1 of 3");
    }

    #[test]
    fn test_help_rejects_non_numeric_page() {
        let (mut world, _builtins) = world();

        let outcome = submit_line(&mut world, "help two");
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(output(&world), vec!["Parameters 1 are incorrect values"]);
    }

    #[test]
    fn test_findcmd_filters_sorted() {
        let (mut world, _builtins) = world();

        submit_line(&mut world, "findcmd e");

        assert_eq!(
            output(&world),
            vec![
                "help: Show all commands, add page number after to change page",
                "test: Check that commands are dispatched",
                "Page 1 of 1",
            ]
        );
    }

    #[test]
    fn test_findcmd_second_page() {
        let (mut world, _builtins) = world();
        register_many(&mut world, 7);

        submit_line(&mut world, "findcmd cmd_ 2");
        let lines = output(&world);
        assert_eq!(lines, vec!["cmd_05: generated", "cmd_06: generated", "Page 2 of 2"]);
    }

    #[test]
    fn test_findcmd_no_match_and_usage() {
        let (mut world, _builtins) = world();

        submit_line(&mut world, "findcmd zzz");
        submit_line(&mut world, "findcmd");

        assert_eq!(
            output(&world),
            vec!["No commands match 'zzz'", "Usage: findcmd <substring> [page]"]
        );
        assert_eq!(world.resource::<Transcript>().lines()[1].severity, Severity::Error);
    }

    #[test]
    fn test_smoke_test_command() {
        let (mut world, _builtins) = world();

        let outcome = submit_line(&mut world, r#"test "a b" 3 2.5 false"#);
        assert_eq!(outcome, SubmitOutcome::Dispatched { listeners: 1 });
        assert_eq!(output(&world), vec!["Test worked"]);
    }

    #[test]
    fn test_smoke_test_requires_exact_arity() {
        let (mut world, _builtins) = world();

        submit_line(&mut world, "test a 3");
        assert_eq!(
            output(&world),
            vec!["Number of parameters does not match the command (expected 4, got 2)"]
        );
    }

    #[test]
    fn test_qqq_without_exit_channel_does_not_panic() {
        let (mut world, _builtins) = world();
        let outcome = submit_line(&mut world, "qqq");
        assert_eq!(outcome, SubmitOutcome::Dispatched { listeners: 1 });
    }

    #[test]
    fn test_uninstall() {
        let (mut world, builtins) = world();
        builtins.uninstall(&mut world);

        assert!(world.resource::<CommandRegistry>().is_empty());
        assert!(world.resource::<CommandBus>().is_empty());

        let outcome = submit_line(&mut world, "help");
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    }

    #[test]
    fn test_builtins_on_bare_world() {
        let mut world = World::new();
        let _builtins = BuiltinCommands::install(&mut world);

        let outcome = submit_line(&mut world, "help");
        assert_eq!(outcome, SubmitOutcome::Dispatched { listeners: 1 });
        submit_line(&mut world, "test a 1 1.0 true");

        let lines = output(&world);
        assert_eq!(lines[0], "$ help");
        assert_eq!(lines[1], "findcmd: Search commands by string");
        assert_eq!(lines[5], "Page 1 of 1");
        assert_eq!(lines.last().unwrap(), "Test worked");
        assert!(!lines.iter().any(|line| line.contains("panicked")));
        assert_eq!(world.resource::<History>().len(), 2);
    }

    #[test]
    fn test_install_skips_taken_names() {
        let mut world = World::new();
        world.init_resource::<CommandRegistry>();
        world
            .resource_mut::<CommandRegistry>()
            .register(ConCommand::new("help", |_, _| {}).help("custom"))
            .unwrap();

        let builtins = BuiltinCommands::install(&mut world);
        assert_eq!(builtins.names(), &["qqq", "test", "findcmd"]);

        builtins.uninstall(&mut world);
        let registry = world.resource::<CommandRegistry>();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("help").unwrap().help(), "custom");
    }
}
