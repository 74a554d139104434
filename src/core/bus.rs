//! Command dispatch bus.
//!
//! Validated commands are never run directly. They are broadcast as a
//! [`CommandInvocation`] to every subscribed listener, and a listener decides
//! whether to call the handler. This lets loggers, auditors or gatekeepers sit
//! on the bus beside the listener that actually executes commands.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bevy::prelude::*;

use super::{CommandArgs, CommandHandler, Transcript};

/// A validated command ready to run.
#[derive(Clone)]
pub struct CommandInvocation {
    name: Box<str>,
    handler: CommandHandler,
    args: CommandArgs,
}

impl CommandInvocation {
    /// Create an invocation of `handler` with `args`.
    pub fn new(name: impl Into<Box<str>>, handler: CommandHandler, args: CommandArgs) -> Self {
        Self {
            name: name.into(),
            handler,
            args,
        }
    }

    /// The command name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The handler registered for the command.
    #[inline]
    pub fn handler(&self) -> &CommandHandler {
        &self.handler
    }

    /// The validated arguments.
    #[inline]
    pub fn args(&self) -> &CommandArgs {
        &self.args
    }

    /// Call the handler with the arguments.
    pub fn invoke(&self, world: &mut World) {
        (self.handler)(&self.args, world);
    }
}

impl std::fmt::Debug for CommandInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandInvocation")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// A bus listener.
pub type CommandListener = Arc<dyn Fn(&CommandInvocation, &mut World) + Send + Sync>;

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(0);

/// Proof of a bus subscription.
///
/// The only way to detach a listener is to hand its token back to
/// [`CommandBus::unsubscribe`], which consumes it.
#[must_use = "dropping the token makes the listener impossible to unsubscribe"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// Publish/subscribe channel for validated commands.
///
/// # Examples
///
/// ```ignore
/// let token = world.resource_mut::<CommandBus>().subscribe(|invocation, _world| {
///     info!("Running '{}'", invocation.name());
/// });
///
/// // Later, when the owner is torn down
/// world.resource_mut::<CommandBus>().unsubscribe(token);
/// ```
#[derive(Resource, Default)]
pub struct CommandBus {
    listeners: Vec<(u64, CommandListener)>,
}

impl CommandBus {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionToken
    where
        F: Fn(&CommandInvocation, &mut World) + Send + Sync + 'static,
    {
        let id = NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed);
        let listener: CommandListener = Arc::new(listener);
        self.listeners.push((id, listener));
        SubscriptionToken(id)
    }

    /// Detach the listener behind `token`.
    ///
    /// Returns `false` if the token was issued by another bus.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != token.0);
        self.listeners.len() != before
    }

    /// Get the number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn snapshot(&self) -> Vec<CommandListener> {
        self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }

    /// Deliver `invocation` to every current listener.
    ///
    /// The listener list is copied first, so listeners may subscribe or
    /// unsubscribe (themselves included) while being called. A panicking
    /// listener is reported to the [`Transcript`] and the rest still run.
    ///
    /// Returns the number of listeners called.
    pub fn broadcast(world: &mut World, invocation: &CommandInvocation) -> usize {
        let listeners = world
            .get_resource::<CommandBus>()
            .map(CommandBus::snapshot)
            .unwrap_or_default();

        if listeners.is_empty() {
            debug!("Console: No listeners for '{}'", invocation.name());
            return 0;
        }

        for listener in &listeners {
            let result = catch_unwind(AssertUnwindSafe(|| listener(invocation, world)));

            if let Err(panic_info) = result {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };

                error!("Console: Command '{}' panicked: {}", invocation.name(), panic_msg);
                if let Some(mut transcript) = world.get_resource_mut::<Transcript>() {
                    transcript.error(format!(
                        "Command '{}' panicked: {}",
                        invocation.name(),
                        panic_msg
                    ));
                }
            }
        }

        listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Calls(Vec<String>);

    #[derive(Resource, Default)]
    struct HeldToken(Option<SubscriptionToken>);

    fn world() -> World {
        let mut world = World::new();
        world.init_resource::<CommandBus>();
        world.init_resource::<Transcript>();
        world.init_resource::<Calls>();
        world
    }

    fn invocation(args: &[&str]) -> CommandInvocation {
        let handler: CommandHandler = Arc::new(|args: &CommandArgs, world: &mut World| {
            world.resource_mut::<Calls>().0.push(format!("handler {}", args.join(",")));
        });
        let args = args.iter().map(|s| s.to_string()).collect();
        CommandInvocation::new("test", handler, CommandArgs::new("test", args))
    }

    #[test]
    fn test_broadcast_without_listeners() {
        let mut world = world();
        assert_eq!(CommandBus::broadcast(&mut world, &invocation(&[])), 0);
        assert!(world.resource::<Calls>().0.is_empty());
    }

    #[test]
    fn test_broadcast_reaches_every_listener() {
        let mut world = world();
        {
            let mut bus = world.resource_mut::<CommandBus>();
            let _executor = bus.subscribe(|inv, world| inv.invoke(world));
            let _observer = bus.subscribe(|inv, world| {
                world.resource_mut::<Calls>().0.push(format!("saw {}", inv.name()));
            });
        }

        assert_eq!(CommandBus::broadcast(&mut world, &invocation(&["a", "1"])), 2);
        assert_eq!(world.resource::<Calls>().0, vec!["handler a,1", "saw test"]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut world = world();
        let mut bus = world.resource_mut::<CommandBus>();
        let token = bus.subscribe(|_, _| {});
        assert_eq!(bus.len(), 1);
        assert!(bus.unsubscribe(token));
        assert!(bus.is_empty());
    }

    #[test]
    fn test_foreign_token_is_rejected() {
        let mut a = CommandBus::new();
        let mut b = CommandBus::new();
        let _kept = a.subscribe(|_, _| {});
        let token = b.subscribe(|_, _| {});

        assert!(!a.unsubscribe(token));
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_unsubscribe_during_own_invocation() {
        let mut world = world();
        world.init_resource::<HeldToken>();

        let token = world.resource_mut::<CommandBus>().subscribe(|_, world| {
            world.resource_mut::<Calls>().0.push("once".into());
            if let Some(token) = world.resource_mut::<HeldToken>().0.take() {
                world.resource_mut::<CommandBus>().unsubscribe(token);
            }
        });
        let _after = world.resource_mut::<CommandBus>().subscribe(|_, world| {
            world.resource_mut::<Calls>().0.push("after".into());
        });
        world.resource_mut::<HeldToken>().0 = Some(token);

        assert_eq!(CommandBus::broadcast(&mut world, &invocation(&[])), 2);
        assert_eq!(CommandBus::broadcast(&mut world, &invocation(&[])), 1);
        assert_eq!(world.resource::<Calls>().0, vec!["once", "after", "after"]);
    }

    #[test]
    fn test_panicking_listener_is_contained() {
        let mut world = world();
        {
            let mut bus = world.resource_mut::<CommandBus>();
            let _boom = bus.subscribe(|_, _| panic!("boom"));
            let _next = bus.subscribe(|_, world| {
                world.resource_mut::<Calls>().0.push("still ran".into());
            });
        }

        assert_eq!(CommandBus::broadcast(&mut world, &invocation(&[])), 2);
        assert_eq!(world.resource::<Calls>().0, vec!["still ran"]);

        let transcript = world.resource::<Transcript>();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.lines()[0].text, "Command 'test' panicked: boom");
    }
}
