//! Terminal console example.
//!
//! Demonstrates using bevy_command_console with stdin/stdout for headless
//! applications like dedicated servers.
//!
//! Run with: `cargo run --example terminal --features terminal`
//!
//! Commands:
//! - `help` / `help 2` - List available commands
//! - `findcmd say` - Search commands by name
//! - `say "hello there"` - Broadcast a message
//! - `status` - Show server status
//! - `maxplayers 16` - Change the player limit
//! - `qqq` - Exit the application

use bevy::prelude::*;
use bevy_command_console::prelude::*;
use bevy_command_console::TerminalConfig;

#[derive(Resource)]
struct ServerState {
    hostname: String,
    max_players: i32,
}

fn main() {
    println!("=== Terminal Console Example ===");
    println!("Type commands and press Enter. Type 'qqq' to exit.");
    println!();

    // Ensure output is flushed before starting the app
    use std::io::Write;
    let _ = std::io::stdout().flush();

    App::new()
        .add_plugins(MinimalPlugins)
        .insert_resource(ServerState {
            hostname: "My Server".to_string(),
            max_players: 32,
        })
        .insert_resource(ConsoleConfig {
            echo_input: false,
            ..default()
        })
        .add_plugins(ConsolePlugin)
        .insert_resource(TerminalConfig {
            colored: true,
            show_severity: false,
        })
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut console: Console) {
    let commands = [
        ConCommand::new("status", |_args, world| {
            let state = world.resource::<ServerState>();
            let lines = [
                format!("Hostname: {}", state.hostname),
                format!("Max Players: {}", state.max_players),
            ];

            let mut transcript = world.resource_mut::<Transcript>();
            for line in lines {
                transcript.info(line);
            }
        })
        .help("Show server status"),
        ConCommand::new("say", |args, world| {
            let message = format!("[SERVER] {}", args.get(0).unwrap_or_default());
            world.resource_mut::<Transcript>().success(message);
        })
        .help("Broadcast a message")
        .params("$s"),
        ConCommand::new("maxplayers", |args, world| {
            let value = args.parse_or::<i32>(0, 32).clamp(1, 64);
            world.resource_mut::<ServerState>().max_players = value;
            world
                .resource_mut::<Transcript>()
                .success(format!("Max Players set to {}", value));
        })
        .help("Set the player limit (1-64)")
        .params("$i"),
    ];

    for cmd in commands {
        if let Err(err) = console.register(cmd) {
            console.write(err.to_string(), Severity::Error);
        }
    }

    console.write("Console ready, type 'help' for a list of commands", Severity::Info);
}
