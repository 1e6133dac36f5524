//! Terminal console example.
//!
//! Demonstrates the console over stdin/stdout for headless applications
//! like dedicated servers.
//!
//! Run with: `cargo run --example terminal --features terminal`
//!
//! Try:
//! - `help` - List available commands
//! - `say "hello there"` - Broadcast a message
//! - `set greeting "hi"` then `say greeting`
//! - `spawn "Crate" (1, 2, 3)` then `status {Crate}`
//! - `?sta` - Suggest commands close to `sta`
//! - `?spawn ` - List the overloads of `spawn`
//! - `quit` - Exit the application

use bevy::app::AppExit;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy_console_overloads::{ConCommand, Console, ConsoleLog, ConsolePlugin, TerminalConfig};

fn main() {
    println!("=== Terminal Console Example ===");
    println!("Type commands and press Enter. Type 'quit' to exit.");
    println!();

    // Ensure output is flushed before starting the app
    use std::io::Write;
    let _ = std::io::stdout().flush();

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(ConsolePlugin::default())
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut console: Console, mut terminal: ResMut<TerminalConfig>) {
    terminal.colored = true;

    let commands = [
        ConCommand::new("say", |args, world| {
            let message: String = args.get(0)?;
            world.resource_mut::<ConsoleLog>().info(format!("[SERVER] {message}"));
            Ok(())
        })
        .arg::<String>("message")
        .description("Broadcast a message"),
        ConCommand::new("spawn", |args, world| {
            let name: String = args.get(0)?;
            world.spawn((Name::new(name.clone()), Transform::default()));
            world.resource_mut::<ConsoleLog>().success(format!("Spawned '{name}'"));
            Ok(())
        })
        .arg::<String>("name")
        .description("Spawn a named object at the origin"),
        ConCommand::new("spawn", |args, world| {
            let name: String = args.get(0)?;
            let position: Vec3 = args.get(1)?;
            world.spawn((Name::new(name.clone()), Transform::from_translation(position)));
            world
                .resource_mut::<ConsoleLog>()
                .success(format!("Spawned '{name}' at {position}"));
            Ok(())
        })
        .arg::<String>("name")
        .arg::<Vec3>("position")
        .description("Spawn a named object"),
        ConCommand::new("status", |args, world| {
            let Some(entity) = args.get::<Option<Entity>>(0)? else {
                anyhow::bail!("Nothing to report");
            };
            let translation = world
                .get::<Transform>(entity)
                .map(|t| t.translation)
                .unwrap_or_default();
            world
                .resource_mut::<ConsoleLog>()
                .info(format!("{entity} is at {translation}"));
            Ok(())
        })
        .arg::<Entity>("object")
        .description("Show where an object is"),
        ConCommand::new("quit", |_, world| {
            world.resource_mut::<Messages<AppExit>>().write(AppExit::Success);
            Ok(())
        })
        .description("Exit the application"),
    ];

    for cmd in commands {
        let _ = console.register_cmd(cmd);
    }
}
