//! Minimal headless console example.
//!
//! Registers a couple of overloaded commands, sends some lines
//! programmatically and prints the console output.
//!
//! Run with: `cargo run --example minimal`

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_console_overloads::prelude::*;

#[derive(Resource, Debug, Default)]
struct Gravity(Vec3);

fn main() {
    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(ConsolePlugin::default())
        .init_resource::<Gravity>()
        .add_systems(Startup, setup)
        .add_systems(Update, process_outputs)
        .add_systems(Update, send_test_commands.run_if(run_once))
        .add_systems(Last, exit_after_frames)
        .run();
}

fn set_gravity(world: &mut World, value: Vec3) {
    world.resource_mut::<Gravity>().0 = value;
    world
        .resource_mut::<ConsoleLog>()
        .success(format!("Gravity is now {value}"));
}

fn setup(mut console: Console) {
    let commands = [
        ConCommand::new("gravity", |args, world| {
            set_gravity(world, Vec3::new(args.get(0)?, args.get(1)?, args.get(2)?));
            Ok(())
        })
        .arg::<f32>("x")
        .arg::<f32>("y")
        .arg::<f32>("z")
        .description("Sets the gravitational force"),
        ConCommand::new("gravity", |args, world| {
            set_gravity(world, args.get(0)?);
            Ok(())
        })
        .arg::<Vec3>("value")
        .description("Sets the gravitational force"),
        ConCommand::new("invert-gravity", |_, world| {
            let inverted = -world.resource::<Gravity>().0;
            set_gravity(world, inverted);
            Ok(())
        })
        .description("Inverts the current gravity vector"),
        ConCommand::new("timescale", |args, world| {
            let scale: f32 = args.get(0)?;
            if scale < 0.0 {
                anyhow::bail!("Timescale must be greater than or equal to 0");
            }
            world.resource_mut::<Time<Virtual>>().set_relative_speed(scale);
            Ok(())
        })
        .arg::<f32>("scale")
        .group("time")
        .description("Sets the current timescale"),
    ];

    for cmd in commands {
        let _ = console.register_cmd(cmd);
    }

    for m in console.suggest_commands("grvity") {
        println!("suggestion: {} - {}", m.full_name, m.help_text);
    }
    for signature in console.suggest_overloads("gravity") {
        println!("overload: {signature}");
    }
}

/// Send some test commands programmatically.
fn send_test_commands(mut events: MessageWriter<ConsoleInputEvent>) {
    println!("\n--- Sending test commands ---");

    for line in [
        "help",
        "gravity 0 -9.81 0",
        "set up (0, 1, 0)",
        "gravity up",
        "invert-gravity",
        "time.timescale 0.5",
        "time.timescale -1",
        "gravity up 1",
        "peek nothing",
    ] {
        events.write(ConsoleInputEvent::new(line));
    }
}

/// Process and print console output events.
fn process_outputs(mut events: MessageReader<ConsoleOutputEvent>) {
    for event in events.read() {
        let prefix = match event.level {
            ConsoleOutputLevel::Info => "[INFO]",
            ConsoleOutputLevel::Warning => "[WARN]",
            ConsoleOutputLevel::Error => "[ERROR]",
            ConsoleOutputLevel::Success => "[OK]",
            ConsoleOutputLevel::Command => "",
        };
        println!("{} {}", prefix, event.message);
    }
}

fn exit_after_frames(mut frames: Local<u32>, mut exit: MessageWriter<AppExit>) {
    *frames += 1;
    if *frames > 3 {
        exit.write(AppExit::Success);
    }
}
