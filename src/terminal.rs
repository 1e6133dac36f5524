//! Terminal backend for headless apps.
//!
//! Lines read from stdin are submitted as commands and console output is
//! written to stdout. A line starting with `?` is a query instead: `?gra`
//! lists commands close to `gra`, `?gravity ` lists its overloads.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use bevy::prelude::*;

use crate::core::{ConsoleInputEvent, ConsoleOutputEvent, ConsoleOutputLevel, ConsoleRef, Suggestions};

/// Plugin that adds terminal (stdin/stdout) console support.
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = mpsc::channel();
        let _handle = spawn_stdin_reader(sender);

        app.insert_resource(StdinReceiver(Mutex::new(receiver)))
            .init_resource::<TerminalConfig>()
            .add_systems(Update, (read_stdin, write_stdout));
    }
}

/// Configuration for terminal behavior.
#[derive(Resource)]
pub struct TerminalConfig {
    /// Whether to use colored output (ANSI escape codes).
    pub colored: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self { colored: false } // Off by default, some terminals show the raw codes
    }
}

#[derive(Resource)]
struct StdinReceiver(Mutex<Receiver<String>>);

fn spawn_stdin_reader(sender: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        let handle = stdin.lock();

        for line in handle.lines().map_while(Result::ok) {
            // Queries keep trailing whitespace, it selects overload listing.
            let text = line.trim_start().to_string();
            if !text.trim().is_empty() && sender.send(text).is_err() {
                break;
            }
        }
    })
}

fn read_stdin(
    receiver: Res<StdinReceiver>,
    console: ConsoleRef,
    mut events: MessageWriter<ConsoleInputEvent>,
) {
    let Ok(rx) = receiver.0.lock() else {
        return;
    };
    while let Ok(line) = rx.try_recv() {
        match line.strip_prefix('?') {
            Some(query) => {
                for suggestion in format_suggestions(console.suggestions(query)) {
                    println!("{suggestion}");
                }
                let _ = io::stdout().flush();
            }
            None => {
                events.write(ConsoleInputEvent::new(line));
            }
        }
    }
}

/// One display line per suggestion.
pub fn format_suggestions(suggestions: Suggestions) -> Vec<String> {
    match suggestions {
        Suggestions::Overloads(signatures) => signatures,
        Suggestions::Commands(matches) => matches
            .into_iter()
            .map(|m| {
                let help = if m.help_text.is_empty() {
                    "No help text provided"
                } else {
                    m.help_text
                };
                format!("{} - {}", m.full_name, help)
            })
            .collect(),
    }
}

fn write_stdout(mut events: MessageReader<ConsoleOutputEvent>, config: Res<TerminalConfig>) {
    for event in events.read() {
        if config.colored {
            print_colored(&event.message, event.level);
        } else {
            println!("{}", event.message);
        }
        let _ = io::stdout().flush();
    }
}

fn print_colored(message: &str, level: ConsoleOutputLevel) {
    let color = match level {
        ConsoleOutputLevel::Info => "\x1b[0m",
        ConsoleOutputLevel::Warning => "\x1b[33m",
        ConsoleOutputLevel::Error => "\x1b[31m",
        ConsoleOutputLevel::Success => "\x1b[32m",
        ConsoleOutputLevel::Command => "\x1b[36m",
    };
    println!("{}{}\x1b[0m", color, message);
}
