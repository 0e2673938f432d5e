use std::env;
use std::fs;
use std::process;

use pitch::{NoteError, NoteInit, NoteRecord, Operator, Property, Settings, Spelling};

const USAGE: &str = "Usage: pitch [--config <settings.yaml>] [--tuning <hz>] [--flats] <command> [args]

Commands:
  info <note>...                              print every field of each note
  transpose <note> <amount> [midi|frequency|octave]
  distance <note> <other> [midi|frequency|chroma|octave]
  compare <lt|leq|eq|neq|gt|geq> <note> <other> [property]
  simplify <name> [--switch]
  enharmonic <name>

Notes may be names (C#4), MIDI numbers (61) or frequencies (277.18, 440hz).";

fn usage_exit() -> ! {
    eprintln!("{}", USAGE);
    process::exit(1);
}

fn fail(e: NoteError) -> ! {
    eprintln!("Error: {}", e);
    process::exit(1);
}

fn note_arg(arg: &str) -> NoteInit {
    match arg.parse() {
        Ok(init) => init,
        Err(never) => match never {},
    }
}

fn property_arg(arg: Option<&String>, default: Property) -> Property {
    match arg {
        Some(key) => key.parse().unwrap_or_else(|e| fail(e)),
        None => default,
    }
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"));

    let args: Vec<String> = env::args().skip(1).collect();

    let mut settings = Settings::default();
    let mut tuning: Option<f64> = None;
    let mut flats = false;
    let mut index = 0;

    // Parse flags
    while let Some(arg) = args.get(index) {
        match arg.as_str() {
            "--config" => {
                let path = args.get(index + 1).unwrap_or_else(|| usage_exit());
                let content = match fs::read_to_string(path) {
                    Ok(content) => content,
                    Err(e) => {
                        eprintln!("Error reading file '{}': {}", path, e);
                        process::exit(1);
                    }
                };
                settings = Settings::from_yaml(&content).unwrap_or_else(|e| fail(e));
                log::info!("loaded settings from {}: {:?}", path, settings);
                index += 2;
            }
            "--tuning" => {
                let value = args.get(index + 1).unwrap_or_else(|| usage_exit());
                tuning = Some(value.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid tuning: {}", value);
                    process::exit(1);
                }));
                index += 2;
            }
            "--flats" => {
                flats = true;
                index += 1;
            }
            _ => break,
        }
    }

    // command line flags win over the config file
    if let Some(tuning) = tuning {
        settings = settings.with_tuning(tuning);
    }
    if flats {
        settings = settings.with_spelling(Spelling::Flats);
    }
    if let Err(e) = settings.validate() {
        fail(e);
    }

    let command = args.get(index).unwrap_or_else(|| usage_exit());
    let rest = &args[index + 1..];

    match command.as_str() {
        "info" => {
            if rest.is_empty() {
                usage_exit();
            }
            let records: Vec<NoteRecord> = rest
                .iter()
                .map(|arg| NoteRecord::from(pitch::make_note(&note_arg(arg), &settings)))
                .collect();
            match serde_yaml::to_string(&records) {
                Ok(yaml) => print!("{}", yaml),
                Err(e) => {
                    eprintln!("Error writing records: {}", e);
                    process::exit(1);
                }
            }
        }
        "transpose" => {
            let (note, amount) = match rest {
                [note, amount, ..] => (note, amount),
                _ => usage_exit(),
            };
            let amount: f64 = amount.parse().unwrap_or_else(|_| {
                eprintln!("Invalid amount: {}", amount);
                process::exit(1);
            });
            let property = property_arg(rest.get(2), Property::Midi);
            let note = pitch::transpose(&note_arg(note), amount, property, &settings).unwrap_or_else(|e| fail(e));
            println!("{}", note);
        }
        "distance" => {
            let (note, other) = match rest {
                [note, other, ..] => (note, other),
                _ => usage_exit(),
            };
            let property = property_arg(rest.get(2), Property::Midi);
            let d = pitch::distance(&note_arg(note), &note_arg(other), property, &settings)
                .unwrap_or_else(|e| fail(e));
            println!("{}", d);
        }
        "compare" => {
            let (operator, note, other) = match rest {
                [operator, note, other, ..] => (operator, note, other),
                _ => usage_exit(),
            };
            let operator: Operator = operator.parse().unwrap_or_else(|e| fail(e));
            let property = property_arg(rest.get(3), Property::Midi);
            let result = pitch::compare(operator, &note_arg(note), &note_arg(other), property, &settings)
                .unwrap_or_else(|e| fail(e));
            println!("{}", result);
        }
        "simplify" => {
            let name = rest.first().unwrap_or_else(|| usage_exit());
            let keep_accidental = !rest.iter().any(|arg| arg == "--switch");
            let simplified = pitch::simplify(name, keep_accidental).unwrap_or_else(|e| fail(e));
            println!("{}", simplified);
        }
        "enharmonic" => {
            let name = rest.first().unwrap_or_else(|| usage_exit());
            let respelled = pitch::enharmonic(name).unwrap_or_else(|e| fail(e));
            println!("{}", respelled);
        }
        other => {
            eprintln!("Unknown command: {}", other);
            usage_exit();
        }
    }
}
