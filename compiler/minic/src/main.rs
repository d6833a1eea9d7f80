//! Mini CLI
//!
//! Runs, tokenizes or parses `.mini` programs.

use std::path::Path;
use std::process;

use minic::{Error, RunOptions};

fn main() {
    minic::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: mini run <file.mini> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --dump-globals      Print the global table before and after main");
                eprintln!("  --max-depth=<n>     Fail once n calls are active");
                process::exit(1);
            }

            let mut options = RunOptions::default();
            let mut dump_globals = false;
            let mut file_path = None;

            for arg in args.iter().skip(2) {
                if arg == "--dump-globals" {
                    dump_globals = true;
                } else if let Some(value) = arg.strip_prefix("--max-depth=") {
                    match value.parse::<usize>() {
                        Ok(depth) => options.max_call_depth = Some(depth),
                        Err(_) => {
                            eprintln!("error: invalid --max-depth value `{value}`");
                            process::exit(1);
                        }
                    }
                } else if arg.starts_with('-') {
                    eprintln!("error: unknown option `{arg}`");
                    process::exit(1);
                } else if file_path.is_none() {
                    file_path = Some(arg.as_str());
                }
            }

            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: mini run <file.mini> [options]");
                process::exit(1);
            };

            run_file(path, &options, dump_globals);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: mini lex <file.mini>");
                process::exit(1);
            }
            let path = &args[2];
            let source = read_file(path);
            match minic::lex_source(&source) {
                Ok(listing) => print!("{listing}"),
                Err(err) => fail(&err, path, &source),
            }
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: mini parse <file.mini>");
                process::exit(1);
            }
            let path = &args[2];
            let source = read_file(path);
            match minic::parse_to_string(&source) {
                Ok(dump) => print!("{dump}"),
                Err(err) => fail(&err, path, &source),
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("mini {}", env!("CARGO_PKG_VERSION"));
        }
        path if Path::new(path).extension().is_some_and(|ext| ext == "mini") => {
            run_file(path, &RunOptions::default(), false);
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn run_file(path: &str, options: &RunOptions, dump_globals: bool) {
    let source = read_file(path);
    match minic::run_source(&source, options) {
        Ok(outcome) => {
            if dump_globals {
                print_globals("globals before main", &outcome.globals_before);
            }
            match outcome.value {
                Some(value) => println!("{value}"),
                None => println!("None"),
            }
            if dump_globals {
                print_globals("globals after main", &outcome.globals);
            }
        }
        Err(err) => fail(&err, path, &source),
    }
}

fn print_globals(title: &str, globals: &[(String, String)]) {
    println!("-- {title} --");
    for (name, value) in globals {
        println!("{name} = {value}");
    }
}

fn read_file(path: &str) -> String {
    match minic::read_source(Path::new(path)) {
        Ok(source) => source,
        Err(err) => fail(&err, path, ""),
    }
}

fn fail(err: &Error, path: &str, source: &str) -> ! {
    eprintln!("{}", err.render(path, source).trim_end());
    process::exit(1);
}

fn print_usage() {
    println!("Mini language interpreter");
    println!();
    println!("Usage: mini <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.mini>      Run a program and print main's result");
    println!("  lex <file.mini>      Tokenize and display tokens");
    println!("  parse <file.mini>    Parse and display the syntax tree");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --dump-globals      Print the global table before and after main");
    println!("  --max-depth=<n>     Fail once n calls are active");
    println!();
    println!("Shorthand: mini <file.mini> is the same as mini run <file.mini>");
    println!();
    println!("Set RUST_LOG=mini_eval=debug to trace calls (MINI_LOG_TREE=1 for a tree view).");
}
