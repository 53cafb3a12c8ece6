#![allow(non_snake_case)]
use RustedSciMin::Examples::minimization_examples::minimization_examples;

fn main() {
    // cargo run -- <example> [task.toml]
    let args: Vec<String> = std::env::args().collect();
    let example = match args.get(1) {
        Some(arg) => match arg.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("example number expected, got '{}'", arg);
                return;
            }
        },
        None => 0,
    };
    minimization_examples(example, args.get(2).map(String::as_str));
}
