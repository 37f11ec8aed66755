mod debug_report;

use regmatch::{
    DebugTrace, Engine, EngineSet, Options, SELF_TEST_TOKEN, match_verbose_traced, match_verbose_with, run_self_test,
};
use std::io::{self, IsTerminal};

/// Transitions kept for the `--verbose` report.
const TRACE_SAMPLE: usize = 64;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let code = match &config.command {
        Command::SelfTest => self_test(&config),
        Command::Match { text, pattern } => run_match(&config, text, pattern),
    };
    std::process::exit(code);
}

enum Command {
    SelfTest,
    Match { text: String, pattern: String },
}

#[derive(Clone, Copy)]
enum EngineChoice {
    Backtrack,
    Memo,
    Both,
}

impl EngineChoice {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "backtrack" | "backtracking" => Ok(EngineChoice::Backtrack),
            "memo" | "memoized" => Ok(EngineChoice::Memo),
            "both" => Ok(EngineChoice::Both),
            other => Err(format!("error: unknown engine '{other}' (expected backtrack, memo or both)")),
        }
    }

    fn primary(self) -> Engine {
        match self {
            EngineChoice::Backtrack | EngineChoice::Both => Engine::Backtracking,
            EngineChoice::Memo => Engine::Memoized,
        }
    }

    fn set(self) -> EngineSet {
        match self {
            EngineChoice::Backtrack => EngineSet::BACKTRACKING,
            EngineChoice::Memo => EngineSet::MEMOIZED,
            EngineChoice::Both => EngineSet::all(),
        }
    }
}

struct CliConfig {
    command: Command,
    engine: EngineChoice,
    collapse: bool,
    verbose: bool,
    trace: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut positionals: Vec<String> = Vec::new();
    let mut engine = EngineChoice::Backtrack;
    let mut collapse = true;
    let mut verbose = false;
    let mut trace = std::env::var_os("REGMATCH_DEBUG").is_some();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("regmatch {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--verbose" | "-v" => verbose = true,
            "--trace" => trace = true,
            "--no-collapse" => collapse = false,
            "--engine" => {
                let value = args.next().ok_or_else(|| "error: --engine expects a value".to_string())?;
                engine = EngineChoice::parse(&value)?;
            }
            "--" => {
                positionals.extend(args);
                break;
            }
            _ if arg.starts_with("--engine=") => {
                engine = EngineChoice::parse(arg.trim_start_matches("--engine="))?;
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => positionals.push(arg),
        }
    }

    let command = match positionals.as_slice() {
        [token] if token == SELF_TEST_TOKEN => Command::SelfTest,
        [token, ..] if token == SELF_TEST_TOKEN => {
            return Err(format!("error: '{SELF_TEST_TOKEN}' takes no further arguments"));
        }
        [text, pattern] => Command::Match { text: text.clone(), pattern: pattern.clone() },
        [] => return Err(format!("error: no input provided\n\n{}", help_text())),
        _ => return Err(format!("error: expected <text> <pattern>, got {} arguments", positionals.len())),
    };

    Ok(CliConfig { command, engine, collapse, verbose, trace, color })
}

fn run_match(config: &CliConfig, text: &str, pattern: &str) -> i32 {
    let options = Options {
        engine: config.engine.primary(),
        collapse_redundant: config.collapse,
        trace_limit: if config.verbose { TRACE_SAMPLE } else { 0 },
    };

    // Tracing prints automaton transitions, so the automaton has to run.
    let res = if config.trace {
        let engines = config.engine.set() | EngineSet::BACKTRACKING;
        match_verbose_traced(text, pattern, &options, engines, DebugTrace)
    } else {
        match_verbose_with(text, pattern, &options, config.engine.set())
    };

    let res = match res {
        Ok(res) => res,
        Err(err) => {
            eprintln!("error: {err}");
            return 2;
        }
    };

    if config.verbose {
        debug_report::print_run(&res, config.color);
    }
    println!("{}", res.matched);

    if !res.agree {
        eprintln!("error: engines disagree on text \"{text}\" and pattern \"{pattern}\"");
        return 1;
    }
    0
}

fn self_test(config: &CliConfig) -> i32 {
    let report = run_self_test();
    debug_report::print_self_test(&report, config.color);
    if report.passed() { 0 } else { 1 }
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "regmatch {version}

Anchored '.'/'*' pattern matcher.

Usage:
  regmatch [OPTIONS] [--] <text> <pattern>
  regmatch [OPTIONS] {token}

Prints `true` if all of <text> matches <pattern>, `false` otherwise.
'.' matches any one character, 'x*' matches zero or more of the atom before it.
`{token}` runs the built-in regression scenarios against both engines.

Options:
  --engine <name>            backtrack (default), memo, or both. With `both`
                             the answers are cross-checked.
  --no-collapse              Keep redundant repeat atoms (e.g. a*a*) when compiling.
  -v, --verbose              Print atoms, per-engine metrics and a transition sample.
  --trace                    Print every automaton transition to stderr. Runs the
                             backtracking engine even with `--engine memo`.
                             Also enabled by REGMATCH_DEBUG=1.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Self-test failure or engines disagree.
  2  Invalid arguments or invalid pattern.
",
        version = env!("CARGO_PKG_VERSION"),
        token = SELF_TEST_TOKEN
    )
}
