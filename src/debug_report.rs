use regmatch::{CursorSnapshot, EngineMetrics, EngineReport, Expectation, MatchResultVerbose, SelfTestReport};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Print a verbose match run to stderr. The bare `true`/`false` answer stays
/// on stdout so scripts can keep reading it.
pub fn print_run(res: &MatchResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    eprintln!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Matching: \"{}\" ~ \"{}\"", res.text, res.pattern), ansi::CYAN))
    );

    eprintln!("\n{}", palette.paint("━━━ Compile ━━━", ansi::GRAY));
    eprintln!(
        "  atoms: {}  {}",
        palette.paint(&res.details.atoms, ansi::BLUE),
        palette.dim(format!("({} atoms, {:?})", res.details.atom_count, res.details.compile))
    );

    eprintln!("\n{}", palette.paint("━━━ Engines ━━━", ansi::GRAY));
    for report in &res.details.engines {
        print_engine(report, &palette);
    }

    if !res.details.trace.is_empty() {
        eprintln!("\n{}", palette.paint("━━━ Trace ━━━", ansi::GRAY));
        for snapshot in &res.details.trace {
            eprintln!("  {}", fmt_snapshot(snapshot, &palette));
        }
        if res.details.trace_dropped > 0 {
            eprintln!("  {}", palette.dim(format!("... +{} more", res.details.trace_dropped)));
        }
    }

    eprintln!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    let verdict =
        if res.matched { palette.paint("✓ match", ansi::GREEN) } else { palette.paint("✗ no match", ansi::YELLOW) };
    let agreement = if res.agree {
        palette.dim("engines agree")
    } else {
        palette.bold(palette.paint("ENGINES DISAGREE", ansi::RED))
    };
    eprintln!(
        "  {}  │  {}  │  Total: {}",
        verdict,
        agreement,
        palette.paint(format!("{:?}", res.elapsed), ansi::GREEN)
    );
    eprintln!();
}

fn print_engine(report: &EngineReport, palette: &ansi::Palette) {
    let answer = if report.matched { palette.paint("true", ansi::GREEN) } else { palette.paint("false", ansi::YELLOW) };
    eprintln!(
        "  {} {}  {}",
        palette.paint(format!("{:<13}", report.engine.name()), ansi::BLUE),
        answer,
        palette.dim(format!("{:?}", report.elapsed))
    );

    let counters = match report.metrics {
        EngineMetrics::Backtracking(m) => format!(
            "steps: {}  pushes: {}  pops: {}  max stack: {}",
            m.steps, m.pushes, m.pops, m.max_stack_depth
        ),
        EngineMetrics::Memoized(m) => {
            format!("calls: {}  hits: {}  entries: {}  max depth: {}", m.calls, m.hits, m.entries, m.max_depth)
        }
    };
    eprintln!("      {}", palette.dim(counters));
}

fn fmt_snapshot(s: &CursorSnapshot, palette: &ansi::Palette) -> String {
    format!(
        "{} {} {} {}",
        palette.paint(format!("#{:<4}", s.step), ansi::GRAY),
        palette.paint(format!("{:<16}", format!("{:?}", s.state)), ansi::CYAN),
        palette.paint(format!("s={} a={}", s.string_index, s.atom_index), ansi::YELLOW),
        palette.dim(format!("stack={}", s.stack_depth))
    )
}

/// Print the self-test outcome to stdout.
pub fn print_self_test(report: &SelfTestReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint("⚙  Self-test", ansi::CYAN)));
    println!("\n{}", palette.paint("━━━ Failures ━━━", ansi::GRAY));

    if report.failures.is_empty() {
        println!("{}", palette.dim("  none"));
    }
    for failure in &report.failures {
        let expected = match failure.scenario.expected {
            Expectation::Match(b) => b.to_string(),
            Expectation::InvalidPattern => "invalid pattern".to_string(),
        };
        let got = match &failure.got {
            Ok(b) => b.to_string(),
            Err(err) => err.to_string(),
        };
        println!(
            "  {} \"{}\" ~ \"{}\"  {} {}  {} {}",
            palette.paint(format!("[{}]", failure.engine.name()), ansi::BLUE),
            failure.scenario.text,
            failure.scenario.pattern,
            palette.dim("expected:"),
            palette.paint(expected, ansi::GREEN),
            palette.dim("got:"),
            palette.paint(got, ansi::RED)
        );
    }

    println!("\n{}", palette.paint("━━━ Summary ━━━", ansi::GRAY));
    let passed = report.checks - report.failures.len();
    let summary = format!("{}/{} checks passed", passed, report.checks);
    let summary = if report.passed() { palette.paint(summary, ansi::GREEN) } else { palette.paint(summary, ansi::RED) };
    println!("  {}  │  {}", summary, palette.dim(format!("{:?}", report.elapsed)));
    println!();
}
