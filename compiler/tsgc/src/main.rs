//! TSelfGeneric analyzer CLI

use std::io::IsTerminal;

use tsgc::commands::{check_paths, explain_rule, fix_paths, parse_check_args, parse_fix_args};
use tsgc::DriverError;

/// Exit code when `check` reported findings.
const EXIT_FINDINGS: i32 = 1;
/// Exit code for usage and I/O errors.
const EXIT_ERROR: i32 = 2;

fn main() {
    tsgc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let rest = &args[2..];

    let code = match command.as_str() {
        "check" => run_check(rest),
        "fix" => run_fix(rest),
        "explain" | "--explain" => {
            let [code] = rest else {
                eprintln!("Usage: tsgc explain <RULE_CODE>");
                eprintln!("Example: tsgc explain TSG2");
                std::process::exit(EXIT_ERROR);
            };
            report(explain_rule(code, std::io::stdout().lock()).map(|()| 0))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-V" => {
            println!("tsgc {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}

fn run_check(args: &[String]) -> i32 {
    let result = parse_check_args(args).and_then(|(paths, options)| {
        let stdout = std::io::stdout();
        let is_tty = stdout.is_terminal();
        check_paths(&paths, &options, stdout.lock(), is_tty)
    });
    report(result.map(|summary| {
        if summary.has_findings() {
            EXIT_FINDINGS
        } else {
            0
        }
    }))
}

fn run_fix(args: &[String]) -> i32 {
    let result = parse_fix_args(args)
        .and_then(|(paths, options)| fix_paths(&paths, &options, std::io::stdout().lock()));
    report(result.map(|_| 0))
}

fn report(result: Result<i32, DriverError>) -> i32 {
    match result {
        Ok(code) => code,
        Err(err @ DriverError::Usage(_)) => {
            eprintln!("error: {err}");
            eprintln!("Run `tsgc help` for usage.");
            EXIT_ERROR
        }
        Err(err) => {
            eprintln!("error: {err}");
            EXIT_ERROR
        }
    }
}

fn print_usage() {
    println!("TSelfGeneric analyzer");
    println!();
    println!("Usage: tsgc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check [paths...]     Report self-type violations (TSG1, TSG2)");
    println!("  fix [paths...]       Apply code fixes and rewrite the files");
    println!("  explain <code>       Explain a rule (e.g., TSG2)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Check options:");
    println!("  --format=<fmt>      Output: terminal (default), json, sarif");
    println!("  --color=<mode>      Color: auto (default), always, never");
    println!();
    println!("Fix options:");
    println!("  --fix=<key>         Only apply this fix kind:");
    println!("                        TSelfNestedFixProviderName      rename to the self name");
    println!("                        TSelfNestedFixProviderAttribute add the marker attribute");
    println!("                        CodeFixTSelfSelf                pass the declaring type");
    println!("  --dry-run           List files that would change without writing them");
    println!();
    println!("Paths default to the current directory; directories are searched for *.cs.");
    println!("Rule options are read from .editorconfig files:");
    println!("  dotnet_tselfgeneric.tself_param_name = TSelf");
    println!("  dotnet_tselfgeneric.tself_param_name.enable = true");
    println!("  dotnet_tselfgeneric.tself_attribute_name = TSelfAttribute");
    println!("  dotnet_tselfgeneric.tself_attribute_name.enable = false");
    println!("  dotnet_diagnostic.TSG2.severity = error");
    println!();
    println!("Logging: RUST_LOG=debug enables tracing; TSG_LOG_TREE=1 prints span trees.");
}
