//! Reminder expression CLI
//!
//! Evaluates expressions against one environment and prints each value.

mod args;

use std::io::BufRead;

use rem_eval::{Environment, EvalError, HostState, Interpreter, UserFunctionTable, Value};

use args::{parse_args, Action, Options};

/// Initialize tracing for debug output.
///
/// Enabled only when `RUST_LOG` is set, e.g. `RUST_LOG=rem_eval=debug`.
/// Set `REMC_LOG_TREE` to get indented span trees instead of flat lines.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_err() {
        return;
    }
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if std::env::var_os("REMC_LOG_TREE").is_some() {
        registry
            .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn print_usage() {
    println!("Usage: remc [options] EXPR...");
    println!();
    println!("Evaluates each EXPR in order and prints its value.");
    println!();
    println!("Options:");
    println!("  --set NAME=EXPR        Evaluate EXPR and assign it to variable NAME");
    println!("  --def NAME(A,B)=BODY   Define a user function");
    println!("  --dump-vars            Print all variables when done");
    println!("  --dump-sysvars         Print all system variables when done");
    println!("  -                      Read expressions from stdin, one per line");
    println!("  -h, --help             Show this help");
}

fn report(err: &EvalError) {
    eprintln!("error[{}]: {err}", err.code());
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("Run `remc --help` for usage.");
            std::process::exit(2);
        }
    };

    tracing::debug!(
        actions = options.actions.len(),
        definitions = options.definitions.len(),
        "parsed arguments"
    );
    if !run(&options) {
        std::process::exit(1);
    }
}

/// Runs every action; returns `false` if anything failed.
fn run(options: &Options) -> bool {
    let mut ok = true;

    let mut functions = UserFunctionTable::new();
    for def in &options.definitions {
        if let Err(err) = functions.define(&def.name, def.params.as_slice(), &def.body) {
            eprintln!("in definition of {}:", def.name);
            report(&err);
            ok = false;
        }
    }

    let mut env = Environment::new(HostState::from_system_clock());
    let mut interp = Interpreter::builder(&mut env).user_functions(&functions).build();

    for action in &options.actions {
        match action {
            Action::Set { name, expr } => ok &= assign(&mut interp, name, expr),
            Action::Eval(expr) => ok &= print_value(&mut interp, expr),
            Action::Stdin => {
                for line in std::io::stdin().lock().lines() {
                    let line = match line {
                        Ok(line) => line,
                        Err(err) => {
                            eprintln!("error: reading stdin: {err}");
                            ok = false;
                            break;
                        }
                    };
                    let expr = line.trim();
                    if expr.is_empty() || expr.starts_with('#') {
                        continue;
                    }
                    ok &= print_value(&mut interp, expr);
                }
            }
        }
    }

    let env = interp.env();
    if options.dump_vars {
        for var in env.variables.iter() {
            let shown = var.value.print_form(env.host.separators);
            let mark = if var.preserve { " (preserved)" } else { "" };
            println!("{:<12}  {shown}{mark}", var.name());
        }
    }
    if options.dump_sysvars {
        for line in env.sysvars.dump_lines(&env.host) {
            println!("{line}");
        }
    }
    ok
}

fn print_value(interp: &mut Interpreter<'_>, expr: &str) -> bool {
    match interp.eval_str(expr) {
        Ok(value) => {
            println!("{}", value.print_form(interp.env().host.separators));
            true
        }
        Err(err) => {
            report(&err);
            false
        }
    }
}

fn assign(interp: &mut Interpreter<'_>, name: &str, expr: &str) -> bool {
    let result = interp
        .eval_str(expr)
        .and_then(|value| store(interp.env_mut(), name, value));
    match result {
        Ok(()) => true,
        Err(err) => {
            eprintln!("in --set {name}:");
            report(&err);
            false
        }
    }
}

/// `--set` target: `$Name` assigns a system variable, anything else a
/// global variable.
fn store(env: &mut Environment, name: &str, value: Value) -> Result<(), EvalError> {
    match name.strip_prefix('$') {
        Some(sysvar) => env.set_sysvar(sysvar, value),
        None => env.variables.set(name, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dollar_names_set_system_variables() {
        let mut env = Environment::default();
        assert_eq!(store(&mut env, "$MaxStringLen", Value::Int(10)), Ok(()));
        assert_eq!(env.host.max_string_len, 10);
        assert_eq!(env.sysvar("MaxStringLen"), Ok(Value::Int(10)));
    }

    #[test]
    fn read_only_system_variables_are_refused() {
        let mut env = Environment::default();
        assert_eq!(
            store(&mut env, "$RunOff", Value::Int(1)),
            Err(EvalError::CantModify("RunOff".into()))
        );
    }

    #[test]
    fn plain_names_set_globals() {
        let mut env = Environment::default();
        assert_eq!(store(&mut env, "limit", Value::Int(10)), Ok(()));
        assert_eq!(env.variables.get("limit"), Some(&Value::Int(10)));
        assert_eq!(env.host.max_string_len, rem_eval::DEFAULT_MAX_STRING_LEN);
    }
}
