//! Command-line parsing.

/// One step of a run, in command-line order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Set { name: String, expr: String },
    Eval(String),
    Stdin,
}

/// A `--def NAME(A,B)=BODY` argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub params: Vec<String>,
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub actions: Vec<Action>,
    pub definitions: Vec<Definition>,
    pub dump_vars: bool,
    pub dump_sysvars: bool,
}

/// Parses the arguments after the program name. `Ok(None)` means help was
/// requested or there is nothing to do.
pub fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => return Ok(None),
            "--set" | "--def" => {
                let Some(value) = args.get(i + 1) else {
                    return Err(format!("{arg} needs an argument"));
                };
                if arg == "--set" {
                    options.actions.push(parse_set(value)?);
                } else {
                    options.definitions.push(parse_definition(value)?);
                }
                i += 2;
                continue;
            }
            "--dump-vars" => options.dump_vars = true,
            "--dump-sysvars" => options.dump_sysvars = true,
            "-" => options.actions.push(Action::Stdin),
            _ if arg.starts_with("--") => return Err(format!("unknown option `{arg}'")),
            _ => options.actions.push(Action::Eval(arg.to_string())),
        }
        i += 1;
    }

    let idle = options.actions.is_empty() && !options.dump_vars && !options.dump_sysvars;
    Ok(if idle { None } else { Some(options) })
}

fn parse_set(text: &str) -> Result<Action, String> {
    let (name, expr) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=EXPR, found `{text}'"))?;
    Ok(Action::Set {
        name: name.trim().to_string(),
        expr: expr.to_string(),
    })
}

/// `name(a, b) = body`; the body starts after the first `=` that follows
/// the closing parenthesis.
fn parse_definition(text: &str) -> Result<Definition, String> {
    let malformed = || format!("expected NAME(PARAMS)=BODY, found `{text}'");
    let (head, rest) = text.split_once(')').ok_or_else(malformed)?;
    let (name, params) = head.split_once('(').ok_or_else(malformed)?;
    let body = rest.trim_start().strip_prefix('=').ok_or_else(malformed)?;
    Ok(Definition {
        name: name.trim().to_string(),
        params: params
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        body: body.trim().to_string(),
    })
}
