use bem_class_names::{setup, Arg, BemError, Mods, Result, Settings, Setup};
use clap::Parser;
use tracing::Level;

/// Print BEM class names for a block.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Block name
    block: String,
    /// Element appended to the block name (repeatable)
    #[arg(short, long = "elem")]
    elems: Vec<String>,
    /// Modifier spec as a JSON object, e.g. '{"theme":"dark"}' (repeatable)
    #[arg(short, long = "mods")]
    mods: Vec<String>,
    /// Extra class token (repeatable)
    #[arg(long = "mix")]
    mixes: Vec<String>,
    /// State flag, `name` or `name=true|false` (repeatable)
    #[arg(short, long = "state")]
    states: Vec<String>,
    /// Settings as JSON, e.g. '{"ns":"app-","modValue":"-"}'
    #[arg(long)]
    setup: Option<String>,
    /// Namespace prefix
    #[arg(long)]
    ns: Option<String>,
    /// Element separator
    #[arg(long)]
    el: Option<String>,
    /// Modifier separator
    #[arg(long = "mod")]
    modifier: Option<String>,
    /// Modifier value separator
    #[arg(long)]
    mod_value: Option<String>,
    /// Print a JSON array of tokens instead of a class string
    #[arg(long)]
    tokens: bool,
    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_state(raw: &str) -> Result<(String, bool)> {
    match raw.split_once('=') {
        None => Ok((raw.to_string(), true)),
        Some((name, "true")) => Ok((name.to_string(), true)),
        Some((name, "false")) => Ok((name.to_string(), false)),
        Some((name, other)) => Err(BemError::InvalidState(format!(
            "`{name}` expects true or false, got `{other}`"
        ))),
    }
}

fn run(args: Args) -> Result<String> {
    if let Some(json) = args.setup.as_deref() {
        setup(Setup::from_json(json)?);
    }
    let entry = setup(Setup {
        ns: args.ns,
        el: args.el,
        modifier: args.modifier,
        mod_value: args.mod_value,
    });
    let settings = serde_json::to_string(&Settings::current())?;
    tracing::debug!(%settings, "effective settings");

    let mut parts: Vec<Arg> = args.elems.into_iter().map(Arg::from).collect();
    for json in &args.mods {
        parts.push(Mods::from_json(json)?.into());
    }
    let states = args
        .states
        .iter()
        .map(|s| parse_state(s))
        .collect::<Result<Vec<_>>>()?;

    let b = entry(&args.block)
        .apply(parts)
        .mix(args.mixes)
        .state(states);
    tracing::debug!(context = ?b.context(), "built block");

    if args.tokens {
        Ok(serde_json::to_string(&b.classes())?)
    } else {
        Ok(b.to_string())
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match run(args) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bem_class_names::reset;
    use std::sync::{Mutex, MutexGuard};

    // `run` writes the process-wide settings.
    static LOCK: Mutex<()> = Mutex::new(());

    fn serial() -> MutexGuard<'static, ()> {
        let guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
        reset();
        guard
    }

    fn run_with(argv: &[&str]) -> Result<String> {
        let args = Args::try_parse_from(std::iter::once("bemcn").chain(argv.iter().copied()))
            .unwrap();
        run(args)
    }

    #[test]
    fn prints_class_string() {
        let _guard = serial();
        let out = run_with(&["menu", "-e", "item", "-m", r#"{"theme":"dark"}"#, "-s", "open"]);
        assert_eq!(out.unwrap(), "menu__item menu__item_theme_dark is-open");
    }

    #[test]
    fn tokens_are_a_json_array() {
        let _guard = serial();
        let out = run_with(&[
            "menu", "-e", "item", "-m", r#"{"theme":"dark"}"#, "--mix", "extra", "-s", "open",
            "-s", "busy=false", "--tokens",
        ])
        .unwrap();
        assert_eq!(
            out,
            r#"["menu__item","menu__item_theme_dark","extra","is-open"]"#
        );
    }

    #[test]
    fn flags_override_setup_json() {
        let _guard = serial();
        let out = run_with(&[
            "card", "-m", r#"{"size":"l"}"#, "--setup", r#"{"ns":"a-","mod":"--"}"#, "--ns",
            "b-",
        ]);
        assert_eq!(out.unwrap(), "b-card b-card--size_l");
    }

    #[test]
    fn malformed_modifier_json_is_an_error() {
        let _guard = serial();
        let out = run_with(&["card", "-m", r#"{"size":"#]);
        assert!(matches!(out, Err(BemError::Json(_))));
    }

    #[test]
    fn bad_state_value_is_an_error() {
        let _guard = serial();
        let out = run_with(&["card", "-s", "open=yes"]);
        assert!(matches!(out, Err(BemError::InvalidState(_))));
    }

    #[test]
    fn state_flags() {
        assert_eq!(parse_state("open").unwrap(), ("open".to_string(), true));
        assert_eq!(parse_state("open=false").unwrap(), ("open".to_string(), false));
        assert!(matches!(parse_state("open=1"), Err(BemError::InvalidState(_))));
    }
}
