use anyhow::{Context, Result, anyhow, bail};
use canvas_blocks_config::Config;
use canvas_blocks_engine::{Controller, Span, io, parsing::snapshot};
use std::{env, path::PathBuf, process};

const USAGE: &str = "Usage: canvas-blocks-cli [--no-normalize] <file> [START..END=TEXT]...";

/// One `START..END=TEXT` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScriptedEdit {
    range: Span,
    text: String,
}

impl ScriptedEdit {
    fn parse(arg: &str) -> Result<Self> {
        let (range, text) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("edit '{arg}' is missing '='"))?;
        let (start, end) = range
            .split_once("..")
            .ok_or_else(|| anyhow!("edit range '{range}' is not START..END"))?;
        let start = start
            .parse()
            .with_context(|| format!("bad start offset in '{arg}'"))?;
        let end = end
            .parse()
            .with_context(|| format!("bad end offset in '{arg}'"))?;
        Ok(Self {
            range: Span::new(start, end),
            text: unescape(text),
        })
    }

    /// Whether `arg` has the shape of an edit rather than a file name.
    fn looks_like_edit(arg: &str) -> bool {
        arg.split_once('=').is_some_and(|(range, _)| {
            range
                .split_once("..")
                .is_some_and(|(s, e)| is_number(s) && is_number(e))
        })
    }
}

impl std::fmt::Display for ScriptedEdit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={:?}", self.range, self.text)
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Expands `\n`, `\t` and `\\` escapes.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Invocation {
    file: Option<PathBuf>,
    edits: Vec<ScriptedEdit>,
    no_normalize: bool,
}

fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut invocation = Invocation::default();
    for arg in args {
        if arg == "--no-normalize" {
            invocation.no_normalize = true;
        } else if arg.starts_with("--") {
            bail!("unknown option '{arg}'");
        } else if ScriptedEdit::looks_like_edit(arg) {
            invocation.edits.push(ScriptedEdit::parse(arg)?);
        } else if invocation.file.is_none() {
            invocation.file = Some(PathBuf::from(arg));
        } else {
            bail!("unexpected argument '{arg}'");
        }
    }
    Ok(invocation)
}

fn init_logging(config: &Config) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if let Some(level) = &config.log_level {
        builder.parse_filters(level);
    }
    builder.parse_default_env().init();
}

fn run(invocation: Invocation, config: &Config) -> Result<()> {
    let path = invocation
        .file
        .or_else(|| config.default_file.clone())
        .ok_or_else(|| anyhow!("no file given and no default_file in config"))?;

    let mut options = config.controller_options();
    if invocation.no_normalize {
        options.normalize_block_breaks = false;
    }

    let text = io::read_document(&path)?;
    let mut doc = Controller::with_options(options, &text);
    log::info!(
        "Loaded {} with {} blocks",
        path.display(),
        doc.blocks().len()
    );

    for edit in &invocation.edits {
        let patch = doc
            .try_replace_characters(edit.range, &edit.text)
            .with_context(|| format!("applying edit {edit}"))?;
        println!("# {edit}");
        println!("{}", patch.log());
    }

    for (i, block) in doc.blocks().iter().enumerate() {
        println!(
            "{}",
            snapshot::render_block(doc.rope(), i, block, config.preview_width)
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    init_logging(&config);
    log::debug!("Config path: {}", Config::config_path().display());

    let invocation = match parse_args(&args[1..]) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    run(invocation, &config)
}
