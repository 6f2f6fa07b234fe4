use archflow::render::{
    ActivationMode, DiagramRenderer, HeadlessError, SceneOptions, SvgOptions, render_svg_sync,
};
use archflow::{ArchitectureDefinition, Engine, LoadOptions, Playback, PlaybackOptions};
use serde::Serialize;
use std::io::Read;
use std::time::Instant;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Load(archflow::Error),
    Render(HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Load(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<archflow::Error> for CliError {
    fn from(value: archflow::Error) -> Self {
        Self::Load(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    List,
    Info,
    Render,
    Frames,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    /// Catalog id (info/render/frames) or free filter text (list).
    target: Option<String>,
    input: Option<String>,
    pretty: bool,
    json: bool,
    strict: bool,
    staged: bool,
    step: Option<usize>,
    background: Option<String>,
    no_icons: bool,
    category: Option<String>,
    tag: Option<String>,
    out: Option<String>,
    out_dir: Option<String>,
}

fn usage() -> &'static str {
    "archflow-cli\n\
\n\
USAGE:\n\
  archflow-cli list [--json] [--category <name>] [--tag <tag>] [<query>]\n\
  archflow-cli info <id> [--pretty]\n\
  archflow-cli render [<id>] [--file <path>|-] [--staged --step <n>] [--background <css-color>] [--no-icons] [--strict] [--out <path>]\n\
  archflow-cli frames [<id>] [--file <path>|-] [--out-dir <dir>]\n\
\n\
NOTES:\n\
  - render/frames take either a built-in catalog <id> or --file with a\n\
    JSON/JSON5 definition ('-' reads stdin).\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - --staged highlights only the connections of --step (default 0).\n\
  - --strict fails on dangling service references instead of skipping them.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut command_seen = false;

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "list" | "info" | "render" | "frames" if !command_seen => {
                command_seen = true;
                args.command = match a.as_str() {
                    "list" => Command::List,
                    "info" => Command::Info,
                    "render" => Command::Render,
                    _ => Command::Frames,
                };
            }
            "--pretty" => args.pretty = true,
            "--json" => args.json = true,
            "--strict" => args.strict = true,
            "--staged" => args.staged = true,
            "--no-icons" => args.no_icons = true,
            "--step" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.step = Some(v.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--category" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.category = Some(v.clone());
            }
            "--tag" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.tag = Some(v.clone());
            }
            "--file" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.input = Some(v.clone());
            }
            "--out" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(v.clone());
            }
            "--out-dir" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = Some(v.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            value => {
                if args.target.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.target = Some(value.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ListRow<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
    steps: usize,
    tags: &'a [String],
}

fn run_list(engine: &Engine, args: &Args) -> Result<(), CliError> {
    let registry = engine.registry();

    let mut rows: Vec<&ArchitectureDefinition> = match (&args.category, &args.tag) {
        (Some(c), _) => {
            let category = serde_json::from_value(serde_json::Value::String(c.clone()))
                .map_err(|_| CliError::Usage(usage()))?;
            registry.by_category(category)
        }
        (None, Some(t)) => registry.by_tag(t),
        (None, None) => registry.iter().collect(),
    };
    if let Some(query) = &args.target {
        let query = query.to_lowercase();
        rows.retain(|d| {
            d.name.to_lowercase().contains(&query)
                || d.description.to_lowercase().contains(&query)
                || d.tags.iter().any(|t| t.to_lowercase().contains(&query))
        });
    }

    if args.json {
        let out: Vec<ListRow<'_>> = rows
            .iter()
            .map(|def| ListRow {
                id: &def.id,
                name: &def.name,
                category: def.category.label(),
                steps: def.total_steps(),
                tags: &def.tags,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for def in rows {
        println!(
            "{:<28} {:<14} {:>3} steps  {}",
            def.id,
            def.category.label(),
            def.total_steps(),
            def.name
        );
    }
    Ok(())
}

fn run_info(engine: &Engine, args: &Args) -> Result<(), CliError> {
    let Some(id) = &args.target else {
        return Err(CliError::Usage(usage()));
    };
    let definition = engine.architecture(id)?;
    let text = if args.pretty {
        serde_json::to_string_pretty(definition)?
    } else {
        serde_json::to_string(definition)?
    };
    println!("{text}");
    Ok(())
}

fn resolve_definition(engine: &Engine, args: &Args) -> Result<ArchitectureDefinition, CliError> {
    let load = if args.strict {
        LoadOptions::strict()
    } else {
        LoadOptions::lenient()
    };
    match (&args.target, &args.input) {
        (Some(id), None) => Ok(engine.architecture(id)?.clone()),
        (None, Some(input)) => {
            let text = read_input(input)?;
            Ok(engine.load_definition_sync(&text, load)?)
        }
        _ => Err(CliError::Usage(usage())),
    }
}

fn run_render(engine: &Engine, args: &Args) -> Result<(), CliError> {
    let definition = resolve_definition(engine, args)?;

    let scene_options = SceneOptions {
        activation: if args.staged {
            ActivationMode::Staged
        } else {
            ActivationMode::Global
        },
    };
    let svg_options = SvgOptions {
        background: args.background.clone(),
        include_icons: !args.no_icons,
    };

    // A synthetic snapshot pinned at the requested step; playback itself is
    // clock-free so this is just an idle machine positioned with go_to_step.
    let state = if args.staged {
        let mut playback = Playback::new(PlaybackOptions {
            total_steps: definition.total_steps(),
            ..PlaybackOptions::default()
        });
        playback.go_to_step(Instant::now(), args.step.unwrap_or(0));
        Some(playback.state())
    } else {
        None
    };

    let svg = render_svg_sync(&definition, state.as_ref(), &scene_options, &svg_options)?;
    write_text(&svg, args.out.as_deref())
}

fn run_frames(engine: &Engine, args: &Args) -> Result<(), CliError> {
    let definition = resolve_definition(engine, args)?;
    // The definition is already resolved; no catalog needed here.
    let renderer = DiagramRenderer {
        engine: Engine::empty(),
        load: LoadOptions::default(),
        scene: SceneOptions::default(),
        svg: SvgOptions::default(),
    };
    let frames = renderer.render_frames_sync(&definition)?;

    let dir = std::path::PathBuf::from(args.out_dir.as_deref().unwrap_or("frames"));
    std::fs::create_dir_all(&dir)?;
    for (i, frame) in frames.iter().enumerate() {
        let path = dir.join(format!("{}-{i:03}.svg", definition.id));
        std::fs::write(&path, frame)?;
    }
    println!("wrote {} frames to {}", frames.len(), dir.display());
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let engine = Engine::new();
    match args.command {
        Command::List => run_list(&engine, &args),
        Command::Info => run_info(&engine, &args),
        Command::Render => run_render(&engine, &args),
        Command::Frames => run_frames(&engine, &args),
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("archflow-cli")
            .chain(parts.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn defaults_to_list() {
        let args = parse_args(&argv(&[])).unwrap();
        assert!(matches!(args.command, Command::List));
    }

    #[test]
    fn parses_render_flags() {
        let args = parse_args(&argv(&[
            "render",
            "event-driven-orders",
            "--staged",
            "--step",
            "2",
            "--no-icons",
        ]))
        .unwrap();
        assert!(matches!(args.command, Command::Render));
        assert_eq!(args.target.as_deref(), Some("event-driven-orders"));
        assert!(args.staged);
        assert_eq!(args.step, Some(2));
        assert!(args.no_icons);
    }

    #[test]
    fn rejects_unknown_flags_and_double_targets() {
        assert!(matches!(
            parse_args(&argv(&["render", "--bogus"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["info", "a", "b"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn stdin_dash_is_not_treated_as_a_flag() {
        let args = parse_args(&argv(&["render", "--file", "-"])).unwrap();
        assert_eq!(args.input.as_deref(), Some("-"));
    }
}
