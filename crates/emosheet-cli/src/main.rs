use emosheet::render::raster::{self, RasterError, RasterOptions};
use emosheet::render::{
    NotesSource, Portrait, SheetConfig, SheetError, SheetRenderer, ThemeKey,
    default_export_file_name,
};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Sheet(SheetError),
    Raster(RasterError),
    Config(emosheet_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Sheet(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Config(err) => write!(f, "config error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SheetError> for CliError {
    fn from(value: SheetError) -> Self {
        Self::Sheet(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<emosheet_render::Error> for CliError {
    fn from(value: emosheet_render::Error) -> Self {
        Self::Config(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    Extract,
    Layout,
    #[default]
    Render,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RenderFormat {
    Svg,
    #[default]
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
            RenderFormat::Jpeg => "jpg",
            RenderFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    config: Option<String>,
    theme: Option<ThemeKey>,
    width: Option<f64>,
    height: Option<f64>,
    portrait: Option<String>,
    notes: Option<String>,
    notes_from_memo: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    sheet_id: Option<String>,
    out: Option<String>,
}

fn usage() -> String {
    "emosheet-cli\n\
\n\
USAGE:\n\
  emosheet-cli extract [--pretty] [<path>|-]\n\
  emosheet-cli layout [--pretty] [--config <path>] [--width <w>] [--height <h>]\n\
  emosheet-cli [render] [--format png|jpg|pdf|svg] [--theme standard|dark|pastel|noir] [--portrait <image>] [--notes <path>] [--notes-from-memo] [--config <path>] [--width <w>] [--height <h>] [--scale <n>] [--background <color>] [--id <sheet-id>] [--out <path>|-] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the character JSON is read from stdin.\n\
  - extract prints the extracted character model as JSON.\n\
  - layout prints the sheet geometry for the configured canvas as JSON.\n\
  - render writes PNG by default, to ./<export_prefix>_<unix-millis>.png unless --out is given.\n\
  - SVG output goes to stdout unless --out is given.\n\
  - Flags override values from --config.\n\
  - Set RUST_LOG (e.g. RUST_LOG=emosheet_render=debug) for diagnostics on stderr.\n\
"
    .to_string()
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or_else(|| CliError::Usage(usage()))
}

fn parse_dimension(raw: &str) -> Result<f64, CliError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(CliError::Usage(usage())),
    }
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "extract" => args.command = Command::Extract,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--notes-from-memo" => args.notes_from_memo = true,
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--theme" => {
                let key = next_value(&mut it)?;
                let theme = key
                    .parse::<ThemeKey>()
                    .map_err(|err| CliError::Usage(format!("{err}\n\n{}", usage())))?;
                args.theme = Some(theme);
            }
            "--width" => args.width = Some(parse_dimension(next_value(&mut it)?)?),
            "--height" => args.height = Some(parse_dimension(next_value(&mut it)?)?),
            "--portrait" => args.portrait = Some(next_value(&mut it)?.clone()),
            "--notes" => args.notes = Some(next_value(&mut it)?.clone()),
            "--format" => {
                args.render_format = next_value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let scale = next_value(&mut it)?;
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let bg = next_value(&mut it)?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => args.sheet_id = Some(next_value(&mut it)?.clone()),
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.notes.is_some() && args.notes_from_memo {
        return Err(CliError::Usage(format!(
            "--notes and --notes-from-memo are mutually exclusive\n\n{}",
            usage()
        )));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

/// Config file values first, then command line overrides.
fn load_config(args: &Args) -> Result<SheetConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => SheetConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SheetConfig::default(),
    };
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    if let Some(width) = args.width {
        config.canvas_width = width;
    }
    if let Some(height) = args.height {
        config.canvas_height = height;
    }
    tracing::debug!(?config, "effective sheet config");
    Ok(config)
}

fn load_portrait(path: Option<&str>) -> Result<Option<Portrait>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = std::fs::read(path)?;
    Ok(Some(raster::decode_portrait(&bytes)?))
}

fn default_out_path(config: &SheetConfig, format: RenderFormat) -> PathBuf {
    let name = default_export_file_name(&config.export_prefix);
    PathBuf::from(name).with_extension(format.extension())
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let mut renderer = SheetRenderer::from_config(&config);

    if args.command == Command::Layout {
        let layout = renderer.layout_sync()?;
        return write_json(&layout, args.pretty);
    }

    let text = read_input(args.input.as_deref())?;
    let model = renderer.parse_sync(&text)?;
    if args.command == Command::Extract {
        return write_json(&model, args.pretty);
    }

    renderer.notes = if args.notes_from_memo {
        NotesSource::Memo
    } else if let Some(path) = args.notes.as_deref() {
        NotesSource::Text(std::fs::read_to_string(path)?)
    } else {
        NotesSource::None
    };
    if let Some(id) = args.sheet_id.as_deref() {
        renderer = renderer.with_sheet_id(id);
    }

    let portrait = load_portrait(args.portrait.as_deref())?;
    let scene = renderer.render_model(&model, portrait.as_ref())?;
    let svg = emosheet_render::svg::render_scene_svg(&scene, &renderer.svg);

    let raster_options = RasterOptions {
        scale: args.render_scale,
        background: args.background.clone(),
        ..Default::default()
    };
    let bytes = match args.render_format {
        RenderFormat::Svg => {
            match args.out.as_deref() {
                None | Some("-") => print!("{svg}"),
                Some(path) => std::fs::write(path, &svg)?,
            }
            return Ok(());
        }
        RenderFormat::Png => raster::svg_to_png(&svg, &raster_options)?,
        RenderFormat::Jpeg => raster::svg_to_jpeg(&svg, &raster_options)?,
        RenderFormat::Pdf => raster::svg_to_pdf(&svg)?,
    };

    let out = args.out.clone().unwrap_or_else(|| {
        default_out_path(&config, args.render_format)
            .to_string_lossy()
            .to_string()
    });
    tracing::debug!(out = %out, bytes = bytes.len(), "writing sheet");
    write_bytes(&bytes, &out)
}

fn init_tracing() {
    // stdout carries SVG/JSON/image output, so diagnostics go to stderr.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

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

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(rest: &[&str]) -> Vec<String> {
        std::iter::once("emosheet-cli")
            .chain(rest.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn render_is_the_default_command() {
        let args = parse_args(&argv(&["pc.json"])).unwrap();
        assert_eq!(args.command, Command::Render);
        assert_eq!(args.render_format, RenderFormat::Png);
        assert_eq!(args.input.as_deref(), Some("pc.json"));
    }

    #[test]
    fn flags_are_parsed() {
        let args = parse_args(&argv(&[
            "render",
            "--theme",
            "noir",
            "--width",
            "1600",
            "--format",
            "jpeg",
            "--notes-from-memo",
            "-",
        ]))
        .unwrap();
        assert_eq!(args.theme, Some(ThemeKey::Noir));
        assert_eq!(args.width, Some(1600.0));
        assert_eq!(args.render_format, RenderFormat::Jpeg);
        assert!(args.notes_from_memo);
        assert_eq!(args.input.as_deref(), Some("-"));
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        for bad in [
            &["--theme", "sepia"][..],
            &["--width", "-3"],
            &["--scale", "0"],
            &["--format", "gif"],
            &["--frobnicate"],
            &["a.json", "b.json"],
            &["--notes", "n.txt", "--notes-from-memo"],
            &["--out"],
        ] {
            assert!(
                matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn flags_override_config_values() {
        let args = Args {
            theme: Some(ThemeKey::Pastel),
            height: Some(1200.0),
            ..Default::default()
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.theme, ThemeKey::Pastel);
        assert_eq!(config.canvas_width, 1500.0);
        assert_eq!(config.canvas_height, 1200.0);
    }

    #[test]
    fn default_out_path_uses_export_prefix_and_format() {
        let config = SheetConfig::default();
        let png = default_out_path(&config, RenderFormat::Png);
        let name = png.to_string_lossy();
        assert!(name.starts_with("emoklore_sheet_") && name.ends_with(".png"), "{name}");
        let pdf = default_out_path(&config, RenderFormat::Pdf);
        assert_eq!(pdf.extension().and_then(|e| e.to_str()), Some("pdf"));
    }
}
