use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use plinth_io::{DEFAULT_TESSELLATION_TOLERANCE, export_gltf, export_obj, export_step};
use plinth_topology::{Centered, Solid, Workplane};
use plinth_view::{Color, DisplayStyle, SceneExporter, Viewer, simple_box_style};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "plinth")]
#[command(about = "Build workplane boxes and show or export them")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a box in a headless scene directory (glTF + scene.json).
    Show(ShowArgs),
    /// Export a box as STEP, OBJ or glTF, chosen by file extension.
    Export(ExportArgs),
}

#[derive(Args)]
struct BoxArgs {
    /// Length, width and height along the workplane axes.
    #[arg(long, default_value = "1,2,3")]
    size: String,
    #[arg(long, default_value = "XY")]
    plane: String,
    /// Offset of the workplane along its normal.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset: f64,
    /// Anchor the box at the workplane origin instead of centering it.
    #[arg(long)]
    corner: bool,
}

#[derive(Args)]
struct ShowArgs {
    #[command(flatten)]
    shape: BoxArgs,
    #[arg(long, default_value = "simple_box")]
    label: String,
    /// `r,g,b` in [0, 1] or `#rrggbb`.
    #[arg(long)]
    color: Option<String>,
    /// Opacity in [0, 1].
    #[arg(long)]
    alpha: Option<f64>,
    /// Style record as JSON, e.g. '{"color": [0.25, 1.0, 0.75], "alpha": 0.5}'.
    #[arg(long, conflicts_with_all = ["color", "alpha"])]
    options: Option<String>,
    #[arg(long, default_value_t = DEFAULT_TESSELLATION_TOLERANCE)]
    tolerance: f64,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    shape: BoxArgs,
    #[arg(long, default_value_t = DEFAULT_TESSELLATION_TOLERANCE)]
    tolerance: f64,
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Show(args) => show(args),
        Command::Export(args) => export(args),
    }
}

fn show(args: ShowArgs) -> Result<()> {
    let solid = build_box(&args.shape)?;
    let style = display_style(&args)?;

    let mut viewer = SceneExporter::new(&args.out).with_tolerance(args.tolerance);
    viewer.show_object(&solid, &args.label, &style)?;
    info!(dir = %args.out.display(), label = %args.label, "scene written");
    Ok(())
}

fn export(args: ExportArgs) -> Result<()> {
    let solid = build_box(&args.shape)?;
    let out = &args.out;
    match extension(out).as_deref() {
        Some("step" | "stp") => export_step(&solid, out).context("STEP export failed")?,
        Some("obj") => export_obj(&solid, out, args.tolerance).context("OBJ export failed")?,
        Some("gltf") => {
            export_gltf(&solid, out, args.tolerance, None).context("glTF export failed")?
        }
        _ => bail!(
            "unsupported output format for {} (expected .step, .stp, .obj or .gltf)",
            out.display()
        ),
    }
    info!(path = %out.display(), "export complete");
    Ok(())
}

fn build_box(args: &BoxArgs) -> Result<Solid> {
    let [length, width, height] = parse_size(&args.size)?;
    let workplane = Workplane::named(&args.plane)?
        .offset(args.offset)
        .centered(Centered::from(!args.corner));
    workplane
        .box_solid(length, width, height)
        .context("failed to build box solid")
}

/// Without any style flags the demo style applies.
fn display_style(args: &ShowArgs) -> Result<DisplayStyle> {
    if let Some(json) = &args.options {
        return Ok(DisplayStyle::from_json(json)?);
    }
    let base = simple_box_style();
    let color = match &args.color {
        Some(text) => text.parse::<Color>()?,
        None => base.color,
    };
    let alpha = args.alpha.unwrap_or(base.alpha);
    Ok(DisplayStyle::new(color, alpha)?)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn parse_size(text: &str) -> Result<[f64; 3]> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 3 {
        bail!("--size expects three comma-separated numbers, e.g. 1,2,3");
    }

    let length: f64 = parts[0].trim().parse().context("invalid length")?;
    let width: f64 = parts[1].trim().parse().context("invalid width")?;
    let height: f64 = parts[2].trim().parse().context("invalid height")?;
    Ok([length, width, height])
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show_args(extra: &[&str]) -> ShowArgs {
        let mut argv = vec!["plinth", "show", "--out", "scene"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::Show(args) => args,
            Command::Export(_) => panic!("expected show"),
        }
    }

    #[test]
    fn parse_size_accepts_three_numbers() -> Result<()> {
        assert_eq!(parse_size("1, 2,3")?, [1.0, 2.0, 3.0]);
        assert!(parse_size("1,2").is_err());
        assert!(parse_size("1,two,3").is_err());
        Ok(())
    }

    #[test]
    fn defaults_reproduce_simple_box() -> Result<()> {
        let args = show_args(&[]);
        assert_eq!(args.label, "simple_box");
        assert_eq!(display_style(&args)?, simple_box_style());
        let solid = build_box(&args.shape)?;
        assert_eq!(solid.face_iter().count(), 6);
        Ok(())
    }

    #[test]
    fn style_flags_override_defaults() -> Result<()> {
        let args = show_args(&["--color", "#ff0000", "--alpha", "1"]);
        let style = display_style(&args)?;
        assert_eq!(style.color, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(style.alpha, 1.0);

        let args = show_args(&["--options", r#"{"alpha": 0.25}"#]);
        assert_eq!(display_style(&args)?.alpha, 0.25);

        let args = show_args(&["--alpha", "3"]);
        assert!(display_style(&args).is_err());
        Ok(())
    }

    #[test]
    fn options_conflict_with_color() {
        let result = Cli::try_parse_from([
            "plinth", "show", "--out", "scene", "--options", "{}", "--color", "1,1,1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_plane_is_reported() {
        let args = show_args(&["--plane", "UV"]);
        assert!(build_box(&args.shape).is_err());
    }
}
