use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use vcf_engine::logging::{LoggingConfig, init_logging};
use vcf_engine::paint::{ColorInt, Fill, FillSource, Shader};
use vcf_res::{DisplayMetrics, GradientColor, Resources};

/// Inflate a gradient color resource and show the shader it produces.
#[derive(Debug, Parser)]
#[command(name = "vcf-inspect", version)]
struct Args {
    /// Path to a `<gradient>` XML file.
    path: PathBuf,

    /// Target display density in dpi (160 = 1 px per dip).
    #[arg(long, default_value_t = 160)]
    density_dpi: u32,

    /// Log filter in `env_logger` syntax, e.g. `vcf_res=trace`.
    #[arg(long)]
    log: Option<String>,

    /// Theme attribute for `?attr/` references, as `name=value`. Repeatable.
    #[arg(long = "attr", value_parser = parse_key_value)]
    attrs: Vec<(String, String)>,

    /// Color resource for `@color/` references, as `name=#AARRGGBB`. Repeatable.
    #[arg(long = "color", value_parser = parse_key_value)]
    colors: Vec<(String, String)>,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got {s:?}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log.clone().map(LoggingConfig::with_filter).unwrap_or_default());

    let mut res = Resources::new(DisplayMetrics::from_density_dpi(args.density_dpi));
    for (name, hex) in &args.colors {
        let color = ColorInt::parse_hex(hex)
            .with_context(|| format!("invalid color {hex:?} for @color/{name}"))?;
        res.set_color(name.clone(), color);
    }

    let name = args
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "gradient".to_string());
    let id = res.add_xml_file(name, args.path.clone());

    let mut theme = res.new_theme();
    for (attr, value) in &args.attrs {
        theme.set_attr(attr.clone(), value.clone());
    }

    let gradient = GradientColor::try_create_from_xml(&res, id, &theme)
        .with_context(|| format!("failed to load {}", args.path.display()))?;

    println!("type   {}", gradient.gradient_type());
    println!("start  {}", gradient.start());
    println!("end    {}", gradient.end());
    println!("items  {}", gradient.items().len());
    for item in gradient.items() {
        println!("  {}  offset {}", item.color, item.offset);
    }

    let shader = match gradient.derive_shader() {
        Ok(shader) => shader,
        Err(err) => bail!(err),
    };

    let mut fill = Fill::new();
    fill.set_shader(shader);
    match fill.source() {
        Some(FillSource::Shader(Shader::LinearGradient(shader))) => {
            println!();
            println!("linear shader, tile mode {:?}", shader.tile_mode);
            println!("opaque {}", fill.shader().is_some_and(|s| s.is_opaque()));
            if !shader.is_valid() {
                log::warn!("shader is not drawable as-is (needs 2+ colors and a non-degenerate axis)");
            }
            for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
                println!("  t={t:<4}  {}", shader.color_at(t));
            }
        }
        Some(FillSource::Color(color)) => println!("solid fill {color}"),
        None => println!("nothing to fill"),
    }

    Ok(())
}
