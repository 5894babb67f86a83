use crate::config::load_config;
use crate::render::{place_labels, plot_rect, render_svg, write_output_svg};
use crate::series::{build_bands, parse_chart};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "bandlabel",
    version,
    about = "Labels stacked area charts with the largest text that fits each band"
)]
pub struct Args {
    /// Chart JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, fit and render sections)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width, overriding the config
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height, overriding the config
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Fractional label padding on all four sides, overriding the config
    #[arg(short = 'p', long = "padding")]
    pub padding: Option<f32>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(padding) = args.padding {
        config.fit.padding_left = padding;
        config.fit.padding_right = padding;
        config.fit.padding_top = padding;
        config.fit.padding_bottom = padding;
    }

    let input = read_input(args.input.as_deref())?;
    let chart = parse_chart(&input)?;
    let bands = build_bands(&chart, plot_rect(&config.render));
    let labels = place_labels(&bands, &config);
    let svg = render_svg(&bands, &labels, &config.theme, &config.render);

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &config)?;
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &crate::config::Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &crate::config::Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output is not available in this build; rebuild with the png feature"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_argument_forms() {
        let args = Args::try_parse_from([
            "bandlabel", "-i", "chart.json", "-e", "png", "-o", "out.png", "-w", "640",
        ])
        .expect("args should parse");
        assert_eq!(args.input.as_deref(), Some(Path::new("chart.json")));
        assert!(matches!(args.output_format, OutputFormat::Png));
        assert_eq!(args.width, Some(640.0));
        assert_eq!(args.height, None);
    }

    #[test]
    fn padding_shorthand_parses_as_a_fraction() {
        let args = Args::try_parse_from(["bandlabel", "-p", "0.25"]).expect("args should parse");
        assert_eq!(args.padding, Some(0.25));
    }

    #[test]
    fn output_format_defaults_to_svg() {
        let args = Args::try_parse_from(["bandlabel"]).expect("bare args should parse");
        assert!(matches!(args.output_format, OutputFormat::Svg));
    }

    #[test]
    fn png_output_requires_a_path() {
        let err = ensure_output(&None, "png").unwrap_err();
        assert!(err.to_string().contains("png"));
        let path = ensure_output(&Some(PathBuf::from("x.png")), "png").expect("explicit path");
        assert_eq!(path, PathBuf::from("x.png"));
    }
}
