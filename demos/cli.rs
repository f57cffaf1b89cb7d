//! Command-line interface for vibecolor
//!
//! Basic CLI tool for generating palettes and checking contrast

use std::{env, fs, path::Path, process};
use vibecolor::export::{to_css_variables, to_json};
use vibecolor::{
    AnalyzeColorRequest, EngineConfig, ExtractColorsRequest, GeneratePaletteRequest, Palette, PaletteError,
    PaletteGenerator, RefinePaletteRequest,
};

#[derive(Clone, Copy, PartialEq)]
enum OutputFormat {
    Json,
    Css,
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cli");

    let mut num_colors = 5;
    let mut format = OutputFormat::Json;
    let mut config_path = None;
    let mut positional = Vec::new();

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--colors" | "-n" => {
                i += 1;
                num_colors = match args.get(i).and_then(|v| v.parse().ok()) {
                    Some(n) => n,
                    None => fail_usage(program, "--colors expects a number"),
                };
            }
            "--format" => {
                i += 1;
                format = match args.get(i).map(String::as_str) {
                    Some("json") => OutputFormat::Json,
                    Some("css") => OutputFormat::Css,
                    _ => fail_usage(program, "--format expects json or css"),
                };
            }
            "--config" => {
                i += 1;
                config_path = match args.get(i) {
                    Some(path) => Some(path.clone()),
                    None => fail_usage(program, "--config expects a file path"),
                };
            }
            "--help" | "-h" => {
                print_help(program);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => positional.push(arg.to_string()),
            other => fail_usage(program, &format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let generator = match load_config(config_path.as_deref()).and_then(PaletteGenerator::try_new) {
        Ok(generator) => generator,
        Err(error) => exit_with(&error),
    };
    eprintln!("Analysis provider: {}", generator.provider_name());

    let result = match positional.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["prompt", words @ ..] if !words.is_empty() => generator
            .handle_generate(&GeneratePaletteRequest::new(words.join(" "), num_colors))
            .map(Output::Palette),
        ["refine", original, hint] => generator
            .handle_refine(&RefinePaletteRequest {
                original_prompt: original.to_string(),
                refinement_hint: hint.to_string(),
                num_colors,
            })
            .map(Output::Palette),
        ["image", path] => run_image(&generator, Path::new(path), num_colors).map(Output::Palette),
        ["contrast", fg, bg] => generator
            .handle_analyze(&AnalyzeColorRequest {
                foreground: fg.to_string(),
                background: bg.to_string(),
            })
            .map(|check| {
                eprintln!(
                    "Contrast {:.2}:1  AA normal: {}  AA large: {}  AAA normal: {}  AAA large: {}",
                    check.ratio, check.aa_normal, check.aa_large, check.aaa_normal, check.aaa_large
                );
                Output::Json(serde_json::to_string_pretty(&check).unwrap_or_default())
            }),
        _ => {
            print_help(program);
            process::exit(1);
        }
    };

    match result {
        Ok(Output::Palette(palette)) => print_palette(&palette, format),
        Ok(Output::Json(json)) => println!("{}", json),
        Err(error) => exit_with(&error),
    }
}

enum Output {
    Palette(Palette),
    Json(String),
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vibecolor=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> vibecolor::Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_json_file(Path::new(path))?,
        None => EngineConfig::default(),
    };
    config.apply_env(|key| env::var(key).ok());
    Ok(config)
}

fn run_image(generator: &PaletteGenerator, path: &Path, num_colors: usize) -> vibecolor::Result<Palette> {
    let bytes = fs::read(path).map_err(|e| PaletteError::image_decode(format!("Failed to read {}", path.display()), e))?;
    let request = ExtractColorsRequest {
        num_colors,
        file_name: path.file_name().and_then(|s| s.to_str()).map(str::to_string),
    };
    generator.handle_extract(&request, &bytes)
}

fn print_palette(palette: &Palette, format: OutputFormat) {
    match format {
        OutputFormat::Css => println!("{}", to_css_variables(palette)),
        OutputFormat::Json => match to_json(palette) {
            Ok(json) => println!("{}", json),
            Err(error) => exit_with(&error),
        },
    }

    // Print summary to stderr for human reading
    eprintln!();
    eprintln!("Palette: {}", palette.theme);
    if let Some(mood) = &palette.mood {
        eprintln!("  Mood: {}", mood);
    }
    for (i, color) in palette.colors.iter().enumerate() {
        let contrast = palette
            .contrast_info
            .get(i)
            .map(|c| format!("  {:.2}:1 to next", c.ratio))
            .unwrap_or_default();
        eprintln!("  {} {:<20}{}", color.hex(), color.name().unwrap_or("-"), contrast);
    }
}

fn exit_with(error: &PaletteError) -> ! {
    eprintln!("Palette generation failed: {}", error);
    if error.is_client_error() {
        eprintln!("Suggestion: {}", error.user_message());
    }
    process::exit(1);
}

fn fail_usage(program: &str, message: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("Run {} --help for usage information", program);
    process::exit(1);
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <COMMAND>", program_name);
    eprintln!();
    eprintln!("Generate color palettes from prompts or images.");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  prompt <text...>          Palette from a text prompt");
    eprintln!("  refine <original> <hint>  Palette from a prompt plus a refinement hint");
    eprintln!("  image <path>              Palette of dominant image colors");
    eprintln!("  contrast <fg> <bg>        WCAG contrast between two hex colors");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --colors, -n <N>          Number of colors (default: 5)");
    eprintln!("  --format <json|css>       Palette output format (default: json)");
    eprintln!("  --config <file>           Load engine configuration from JSON");
    eprintln!("  --help, -h                Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} prompt sunset over the ocean", program_name);
    eprintln!("  {} --format css -n 7 image photo.png", program_name);
    eprintln!("  {} contrast '#1A1A2E' '#EAEAEA'", program_name);
}
