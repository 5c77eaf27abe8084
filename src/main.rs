use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use quoteframe::generate::UnavailableGenerator;
use quoteframe::platform::{DirectoryShare, NoopShare, ShareTarget};
use quoteframe::rendering::raster::RasterOptions;
use quoteframe::{
    build_prompt, find_preset, presets, Color, Config, Edit, Editor, ExportFormat, FontPairing, FrameDesign,
    GenerationRequest, ImageHandle, Language, QuoteGenerator, Services, Session, ShareOutcome,
    SoftwareRasterizer, StyleField,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "quoteframe", version, about = "Compose and export quote frames")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the style presets in display order
    Presets {
        #[arg(long)]
        json: bool,
    },
    /// Print the instruction that would be sent to the generation backend
    Prompt {
        #[arg(long, default_value = "Motivation")]
        topic: String,
        #[arg(long, default_value = "English")]
        language: Language,
    },
    /// Compose a frame and write it as an image
    Render(RenderArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Png,
    #[value(alias = "jpg")]
    Jpeg,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Png => ExportFormat::Png,
            Format::Jpeg => ExportFormat::Jpeg,
        }
    }
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Topic for a generated quote
    #[arg(long, default_value = "Motivation")]
    topic: String,
    #[arg(long, default_value = "English")]
    language: Language,
    /// Use this quote instead of generating one
    #[arg(long)]
    quote: Option<String>,
    #[arg(long)]
    caption: Option<String>,
    /// Preset applied before individual style flags
    #[arg(long)]
    preset: Option<String>,
    #[arg(long)]
    design: Option<FrameDesign>,
    #[arg(long)]
    pairing: Option<FontPairing>,
    #[arg(long)]
    background: Option<Color>,
    #[arg(long)]
    text_color: Option<Color>,
    #[arg(long, allow_negative_numbers = true)]
    font_size: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    caption_font_size: Option<i64>,
    /// Photo shown in the badge above the frame
    #[arg(long)]
    image: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "png")]
    format: Format,
    /// Output file or directory
    #[arg(long, short, default_value = ".")]
    out: PathBuf,
    /// Also share the PNG into this directory
    #[arg(long)]
    share_dir: Option<PathBuf>,
}

#[cfg(feature = "gemini")]
fn make_generator(config: &Config) -> Arc<dyn QuoteGenerator> {
    match quoteframe::GeminiGenerator::new(config) {
        Ok(g) => Arc::new(g),
        Err(e) => {
            log::warn!("generation unavailable: {}", e);
            Arc::new(UnavailableGenerator::new(e.to_string()))
        }
    }
}

#[cfg(not(feature = "gemini"))]
fn make_generator(_config: &Config) -> Arc<dyn QuoteGenerator> {
    Arc::new(UnavailableGenerator::new("built without the `gemini` feature"))
}

fn style_edits(args: &RenderArgs) -> anyhow::Result<Vec<Edit>> {
    let mut edits = Vec::new();
    if let Some(name) = &args.preset {
        let preset = find_preset(name).with_context(|| format!("unknown preset '{}'", name))?;
        edits.push(Edit::ApplyPreset(preset));
    }
    let fields = [
        args.design.map(StyleField::FrameDesign),
        args.pairing.map(StyleField::FontPairing),
        args.background.map(StyleField::BackgroundColor),
        args.text_color.map(StyleField::TextColor),
        args.font_size.map(StyleField::FontSize),
        args.caption_font_size.map(StyleField::CaptionFontSize),
    ];
    edits.extend(fields.into_iter().flatten().map(Edit::Style));
    Ok(edits)
}

async fn render(args: RenderArgs) -> anyhow::Result<()> {
    let config = Config::from_env();
    let share: Arc<dyn ShareTarget> = match &args.share_dir {
        Some(dir) => Arc::new(DirectoryShare::new(dir)),
        None => Arc::new(NoopShare::new()),
    };
    let editor = Editor::spawn(
        Session::new(),
        Services {
            generator: make_generator(&config),
            rasterizer: Arc::new(SoftwareRasterizer::new()?),
            share,
            options: RasterOptions::from(&config),
            viewport: config.viewport,
        },
    );

    let mut edits = vec![Edit::Topic(args.topic.clone()), Edit::Language(args.language)];
    edits.extend(style_edits(&args)?);
    if let Some(caption) = &args.caption {
        edits.push(Edit::Caption(caption.clone()));
    }
    if let Some(path) = &args.image {
        let handle = ImageHandle::from_path(path).with_context(|| format!("reading {}", path.display()))?;
        edits.push(Edit::Image(Some(handle)));
    }
    if let Some(quote) = &args.quote {
        edits.push(Edit::UseCustomQuote(true));
        edits.push(Edit::CustomQuote(quote.clone()));
    }
    for edit in edits {
        editor.edit(edit).await?;
    }

    if editor.generate().await? {
        let session = editor.wait_idle().await?;
        if let Some(msg) = session.error {
            bail!(msg);
        }
        log::info!("generated: {}", session.source.generated_quote);
    }

    let file = editor.download(args.format.into()).await?;
    let path = if args.out.is_dir() {
        file.save_in(&args.out)?
    } else {
        std::fs::write(&args.out, &file.bytes).with_context(|| format!("writing {}", args.out.display()))?;
        args.out.clone()
    };
    println!("{}", path.display());

    if args.share_dir.is_some() {
        match editor.share().await? {
            ShareOutcome::Shared => println!("shared"),
            ShareOutcome::Cancelled => println!("share cancelled"),
        }
    }

    editor.close().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Cli::parse().command {
        Command::Presets { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(presets())?);
            } else {
                for p in presets() {
                    let s = &p.style;
                    println!(
                        "{:<12} {:<18} {:<10} bg {} text {} {}px/{}px",
                        p.name,
                        s.frame_design,
                        s.font_pairing,
                        s.background_color,
                        s.text_color,
                        s.font_size,
                        s.caption_font_size
                    );
                }
            }
        }
        Command::Prompt { topic, language } => {
            let request = GenerationRequest::new(topic, language);
            request.validate()?;
            println!("{}", build_prompt(&request));
        }
        Command::Render(args) => render(args).await?,
    }
    Ok(())
}
