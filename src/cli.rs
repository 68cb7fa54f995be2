//! Command-line front end over a single [`Session`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::browse::{VibeFilter, VisibleList};
use crate::catalog::Catalog;
use crate::clipboard::WlCopyBackend;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::notification::{DesktopNotifier, ToastRuntime, ToastSink};
use crate::render::HttpRenderClient;
use crate::session::Session;
use crate::storage::DownloadService;
use crate::studio::{GenerationOutcome, Studio};

#[derive(Debug, Parser)]
#[command(name = "memedrop", version, about = "Browse curated memes and render your own")]
pub struct Cli {
    /// Rendering service origin.
    #[arg(long, env = "MEMEDROP_BACKEND_URL", global = true)]
    backend_url: Option<String>,

    /// JSON catalog to browse instead of the bundled one.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Where rendered memes and stickers are saved.
    #[arg(long, global = true)]
    downloads_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the grid: spotlight first, then matches in catalog order.
    Browse(FilterArgs),
    /// Pick a random spotlight from the current matches.
    Surprise(FilterArgs),
    /// Totals over the whole catalog.
    Stats,
    /// List studio templates.
    Templates,
    /// Render a meme and save it as meme.png.
    Generate(StudioArgs),
    /// Render a WhatsApp sticker and save it as sticker.webp.
    Sticker(StudioArgs),
    /// Copy a meme's image link to the clipboard.
    Copy { title: String },
}

#[derive(Debug, Args)]
struct FilterArgs {
    #[arg(short, long, default_value = "")]
    query: String,
    #[arg(short, long, default_value_t = VibeFilter::All)]
    vibe: VibeFilter,
}

#[derive(Debug, Args)]
struct StudioArgs {
    /// Template name, e.g. "Doge".
    #[arg(short, long)]
    template: String,
    #[arg(long, default_value = "")]
    top: String,
    #[arg(long, default_value = "")]
    bottom: String,
}

struct StdoutSink;

impl ToastSink for StdoutSink {
    fn toast_shown(&self, message: &str, _duration_ms: u32) {
        println!("» {message}");
    }
}

pub(crate) async fn execute(cli: Cli, config: AppConfig) -> AppResult<()> {
    let catalog = match cli.catalog.or(config.catalog_path) {
        Some(path) => Catalog::load(&path)?,
        None => Catalog::bundled()?,
    };
    let downloads = match cli.downloads_dir.or(config.downloads_dir) {
        Some(dir) => DownloadService::with_dir(dir),
        None => DownloadService::with_default_dir().unwrap_or_else(|err| {
            tracing::warn!(%err, "no home directory; saving downloads to the working directory");
            DownloadService::with_dir(PathBuf::from("."))
        }),
    };
    let mut toasts = ToastRuntime::new().with_sink(StdoutSink);
    if config.desktop_notifications {
        toasts = toasts.with_sink(DesktopNotifier);
    }
    let backend = HttpRenderClient::new(cli.backend_url.unwrap_or(config.backend_url));

    let mut session = Session::new(
        catalog,
        Studio::default(),
        toasts,
        WlCopyBackend,
        downloads,
    );

    match cli.command {
        Command::Browse(filter) => {
            apply_filter(&mut session, filter);
            print_visible(&session.visible());
        }
        Command::Surprise(filter) => {
            apply_filter(&mut session, filter);
            session.surprise();
            print_visible(&session.visible());
        }
        Command::Stats => {
            let stats = session.stats();
            println!("Memes curated      {}", stats.total);
            println!("Vibe buckets       {}", stats.distinct_vibes);
            println!("Certified classics {}", stats.classics);
        }
        Command::Templates => {
            for template in session.studio().templates() {
                println!("{:<24} {}", template.name, template.url);
            }
        }
        Command::Generate(args) => {
            prepare_studio(&mut session, &args)?;
            session.generate(&backend).await?;
            if let Some(path) = session.download()? {
                println!("saved {}", path.display());
            }
        }
        Command::Sticker(args) => {
            prepare_studio(&mut session, &args)?;
            if let GenerationOutcome::StickerSaved { path } =
                session.generate_sticker(&backend).await?
            {
                println!("saved {}", path.display());
            }
        }
        Command::Copy { title } => {
            let item = session
                .catalog()
                .find_by_title(&title)
                .cloned()
                .ok_or(AppError::UnknownItem { title })?;
            session.copy_link(&item)?;
        }
    }

    Ok(())
}

fn apply_filter(session: &mut Session, filter: FilterArgs) {
    session.set_query(filter.query);
    session.set_vibe_filter(filter.vibe);
}

fn prepare_studio(session: &mut Session, args: &StudioArgs) -> AppResult<()> {
    let studio = session.studio_mut();
    if !studio.select_template_by_name(&args.template) {
        return Err(AppError::UnknownTemplate {
            name: args.template.clone(),
        });
    }
    studio.set_top_text(&args.top);
    studio.set_bottom_text(&args.bottom);
    Ok(())
}

fn print_visible(visible: &VisibleList<'_>) {
    for (index, item) in visible.entries().iter().enumerate() {
        let marker = if index == 0 && visible.spotlight().is_some() {
            "★"
        } else {
            " "
        };
        let vibe = item.vibe.map(|vibe| vibe.as_str()).unwrap_or("-");
        let tags = item
            .tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{marker} {:<28} since {}  🔥 {:<4} {:<10} {tags}",
            item.title, item.year, item.score, vibe
        );
    }
    if visible.is_empty_state() {
        println!("No memes found. Try resetting your filters.");
    }
}
