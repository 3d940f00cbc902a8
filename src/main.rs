use anyhow::{anyhow, Result};
use clap::{crate_description, crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use log::{info, warn, LevelFilter};
use newsgrid::article_page::{
    elements_from_document, patch_document, render_article_page, ArticleElements,
};
use newsgrid::category_page::CategoryPage;
use newsgrid::config::Config;
use newsgrid::footer::render_footer;
use newsgrid::index_page::render_index;
use newsgrid::page::{read_page, Depth, Grid};
use newsgrid::render::Renderer;
use newsgrid::search::{ResultPanel, SearchOverlay};
use newsgrid::sitemap;
use newsgrid::store::{ArticleStore, FileSource};
use simple_logger::SimpleLogger;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn page_arg(default: Option<&'static str>) -> Arg<'static, 'static> {
    let arg = Arg::with_name("page")
        .long("page")
        .takes_value(true)
        .help("Page path relative to the site root, e.g. category/technology.html");
    match default {
        Some(default) => arg.default_value(default),
        None => arg.required(true),
    }
}

fn app() -> App<'static, 'static> {
    App::new("newsgrid")
        .version(crate_version!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("site")
                .long("site")
                .takes_value(true)
                .default_value(".")
                .help("The built site's directory (or any directory below it)"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .takes_value(true)
                .help("Overrides the configured log level"),
        )
        .subcommand(SubCommand::with_name("index").about("Renders the home page grid"))
        .subcommand(
            SubCommand::with_name("category")
                .about("Renders a category page")
                .arg(page_arg(None))
                .arg(
                    Arg::with_name("clicks")
                        .long("clicks")
                        .takes_value(true)
                        .default_value("0")
                        .help("How many times to press \"load more\""),
                ),
        )
        .subcommand(
            SubCommand::with_name("article")
                .about("Patches an article page's metadata and renders its related articles")
                .arg(page_arg(None)),
        )
        .subcommand(
            SubCommand::with_name("search")
                .about("Runs a search query")
                .arg(Arg::with_name("QUERY").required(true))
                .arg(page_arg(Some("index.html"))),
        )
        .subcommand(
            SubCommand::with_name("footer")
                .about("Renders the footer")
                .arg(page_arg(Some("index.html"))),
        )
        .subcommand(
            SubCommand::with_name("sitemap")
                .about("Writes sitemap.xml and sitemap.txt and updates robots.txt"),
        )
}

fn run() -> Result<()> {
    let matches = app().get_matches();
    let config = Config::from_directory(Path::new(matches.value_of("site").unwrap_or(".")))?;
    init_logging(matches.value_of("log-level").unwrap_or(&config.log_level))?;
    let renderer = Renderer::from_theme(&config.theme)?;

    match matches.subcommand() {
        ("index", Some(_)) => {
            let store = load_store(&config, "index.html");
            let mut grid = Grid::new();
            render_index(&store, &renderer, &mut grid)?;
            println!("{}", grid.to_html());
        }
        ("category", Some(m)) => category(&config, &renderer, m)?,
        ("article", Some(m)) => article(&config, &renderer, m)?,
        ("search", Some(m)) => {
            let page = m.value_of("page").unwrap_or("index.html");
            let store = load_store(&config, page);
            let base_path = Depth::of(page).base_path();
            let panel = Some(ResultPanel::default());
            let overlay = SearchOverlay::new(store.articles(), &renderer, base_path, panel);
            let mut overlay = match overlay {
                Some(overlay) => overlay,
                None => return Ok(()),
            };
            overlay.on_input(m.value_of("QUERY").unwrap_or_default())?;
            if overlay.panel().visible {
                println!("{}", overlay.panel().html);
            } else {
                info!("Query is too short; the result panel stays hidden");
            }
        }
        ("footer", Some(m)) => {
            let page = m.value_of("page").unwrap_or("index.html");
            println!("{}", render_footer(&renderer, Depth::of(page).base_path())?);
        }
        ("sitemap", Some(_)) => {
            let summary = sitemap::generate(
                &config.site_directory,
                &config.site_url,
                &config.sitemap_file,
            )?;
            println!("{} generated successfully!", config.sitemap_file.display());
            println!(
                "{} generated successfully!",
                sitemap::txt_path(&config.sitemap_file).display()
            );
            println!(
                "{} updated successfully!",
                config.site_directory.join(sitemap::ROBOTS_FILE).display()
            );
            println!("{}", summary);
        }
        (name, _) => return Err(anyhow!("Unknown command `{}`", name)),
    }
    Ok(())
}

fn category(config: &Config, renderer: &Renderer, m: &ArgMatches) -> Result<()> {
    let page = m.value_of("page").unwrap_or_default();
    let clicks: usize = m.value_of("clicks").unwrap_or("0").parse()?;
    let store = load_store(config, page);
    let mut category = match CategoryPage::open(
        &store,
        renderer,
        page,
        Some(Grid::new()),
        config.load_more_delay,
    )? {
        Some(category) => category,
        None => {
            warn!("`{}` is not a category page", page);
            return Ok(());
        }
    };
    for _ in 0..clicks {
        if category.load_more(|delay, _| std::thread::sleep(delay))? == 0 {
            break;
        }
    }
    println!("{}", category.to_html());
    Ok(())
}

fn article(config: &Config, renderer: &Renderer, m: &ArgMatches) -> Result<()> {
    let page = m.value_of("page").unwrap_or_default();
    let store = load_store(config, page);
    let document = match read_page(&config.site_directory, page) {
        Ok(document) => Some(document),
        Err(err) => {
            warn!("Reading `{}`: {}; only related articles will be shown", page, err);
            None
        }
    };
    let mut elements = match &document {
        Some(document) => elements_from_document(document),
        None => ArticleElements {
            related: Some(Grid::new()),
            ..ArticleElements::default()
        },
    };
    if render_article_page(&store, renderer, page, &mut elements)?.is_none() {
        warn!("No article record for `{}`", page);
        return Ok(());
    }
    if let Some(document) = &document {
        println!("{}", patch_document(document, &elements));
    }
    if let Some(related) = &elements.related {
        println!("{}", related.to_html());
    }
    Ok(())
}

fn load_store(config: &Config, page: &str) -> ArticleStore {
    let mut store = ArticleStore::new();
    store.load(
        &FileSource::for_page(&config.site_directory, page),
        Depth::of(page),
    );
    store
}

fn init_logging(level: &str) -> Result<()> {
    let level: LevelFilter = level
        .parse()
        .map_err(|_| anyhow!("Invalid log level `{}`", level))?;
    SimpleLogger::new()
        .with_level(level)
        .init()
        .map_err(|err| anyhow!("Initializing logger: {}", err))
}
