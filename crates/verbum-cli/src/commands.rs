use colored::Colorize;
use serde::Serialize;
use verbum_query::{
    BookChapters, BookSummary, ChapterCount, Passage, SearchResults, Verbum, VerseHit,
};
use verbum_server::{ServerConfig, VerbumServer};
use verbum_types::{SupportedVersions, VersionId};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Books(args) => cmd_books(args, format),
        Command::Chapters(args) => cmd_chapters(args, format),
        Command::Verses(args) => cmd_verses(args, format),
        Command::Search(args) => cmd_search(args, format),
        Command::Random(args) => cmd_random(args, format),
    }
}

fn open(source: &SourceArgs) -> anyhow::Result<(Verbum, VersionId)> {
    let version = SupportedVersions::default().resolve(&source.translation)?;
    Ok((Verbum::open(source.data_dir.clone()), version))
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text(value)),
    }
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    let server = VerbumServer::new(config)?;
    println!(
        "Verbum server on {} (data: {})",
        server.config().bind_addr.to_string().bold(),
        server.config().data_dir.display()
    );
    tokio::runtime::Runtime::new()?.block_on(server.serve())?;
    Ok(())
}

fn cmd_books(args: BooksArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (svc, version) = open(&args.source)?;
    if args.count {
        let total = svc.count_books(&version)?;
        let body = serde_json::json!({ "total_books": total });
        emit(format, &body, |_| {
            format!(
                "{} books in {}\n",
                total.to_string().bold(),
                version.as_str().cyan()
            )
        })
    } else if args.with_chapters {
        let books = svc.list_books_with_chapter_counts(&version)?;
        emit(format, &books, |b| render_book_chapters(b))
    } else {
        let books = svc.list_books(&version)?;
        emit(format, &books, |b| render_books(b))
    }
}

fn cmd_chapters(args: ChaptersArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (svc, version) = open(&args.source)?;
    let count = svc.count_chapters(&version, &args.book)?;
    emit(format, &count, render_chapter_count)
}

fn cmd_verses(args: VersesArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (svc, version) = open(&args.source)?;
    let passage = svc.get_verses(&version, &args.book, &args.chapter)?;
    emit(format, &passage, render_passage)
}

fn cmd_search(args: SearchArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (svc, version) = open(&args.source)?;
    let results = svc.search(&version, &args.theme)?;
    emit(format, &results, render_search)
}

fn cmd_random(args: RandomArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (svc, version) = open(&args.source)?;
    let hit = svc.random_verse(&version)?;
    emit(format, &hit, render_verse)
}

// ---- Text rendering ----

fn render_books(books: &[BookSummary]) -> String {
    let mut out = String::new();
    for b in books {
        let group = format!("({})", b.group);
        out.push_str(&format!(
            "{:>5}  {} {}\n",
            b.abbrev.yellow(),
            b.name.bold(),
            group.dimmed()
        ));
    }
    out
}

fn render_book_chapters(books: &[BookChapters]) -> String {
    let mut out = String::new();
    for b in books {
        let count = b.chapter_count.to_string();
        out.push_str(&format!("{:>4}  {}\n", count.cyan(), b.name));
    }
    out
}

fn render_chapter_count(count: &ChapterCount) -> String {
    format!("{}: {} chapters\n", count.book.bold(), count.chapter_count)
}

fn render_passage(p: &Passage) -> String {
    let mut out = format!("{} {} ({})\n", p.book.bold(), p.chapter, p.version.cyan());
    for (i, verse) in p.verses.iter().enumerate() {
        out.push_str(&format!("{:>4} {}\n", (i + 1).to_string().dimmed(), verse));
    }
    out
}

fn reference(hit: &VerseHit) -> String {
    format!("{} {}:{}", hit.book, hit.chapter, hit.verse_number)
}

fn render_search(results: &SearchResults) -> String {
    let mut out = String::new();
    for hit in &results.results {
        out.push_str(&format!("{}  {}\n", reference(hit).yellow(), hit.text));
    }
    out.push_str(&format!("{} matches\n", results.count.to_string().bold()));
    out
}

fn render_verse(hit: &VerseHit) -> String {
    format!(
        "{} ({})\n  {}\n",
        reference(hit).yellow().bold(),
        hit.version.cyan(),
        hit.text
    )
}
