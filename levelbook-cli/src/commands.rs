use crate::{Command, Console};
use anyhow::{bail, Result};
use levelbook_catalog::{
    import_shared, share_list, Buckets, Catalog, CatalogConfig, CatalogError, Clipboard, Confirm,
    DifficultyFilter, FragmentChannel, ImportOutcome, LevelCard, Notice, PersistStatus, Query,
    QueryPatch, SortKey, EMPTY_STATE,
};
use levelbook_storage::LevelStore;
use levelbook_types::{Category, LevelFields, Rating};
use std::io::{self, BufRead, Write};
use tracing::info;

/// Asks on the console and accepts `y` or `yes`.
pub struct TerminalConfirm<'a> {
    input: &'a mut dyn BufRead,
    err: &'a mut dyn Write,
    prompted: bool,
}

impl<'a> TerminalConfirm<'a> {
    pub fn new(input: &'a mut dyn BufRead, err: &'a mut dyn Write) -> Self {
        Self {
            input,
            err,
            prompted: false,
        }
    }

    /// True once a prompt has been shown.
    #[must_use]
    pub fn prompted(&self) -> bool {
        self.prompted
    }
}

impl Confirm for TerminalConfirm<'_> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.err, "{prompt} [y/N] ")
            .and_then(|()| self.err.flush())
            .is_err()
        {
            return false;
        }
        self.prompted = true;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// Confirms everything, for `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Writes outgoing links to stdout.
pub struct StdoutClipboard<'a> {
    out: &'a mut dyn Write,
}

impl<'a> StdoutClipboard<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out }
    }
}

impl Clipboard for StdoutClipboard<'_> {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        writeln!(self.out, "{text}").map_err(|e| e.to_string())
    }
}

/// Runs one command against an open catalog.
pub fn execute<S: LevelStore>(
    command: Command,
    catalog: &mut Catalog<S>,
    config: &CatalogConfig,
    console: &mut Console<'_>,
) -> Result<()> {
    match command {
        Command::Add(args) => {
            let level = catalog.create(args.into())?;
            ensure_saved(catalog)?;
            writeln!(console.out, "Added level {} ({})", level.id, level.name)?;
        }
        Command::Edit { id, fields } => {
            let base = catalog
                .get(id)
                .map(LevelFields::from_level)
                .ok_or(CatalogError::NotFound(id))?;
            let level = catalog.update(id, fields.apply(base))?;
            ensure_saved(catalog)?;
            writeln!(console.out, "Updated level {} ({})", level.id, level.name)?;
        }
        Command::Remove { id } => {
            if catalog.delete(id) {
                ensure_saved(catalog)?;
                writeln!(console.out, "Removed level {id}")?;
            } else {
                writeln!(console.err, "No level with id {id}")?;
            }
        }
        Command::List {
            search,
            difficulty,
            sort,
            json,
        } => {
            catalog.set_query(
                QueryPatch::default()
                    .search(search)
                    .difficulty(difficulty)
                    .sort(sort),
            );
            let buckets = catalog.render_buckets();
            if json {
                write_json(&buckets, &mut *console.out)?;
            } else {
                write_buckets(catalog.query(), &buckets, &mut *console.out)?;
            }
        }
        Command::Share => {
            let (notice, _) = share_list(
                catalog,
                &config.share_base_url,
                &mut StdoutClipboard::new(&mut *console.out),
            );
            match notice {
                Notice::ShareCopied => writeln!(console.err, "{notice}")?,
                other => bail!("{other}"),
            }
        }
        Command::Import { source, yes } => {
            let mut channel = if source.contains('#') {
                FragmentChannel::from_url(&source)
            } else {
                FragmentChannel::new(source)
            };
            let outcome = if yes {
                import_shared(catalog, &mut channel, &mut AssumeYes)
            } else {
                let mut confirm = TerminalConfirm::new(&mut *console.input, &mut *console.err);
                let outcome = import_shared(catalog, &mut channel, &mut confirm);
                if confirm.prompted() {
                    writeln!(confirm.err)?;
                }
                outcome
            };
            match outcome {
                ImportOutcome::NoToken => bail!("no share token to import"),
                ImportOutcome::Imported(count) => {
                    ensure_saved(catalog)?;
                    info!("imported {count} levels");
                    writeln!(console.err, "{}", Notice::Imported)?;
                }
                ImportOutcome::Declined(count) => {
                    writeln!(console.err, "Kept current list; {count} shared levels ignored")?;
                }
                ImportOutcome::Rejected(e) => {
                    return Err(anyhow::Error::new(e).context(Notice::ImportRejected));
                }
            }
        }
        Command::Options {
            category,
            difficulty,
        } => match (category, difficulty) {
            (None, _) => write_overview(&mut *console.out)?,
            (Some(category), None) => write_category_options(category, &mut *console.out)?,
            (Some(category), Some(difficulty)) => {
                match levelbook_taxonomy::star_options(category, &difficulty) {
                    Some(stars) => {
                        let stars: Vec<String> = stars.iter().map(u8::to_string).collect();
                        writeln!(console.out, "Stars: {}", stars.join(", "))?;
                    }
                    None => writeln!(console.out, "No star choice for {category} {difficulty}")?,
                }
            }
        },
    }
    Ok(())
}

fn ensure_saved<S: LevelStore>(catalog: &Catalog<S>) -> Result<()> {
    if let PersistStatus::Failed(reason) = catalog.persist_status() {
        bail!("{}: {reason}", Notice::SaveFailed);
    }
    Ok(())
}

fn heading(category: Category) -> &'static str {
    match category {
        Category::Unrated => "Unrated Levels",
        Category::Rated => "Rated Levels",
        Category::Demon => "Demon Levels",
    }
}

fn write_buckets(query: &Query, buckets: &Buckets<'_>, out: &mut dyn Write) -> io::Result<()> {
    let chips = query.chips();
    if !chips.is_empty() {
        writeln!(out, "{}", chips.join("  "))?;
    }
    for (category, levels) in buckets.iter() {
        writeln!(out, "{} ({})", heading(category), levels.len())?;
        if levels.is_empty() {
            writeln!(out, "  {EMPTY_STATE}")?;
            continue;
        }
        for level in levels {
            let card = LevelCard::from_level(level);
            write!(
                out,
                "  #{}  {} by {}  [{}]",
                card.id, card.name, card.creator, card.label
            )?;
            if let Some(badge) = card.rating {
                write!(out, "  {badge}")?;
            }
            if !card.tags.is_empty() {
                write!(out, "  ({})", card.tags.join(", "))?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_json(buckets: &Buckets<'_>, out: &mut dyn Write) -> Result<()> {
    let mut map = serde_json::Map::new();
    for category in Category::ALL {
        map.insert(
            category.code().to_string(),
            serde_json::to_value(buckets.cards(category))?,
        );
    }
    serde_json::to_writer_pretty(&mut *out, &serde_json::Value::Object(map))?;
    writeln!(out)?;
    Ok(())
}

fn write_overview(out: &mut dyn Write) -> io::Result<()> {
    let categories: Vec<_> = Category::ALL.iter().map(Category::code).collect();
    writeln!(out, "Categories: {}", categories.join(", "))?;
    let ratings: Vec<_> = Rating::ALL.iter().map(Rating::code).collect();
    writeln!(out, "Ratings: {}", ratings.join(", "))?;
    writeln!(out, "Difficulty filters:")?;
    for filter in DifficultyFilter::options() {
        writeln!(out, "  {:<14}{}", filter.code(), filter.display_name())?;
    }
    writeln!(out, "Sort keys:")?;
    for key in SortKey::ALL {
        writeln!(out, "  {:<14}{}", key.code(), key.display_name())?;
    }
    Ok(())
}

fn write_category_options(category: Category, out: &mut dyn Write) -> io::Result<()> {
    if category == Category::Unrated {
        writeln!(out, "Unrated levels are labeled \"{}\"", levelbook_taxonomy::UNRATED_LABEL)?;
    }
    writeln!(out, "Difficulties:")?;
    for option in levelbook_taxonomy::difficulty_options(category) {
        writeln!(out, "  {:<10}{}", option.code, option.label)?;
    }
    if levelbook_taxonomy::shows_rating(category) {
        let ratings: Vec<_> = Rating::ALL.iter().map(Rating::code).collect();
        writeln!(out, "Ratings: {}", ratings.join(", "))?;
    }
    Ok(())
}
