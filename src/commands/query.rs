use anyhow::{Result, bail};
use tracing::info;

use crate::cli::QueryArgs;
use crate::model::{Category, Clause};

use super::store::{load_corpus, open_read_only};

pub fn run(args: QueryArgs) -> Result<()> {
    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| args.cache_root.join("ubbl_corpus.sqlite"));

    let connection = open_read_only(&db_path)?;
    let corpus = load_corpus(&connection)?;

    let selected: Vec<&Clause> = if let Some(number) = args.number.as_deref() {
        corpus.by_number(number).into_iter().collect()
    } else if let Some(ordinal) = args.part {
        corpus.by_part(ordinal)
    } else if let Some(category_raw) = args.category.as_deref() {
        let Some(category) = Category::parse(category_raw) else {
            bail!("unknown category: {category_raw}");
        };
        corpus.by_category(category)
    } else if args.critical_only {
        corpus.critical_only()
    } else if args.complex_only {
        corpus.complex_only()
    } else {
        corpus.clauses.iter().collect()
    };

    let matched = selected.len();
    let limited = selected
        .into_iter()
        .take(args.limit)
        .collect::<Vec<&Clause>>();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&limited)?);
    } else {
        for clause in &limited {
            println!(
                "{} | Part {} | {} | {} | complexity {} | {}",
                clause.number,
                clause.part_label,
                clause.metadata.category.as_str(),
                clause.metadata.priority.as_str(),
                clause.metadata.complexity_level,
                clause.title
            );
        }
    }

    info!(matched, shown = limited.len(), "query completed");

    Ok(())
}
