//! `transform-titles` / `transform-abstracts`: rewrite article titles or
//! abstracts from the JATS markup of their XML galley.
//!
//! The title-group article title (or the abstract) is cut out of the first
//! XML galley, run through an XSLT stylesheet and stored on the article.

use crate::context::Context;
use anyhow::bail;
use async_trait::async_trait;
use clap::{ArgGroup, Args};
use pressforge_common::db::models::Article;
use pressforge_common::errors::AppError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("XML syntax error: {0}")]
    Xml(String),

    #[error("Stylesheet processor failed: {0}")]
    Processor(String),

    #[error(transparent)]
    App(#[from] AppError),
}

fn xml_error(e: impl Display) -> TransformError {
    TransformError::Xml(e.to_string())
}

/// Which article field a run rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformField {
    Title,
    Abstract,
}

impl TransformField {
    fn label(self) -> &'static str {
        match self {
            TransformField::Title => "title",
            TransformField::Abstract => "abstract",
        }
    }

    fn default_stylesheet(self, ctx: &Context) -> PathBuf {
        match self {
            TransformField::Title => ctx.config.scripts.title_stylesheet.clone(),
            TransformField::Abstract => ctx.config.scripts.abstract_stylesheet.clone(),
        }
    }

    /// Whether an element named `name` under `parent` is the one to extract
    fn matches(self, name: &[u8], parent: Option<&[u8]>) -> bool {
        match self {
            TransformField::Title => name == b"article-title" && parent == Some(b"title-group"),
            TransformField::Abstract => name == b"abstract",
        }
    }
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("selector")
        .required(true)
        .args(["article_id", "journal_codes", "issue_ids"])
))]
pub struct TransformArgs {
    /// Transform a single article
    #[arg(long)]
    pub article_id: Option<i32>,

    /// Transform every article of these journals
    #[arg(long, num_args = 1..)]
    pub journal_codes: Vec<String>,

    /// Transform every article of these issues
    #[arg(long, num_args = 1..)]
    pub issue_ids: Vec<i32>,

    /// Stylesheet to apply; defaults to the configured one
    #[arg(long)]
    pub xslt_file: Option<PathBuf>,

    /// Print old and new values without saving
    #[arg(long)]
    pub test_run: bool,
}

/// Applies an XSLT stylesheet to an XML fragment
#[async_trait]
pub trait StylesheetProcessor: Send + Sync {
    async fn transform(&self, stylesheet: &Path, fragment: &str) -> Result<String, TransformError>;
}

/// Runs the `xsltproc` executable with the fragment on stdin
pub struct Xsltproc {
    program: String,
}

impl Xsltproc {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl StylesheetProcessor for Xsltproc {
    async fn transform(&self, stylesheet: &Path, fragment: &str) -> Result<String, TransformError> {
        let mut child = Command::new(&self.program)
            .arg(stylesheet)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TransformError::Processor(format!("cannot run {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(fragment.as_bytes())
                .await
                .map_err(|e| TransformError::Processor(e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| TransformError::Processor(e.to_string()))?;
        if !output.status.success() {
            return Err(TransformError::Processor(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Raw `xmlns` / `xmlns:*` declarations of one element
type NamespaceDecls = Vec<(Vec<u8>, Vec<u8>)>;

fn namespace_decls(start: &BytesStart<'_>) -> Result<NamespaceDecls, TransformError> {
    let mut decls = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(xml_error)?;
        if attr.key.as_namespace_binding().is_some() {
            decls.push((attr.key.as_ref().to_vec(), attr.value.into_owned()));
        }
    }
    Ok(decls)
}

/// Copy of `start` that also declares every namespace in scope from its
/// ancestors, so the fragment stands on its own
fn rooted(
    start: BytesStart<'_>,
    ancestors: &[(Vec<u8>, NamespaceDecls)],
) -> Result<BytesStart<'static>, TransformError> {
    let own = namespace_decls(&start)?;

    // Innermost declaration of a prefix wins
    let mut in_scope: NamespaceDecls = Vec::new();
    for (_, decls) in ancestors {
        for (key, value) in decls {
            match in_scope.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value.clone(),
                None => in_scope.push((key.clone(), value.clone())),
            }
        }
    }

    let mut root = start.into_owned();
    for (key, value) in &in_scope {
        if !own.iter().any(|(k, _)| k == key) {
            root.push_attribute((key.as_slice(), value.as_slice()));
        }
    }
    Ok(root)
}

/// Serialized copy of the first element `field` selects, markup included.
/// Namespace declarations inherited from the document are repeated on the
/// fragment's root element.
pub fn extract_fragment(xml: &str, field: TransformField) -> Result<Option<String>, TransformError> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<(Vec<u8>, NamespaceDecls)> = Vec::new();
    let mut capture: Option<(Writer<Vec<u8>>, usize)> = None;

    loop {
        let event = reader.read_event().map_err(xml_error)?;

        if let Some((writer, depth)) = capture.as_mut() {
            match &event {
                Event::Start(_) => *depth += 1,
                Event::End(_) => *depth -= 1,
                Event::Eof => return Err(xml_error("document ended inside the element")),
                _ => {}
            }
            writer.write_event(event).map_err(xml_error)?;
            if *depth == 0 {
                if let Some((writer, _)) = capture.take() {
                    return String::from_utf8(writer.into_inner())
                        .map(Some)
                        .map_err(xml_error);
                }
            }
            continue;
        }

        match event {
            Event::Start(start) => {
                let name = start.local_name().as_ref().to_vec();
                if field.matches(&name, path.last().map(|(n, _)| n.as_slice())) {
                    let root = rooted(start, &path)?;
                    let mut writer = Writer::new(Vec::new());
                    writer.write_event(Event::Start(root)).map_err(xml_error)?;
                    capture = Some((writer, 1));
                } else {
                    let decls = namespace_decls(&start)?;
                    path.push((name, decls));
                }
            }
            Event::Empty(empty) => {
                let name = empty.local_name().as_ref().to_vec();
                if field.matches(&name, path.last().map(|(n, _)| n.as_slice())) {
                    let root = rooted(empty, &path)?;
                    let mut writer = Writer::new(Vec::new());
                    writer.write_event(Event::Empty(root)).map_err(xml_error)?;
                    return String::from_utf8(writer.into_inner())
                        .map(Some)
                        .map_err(xml_error);
                }
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

pub async fn execute(
    ctx: &Context,
    field: TransformField,
    args: TransformArgs,
    processor: &dyn StylesheetProcessor,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let stylesheet = args
        .xslt_file
        .clone()
        .unwrap_or_else(|| field.default_stylesheet(ctx));
    if !tokio::fs::try_exists(&stylesheet).await.unwrap_or(false) {
        bail!("XSLT file not found: {}", stylesheet.display());
    }

    let repo = ctx.repository();
    let mut articles: Vec<Article> = Vec::new();

    if let Some(article_id) = args.article_id {
        match repo.find_article(article_id).await? {
            Some(article) => articles.push(article),
            None => writeln!(out, "Article with ID \"{}\" does not exist.", article_id)?,
        }
    } else if !args.journal_codes.is_empty() {
        for code in &args.journal_codes {
            match repo.find_journal_by_code(code).await? {
                Some(journal) => articles.extend(repo.list_articles_in_journal(journal.id).await?),
                None => writeln!(out, "Journal with code \"{}\" does not exist.", code)?,
            }
        }
    } else {
        for issue_id in &args.issue_ids {
            match repo.find_issue(*issue_id).await? {
                Some(issue) => articles.extend(repo.list_issue_articles(issue.id).await?),
                None => writeln!(out, "Issue with ID \"{}\" does not exist.", issue_id)?,
            }
        }
    }

    info!(field = field.label(), count = articles.len(), test_run = args.test_run, "Transforming articles");

    for article in articles {
        let article_id = article.id;
        if let Err(e) =
            process_article(ctx, field, &stylesheet, processor, article, args.test_run, out).await
        {
            error!(article_id, error = %e, "Transform failed");
            match e {
                TransformError::Xml(message) => {
                    writeln!(out, "XML syntax error for article ID {}: {}", article_id, message)?
                }
                other => writeln!(out, "Error processing article ID {}: {}", article_id, other)?,
            }
        }
    }

    Ok(())
}

#[instrument(skip_all, fields(article_id = article.id, field = field.label()))]
async fn process_article(
    ctx: &Context,
    field: TransformField,
    stylesheet: &Path,
    processor: &dyn StylesheetProcessor,
    article: Article,
    test_run: bool,
    out: &mut dyn Write,
) -> Result<(), TransformError> {
    let repo = ctx.repository();
    let store = ctx.store();

    let Some((galley, file)) = repo.first_xml_galley(article.id).await? else {
        warn!("No XML galley");
        report(out, format_args!("No XML galley found for article ID {}", article.id))?;
        return Ok(());
    };
    debug!(galley_id = galley.id, file_id = file.id, "Using XML galley");

    let path = store.file_path(&file, article.id);
    let bytes = match store.read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.is_missing_payload() => {
            report(
                out,
                format_args!(
                    "File path \"{}\" does not exist for article ID {}.",
                    path.display(),
                    article.id
                ),
            )?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let xml = String::from_utf8(bytes).map_err(xml_error)?;

    let Some(fragment) = extract_fragment(&xml, field)? else {
        let message = match field {
            TransformField::Title => "No article title found in the JATS file",
            TransformField::Abstract => "No abstract found in the JATS file",
        };
        report(out, format_args!("{} for article ID {}.", message, article.id))?;
        return Ok(());
    };

    let transformed = processor.transform(stylesheet, &fragment).await?;
    let transformed = transformed.trim().to_string();

    if test_run {
        let old = match field {
            TransformField::Title => article.title.clone(),
            TransformField::Abstract => article.abstract_text.clone().unwrap_or_default(),
        };
        let label = match field {
            TransformField::Title => "Title",
            TransformField::Abstract => "Abstract",
        };
        report(
            out,
            format_args!(
                "Article PK: {}\nOld {}: {}\nNew {}:\n{}\n----------------------------------------",
                article.id, label, old, label, transformed
            ),
        )?;
        return Ok(());
    }

    let article_id = article.id;
    match field {
        TransformField::Title => repo.update_article_title(article, transformed).await?,
        TransformField::Abstract => repo.update_article_abstract(article, transformed).await?,
    };
    report(
        out,
        format_args!(
            "Successfully transformed {} for article ID {}",
            field.label(),
            article_id
        ),
    )?;

    Ok(())
}

fn report(out: &mut dyn Write, line: std::fmt::Arguments<'_>) -> Result<(), TransformError> {
    writeln!(out, "{}", line).map_err(|e| TransformError::App(e.into()))
}
