use crate::model::Result;
use crate::report::{Block, Message, ReportKind, ReportSink};
use markdown_builder::Markdown;
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::info;

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([^|>]+)\|([^>]+)>").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());

/// Writes each report to `<dir>/<report>.md` instead of posting it.
#[derive(Debug, Clone)]
pub struct MarkdownSink {
    dir: PathBuf,
}

impl MarkdownSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, kind: ReportKind) -> PathBuf {
        self.dir.join(format!("{}.md", kind.name()))
    }
}

impl ReportSink for MarkdownSink {
    async fn deliver(&self, kind: ReportKind, message: &Message) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(kind);
        fs::write(&path, render(kind, message))?;
        info!(report = kind.name(), path = %path.display(), "wrote preview");
        Ok(())
    }
}

pub fn render(kind: ReportKind, message: &Message) -> String {
    let mut doc = Markdown::new();
    doc.header1(kind.title());
    for block in &message.blocks {
        match block {
            Block::Divider => {
                doc.paragraph("---".to_string());
            }
            Block::Section { text } if text.text.trim().is_empty() => {}
            Block::Section { text } => {
                let lines = text.text.lines().map(to_markdown).collect::<Vec<_>>();
                doc.paragraph(lines.join("  \n"));
            }
        }
    }
    doc.render()
}

/// Slack `<url|label>` and `*bold*` to their Markdown forms.
fn to_markdown(line: &str) -> String {
    let linked = LINK.replace_all(line, "[$2]($1)");
    BOLD.replace_all(&linked, "**$1**").into_owned()
}
