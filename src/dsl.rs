// 変換元辞書の読み込みから DSL 形式の辞書の書き出しまで

use std::{
    collections::BTreeSet,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use encoding_rs::Encoding;
use tempfile::NamedTempFile;

use crate::{
    eijiro_txt::{parser::parse_article, parser_helper::Article, renderer::Renderer},
    range_list::to_ranges,
    utility::encoding::decode,
};

// GoldenDict は BOM 付き UTF-8 でないと読めない
const BOM: &str = "\u{FEFF}";

pub fn dsl_header(name: &str) -> String {
    format!(
        "#NAME \"英辞郎 ({})\"\n#INDEX_LANGUAGE \"English\"\n#CONTENTS_LANGUAGE \"Japanese\"\n",
        name
    )
}

// 出力先が省略された場合は拡張子を .dsl にする
pub fn default_outfile(infile: &Path) -> PathBuf {
    infile.with_extension("dsl")
}

pub fn read_dictionary(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = decode(&bytes, encoding)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(text)
}

// 改行を残したまま行に分ける
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

// 変換対象の行番号 (1 始まり，昇順)
// 展開する前に範囲ごとに行数と比べる
pub fn select_lines(range: &str, line_count: usize) -> Result<Vec<usize>> {
    let ranges = to_ranges(range, 1, line_count)?;

    for r in ranges.iter().filter(|r| !r.is_empty()) {
        ensure!(
            1 <= *r.start() && *r.end() <= line_count,
            "Line {} is out of range (1-{})",
            if *r.start() < 1 { r.start() } else { r.end() },
            line_count
        );
    }

    let targets: BTreeSet<usize> = ranges.into_iter().flatten().collect();
    Ok(targets.into_iter().collect())
}

pub struct Converted {
    pub rendered: Vec<String>,
    // keep_articles が true のときのみ
    pub articles: Vec<Article>,
}

// 1 つでも解析に失敗したら全体を失敗とする
pub fn convert_lines(
    lines: &[&str],
    targets: &[usize],
    renderer: &mut Renderer,
    keep_articles: bool,
) -> Result<Converted> {
    let mut rendered = Vec::with_capacity(targets.len());
    let mut articles = Vec::new();

    for &i in targets {
        let line = lines
            .get(i.wrapping_sub(1))
            .with_context(|| format!("Line {} does not exist", i))?;

        let article = parse_article(line).with_context(|| format!("At line {}", i))?;

        rendered.push(renderer.render_article(&article));
        if keep_articles {
            articles.push(article);
        }
    }

    Ok(Converted { rendered, articles })
}

pub fn write_dsl(path: &Path, header: &str, rendered: &[String]) -> Result<()> {
    write_atomically(path, |file| {
        file.write_all(BOM.as_bytes())?;
        file.write_all(header.as_bytes())?;
        for article in rendered {
            file.write_all(article.as_bytes())?;
        }
        Ok(())
    })
}

pub fn write_tree(path: &Path, articles: &[Article]) -> Result<()> {
    write_atomically(path, |file| {
        serde_json::to_writer_pretty(&mut *file, articles)?;
        file.write_all(b"\n")?;
        Ok(())
    })
}

// 一時ファイルに書いてから置き換える (失敗時に中途半端なファイルを残さない)
fn write_atomically(
    path: &Path,
    write: impl FnOnce(&mut NamedTempFile) -> Result<()>,
) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory)
        .with_context(|| format!("Failed to create temporary file in {}", directory.display()))?;

    write(&mut file).with_context(|| format!("Failed to write {}", path.display()))?;
    file.flush()?;

    file.persist(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}
