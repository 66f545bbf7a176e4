use anyhow::{bail, ensure, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::{env, path::PathBuf};

use jiro2dsl::{
    dsl::{
        convert_lines, default_outfile, dsl_header, read_dictionary, select_lines, split_lines,
        write_dsl, write_tree,
    },
    eijiro_txt::renderer::Renderer,
    utility::encoding::encoding_for_label,
};

const DEFAULT_ENCODING: &str = "cp932";
const DEFAULT_LINES: &str = "1-";

const DESCRIPTION: &str = "英辞郎テキスト形式の辞書を Lingvo DSL 形式辞書に変換する．

OUTFILE が省略された場合，INFILE の拡張子を \".dsl\" に置換した名前が用いられる．
出力エンコーディングは GoldenDict の仕様に合わせて BOM 付き UTF-8 固定とする．

ENCODING の既定値は cp932．変換元辞書が UTF-8 の場合は utf-8 と指定すること．

LINES はカンマ区切りの行番号 (先頭行は 1) または行の範囲 (\"3-7\" など) で指定する．
範囲の開始行と終了行は省略でき，省略時はそれぞれ先頭行と末尾行を意味する．
たとえば 10 行の辞書では \"-2, 4-6, 9-\" と \"1,2,4,5,6,9,10\" は同じ意味となる．";

struct Args {
    infile: PathBuf,
    outfile: Option<PathBuf>,
    tree_file: Option<PathBuf>,
    encoding: String,
    lines: String,
}

fn get_args() -> Result<Option<Args>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut opts = getopts::Options::new();
    opts.optopt("o", "outfile", "変換先の辞書名 (既定: infile から自動生成)", "OUTFILE");
    opts.optopt(
        "e",
        "encoding",
        "変換元辞書のエンコーディング (既定: cp932)",
        "ENCODING",
    );
    opts.optopt("l", "lines", "変換対象行の範囲 (既定: 変換元辞書全体)", "LINES");
    opts.optopt("t", "tree", "構文木を JSON で書き出す", "FILE");
    opts.optflag("h", "help", "このヘルプを表示する");

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    if matches.opt_present("h") {
        let brief = format!("Usage: jiro2dsl [options] INFILE\n\n{}", DESCRIPTION);
        print!("{}", opts.usage(&brief));
        return Ok(None);
    }

    let infile = matches
        .free
        .get(0)
        .context("infile (変換元の辞書名) is required")?
        .into();
    ensure!(matches.free.len() == 1, "Too many arguments: {:?}", &matches.free);

    Ok(Some(Args {
        infile,
        outfile: matches.opt_str("o").map(PathBuf::from),
        tree_file: matches.opt_str("t").map(PathBuf::from),
        encoding: matches
            .opt_str("e")
            .unwrap_or_else(|| DEFAULT_ENCODING.to_owned()),
        lines: matches
            .opt_str("l")
            .unwrap_or_else(|| DEFAULT_LINES.to_owned()),
    }))
}

fn main() -> Result<()> {
    let args = match get_args()? {
        Some(args) => args,
        None => return Ok(()),
    };

    ensure!(
        args.infile.exists(),
        "File not found: {}",
        args.infile.display()
    );

    let outfile = args
        .outfile
        .clone()
        .unwrap_or_else(|| default_outfile(&args.infile));
    let encoding = encoding_for_label(&args.encoding)?;

    let name = args
        .infile
        .file_stem()
        .context("infile has no file name")?
        .to_string_lossy();
    let header = dsl_header(&name);

    println!("Reading {}... ", args.infile.display());
    let dictionary = read_dictionary(&args.infile, encoding)?;
    let lines = split_lines(&dictionary);
    println!("{} entries found.", lines.len());

    let targets = select_lines(&args.lines, lines.len())
        .with_context(|| format!("Invalid lines: {}", &args.lines))?;
    println!(
        "Processing entry {} ({} entries)...",
        &args.lines,
        targets.len()
    );

    let pb = create_progress_bar(targets.len() as u64);
    let mut renderer = Renderer::with_progress_bar(pb.clone());
    let converted = convert_lines(&lines, &targets, &mut renderer, args.tree_file.is_some());
    pb.finish_and_clear();
    let converted = converted?;

    println!("Writing {}... ", outfile.display());
    write_dsl(&outfile, &header, &converted.rendered)?;

    if let Some(tree_file) = &args.tree_file {
        println!("Writing {}... ", tree_file.display());
        write_tree(tree_file, &converted.articles)?;
    }

    println!("Done.");

    Ok(())
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
        )
        .unwrap()
        .progress_chars("#-"),
    );
    pb
}
