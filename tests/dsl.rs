use std::{fs, path::Path};

use anyhow::Result;

use jiro2dsl::{
    dsl::{
        convert_lines, default_outfile, dsl_header, read_dictionary, select_lines, split_lines,
        write_dsl, write_tree,
    },
    eijiro_txt::renderer::Renderer,
    utility::encoding::encoding_for_label,
};

static DICTIONARY: &str = "■dog  {名} : 犬\n■dog  {動} : 跡をつける\n■cat : 猫\n";

#[test]
fn test_convert_shift_jis_dictionary() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let infile = dir.path().join("EIJIRO-TEST.TXT");
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(DICTIONARY);
    fs::write(&infile, &bytes)?;

    let dictionary = read_dictionary(&infile, encoding_for_label("cp932")?)?;
    let lines = split_lines(&dictionary);
    assert_eq!(lines.len(), 3);

    let targets = select_lines("1-", lines.len())?;
    let mut renderer = Renderer::new();
    let converted = convert_lines(&lines, &targets, &mut renderer, false)?;
    assert!(converted.articles.is_empty());

    let outfile = default_outfile(&infile);
    assert_eq!(outfile, dir.path().join("EIJIRO-TEST.dsl"));

    write_dsl(&outfile, &dsl_header("EIJIRO-TEST"), &converted.rendered)?;

    let written = fs::read(&outfile)?;
    assert!(written.starts_with(&[0xEF, 0xBB, 0xBF]));
    assert_eq!(
        String::from_utf8(written[3..].to_vec())?,
        concat!(
            "#NAME \"英辞郎 (EIJIRO-TEST)\"\n",
            "#INDEX_LANGUAGE \"English\"\n",
            "#CONTENTS_LANGUAGE \"Japanese\"\n",
            "dog\n",
            " [m1][b][c]名[/c][/b]) [trn]犬[/trn][/m]\n",
            " [m1][b][c]動[/c][/b]) [trn]跡をつける[/trn][/m]\n",
            "cat\n",
            " [m1][trn]猫[/trn][/m]\n",
        )
    );

    // 一時ファイルが残っていない
    assert_eq!(fs::read_dir(dir.path())?.count(), 2);

    Ok(())
}

#[test]
fn test_selected_lines_only() -> Result<()> {
    let lines = split_lines(DICTIONARY);

    let targets = select_lines("3, -1", lines.len())?;
    assert_eq!(targets, vec![1, 3]);

    let mut renderer = Renderer::new();
    let converted = convert_lines(&lines, &targets, &mut renderer, true)?;
    assert_eq!(converted.rendered.len(), 2);
    assert_eq!(converted.articles.len(), 2);
    assert_eq!(converted.articles[1].key.0, "cat");

    Ok(())
}

#[test]
fn test_select_lines_out_of_range() {
    assert!(select_lines("2-4", 3).is_err());
    assert!(select_lines("0", 3).is_err());
    assert!(select_lines("1-x", 3).is_err());
    assert_eq!(select_lines("", 3).unwrap(), Vec::<usize>::new());
}

#[test]
fn test_select_lines_huge_upper_bound() {
    // 範囲を展開する前にエラーになる
    let error = select_lines("1-10000000000", 3).unwrap_err();
    assert_eq!(error.to_string(), "Line 10000000000 is out of range (1-3)");

    let error = select_lines("2, 5-10000000000", 3).unwrap_err();
    assert_eq!(error.to_string(), "Line 10000000000 is out of range (1-3)");

    // 逆順の範囲は空なので行数を超えていてもよい
    assert_eq!(select_lines("10000000000-5, 2", 3).unwrap(), vec![2]);
}

#[test]
fn test_parse_error_reports_line() {
    let lines = split_lines("■dog : 犬\ncat : 猫\n");

    let mut renderer = Renderer::new();
    let error = convert_lines(&lines, &[1, 2], &mut renderer, false)
        .err()
        .expect("second line must fail");

    let message = format!("{:#}", error);
    assert!(message.contains("At line 2"), "{}", message);
    assert!(message.contains("Cannot parse: cat : 猫"), "{}", message);
}

#[test]
fn test_decode_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let infile = dir.path().join("broken.txt");
    fs::write(&infile, b"\xFF\xFF\n")?;

    assert!(read_dictionary(&infile, encoding_rs::UTF_8).is_err());

    Ok(())
}

#[test]
fn test_write_tree() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tree_file = dir.path().join("tree.json");

    let lines = split_lines(DICTIONARY);
    let mut renderer = Renderer::new();
    let converted = convert_lines(&lines, &[3], &mut renderer, true)?;
    write_tree(&tree_file, &converted.articles)?;

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&tree_file)?)?;
    assert_eq!(json[0]["key"], "cat");

    Ok(())
}

#[test]
fn test_default_outfile() {
    assert_eq!(
        default_outfile(Path::new("dict/EIJIRO-1445.TXT")),
        Path::new("dict/EIJIRO-1445.dsl")
    );
}
