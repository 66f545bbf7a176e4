// 英辞郎テキスト形式 (1 行 1 項目) の解析と DSL 形式への変換
//
// フォーマットから外れたものは基本的にエラーとするが，一部フールプルーフする：
// - 品詞の "{" は 1 ～ 3 個並んでいてもよい，"}" も複数でよい (例: "amygdalo-")
// - "【" "】" は重複していてもよい (例: "cerium")
// - "<deletia>" や "<3" のように '<' '>' を含む語を許す
//   '<' の直後は 1 文字の記号でもよい ("< 3")，ただし "<→" は参照
// - 行頭の "■・" は "・" で始まる見出し語とする (例文ではない)
// - 改行は CR+LF でもよい

mod body_parser;
pub mod parser;
pub mod parser_helper;
pub mod renderer;
mod term_parser;
pub mod tokenizer;
